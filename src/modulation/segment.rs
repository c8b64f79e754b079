//! Per-symbol carrier segments

/// One symbol window on the local time axis `i / sample_rate`, `i in 0..samples_per_symbol`
///
/// Half-open, so adjacent symbols never share a sample.
#[derive(Debug, Clone, Copy)]
pub(super) struct Window {
    samples_per_symbol: usize,
    sample_rate: f64,
}

impl Window {
    pub(super) fn new(samples_per_symbol: usize, sample_rate: f64) -> Self {
        Window {
            samples_per_symbol,
            sample_rate,
        }
    }

    /// Local time of sample `i` within the window
    fn local_time(&self, i: usize) -> f64 {
        i as f64 / self.sample_rate
    }

    /// Concatenate one segment per symbol value, evaluating `segment(value, tau)`
    /// at every local time of the window
    pub(super) fn tile<T, U, F>(&self, values: &[T], segment: F) -> Vec<U>
    where
        T: Copy,
        F: Fn(T, f64) -> U,
    {
        let mut samples = Vec::with_capacity(values.len() * self.samples_per_symbol);
        for &value in values {
            samples.extend(
                (0..self.samples_per_symbol).map(|i| segment(value, self.local_time(i))),
            );
        }
        samples
    }
}

/// Repeat each value `factor` times
pub(super) fn hold<T: Copy>(values: &[T], factor: usize) -> Vec<T> {
    let mut samples = Vec::with_capacity(values.len() * factor);
    for &value in values {
        samples.resize(samples.len() + factor, value);
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_time_restarts_at_zero() {
        let window = Window::new(4, 8.0);
        let samples = window.tile(&[(), ()], |_, t| t);
        assert_eq!(samples, vec![0.0, 0.125, 0.25, 0.375, 0.0, 0.125, 0.25, 0.375]);
    }

    #[test]
    fn test_tile_length() {
        let window = Window::new(10, 10.0);
        let samples = window.tile(&[1.0, 2.0, 3.0], |v, t| v * t);
        assert_eq!(samples.len(), 30);
        assert_eq!(samples[10], 0.0);
        assert_eq!(samples[12], 0.4);
    }

    #[test]
    fn test_tile_with_no_values() {
        let window = Window::new(10, 10.0);
        let samples: Vec<f64> = window.tile(&[] as &[f64], |v, t| v * t);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_empty_tile_allocates_nothing_for_huge_windows() {
        let window = Window::new(usize::MAX / 2, 1.0);
        let samples: Vec<f64> = window.tile(&[] as &[f64], |v, t| v * t);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_hold() {
        assert_eq!(hold(&[1, 2], 3), vec![1, 1, 1, 2, 2, 2]);
        assert!(hold(&[1, 2], 0).is_empty());
    }
}
