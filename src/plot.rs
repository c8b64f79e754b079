//! Waveform plots
//!
//! Renders stacked time-domain panels to SVG: the modulating signal, each
//! reference carrier and the modulated signal. Complex signals show their real
//! and imaginary parts, plus a constellation panel of the transmitted points.

use std::path::Path;

use plotters::prelude::*;
use snafu::Snafu;

use crate::modulation::{AnalogWaveform, Samples, WaveformResult};

const PANEL_HEIGHT: u32 = 220;
const WIDTH: u32 = 1000;

#[derive(Debug, Snafu)]
pub enum PlotError {
    /// Nothing to draw
    #[snafu(display("waveform has no samples to plot"))]
    EmptyWaveform,

    #[snafu(display("drawing failed: {message}"))]
    Drawing { message: String },
}

fn drawing_error<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Drawing {
        message: err.to_string(),
    }
}

struct Trace<'a> {
    label: &'static str,
    values: Vec<f64>,
    color: &'a RGBColor,
}

struct Panel<'a> {
    title: String,
    traces: Vec<Trace<'a>>,
}

impl<'a> Panel<'a> {
    fn single(title: impl Into<String>, values: Vec<f64>, color: &'a RGBColor) -> Self {
        Panel {
            title: title.into(),
            traces: vec![Trace {
                label: "",
                values,
                color,
            }],
        }
    }

    fn from_samples(title: impl Into<String>, samples: &Samples, color: &'a RGBColor) -> Self {
        match samples {
            Samples::Real(values) => Panel::single(title, values.clone(), color),
            Samples::Complex(values) => Panel {
                title: title.into(),
                traces: vec![
                    Trace {
                        label: "real",
                        values: values.iter().map(|c| c.re).collect(),
                        color,
                    },
                    Trace {
                        label: "imaginary",
                        values: values.iter().map(|c| c.im).collect(),
                        color: &MAGENTA,
                    },
                ],
            },
        }
    }

    fn y_range(&self) -> (f64, f64) {
        let (min, max) = self
            .traces
            .iter()
            .flat_map(|trace| trace.values.iter())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

        if !min.is_finite() || !max.is_finite() || (max - min).abs() < 1e-12 {
            return (min.min(0.0) - 1.0, max.max(0.0) + 1.0);
        }
        let pad = 0.1 * (max - min);
        (min - pad, max + pad)
    }
}

fn draw_panels(
    path: &Path,
    title: &str,
    time: &[f64],
    panels: &[Panel],
    constellation: Option<&[(f64, f64)]>,
) -> Result<(), PlotError> {
    let (Some(&start), Some(&end)) = (time.first(), time.last()) else {
        return EmptyWaveformSnafu.fail();
    };
    let end = if end > start { end } else { start + 1.0 };

    let rows = panels.len() + usize::from(constellation.is_some());
    let root = SVGBackend::new(path, (WIDTH, PANEL_HEIGHT * rows as u32 + 40)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing_error)?;
    let root = root.titled(title, ("sans-serif", 24)).map_err(drawing_error)?;
    let areas = root.split_evenly((rows, 1));

    for (area, panel) in areas.iter().zip(panels) {
        let (y_min, y_max) = panel.y_range();
        let mut chart = ChartBuilder::on(area)
            .caption(&panel.title, ("sans-serif", 16))
            .margin(8)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(start..end, y_min..y_max)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc("Time (seconds)")
            .draw()
            .map_err(drawing_error)?;

        for trace in &panel.traces {
            let color = *trace.color;
            let series = chart
                .draw_series(LineSeries::new(
                    time.iter().copied().zip(trace.values.iter().copied()),
                    color,
                ))
                .map_err(drawing_error)?;
            if !trace.label.is_empty() {
                series
                    .label(trace.label)
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
        }

        if panel.traces.iter().any(|trace| !trace.label.is_empty()) {
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(drawing_error)?;
        }
    }

    if let (Some(points), Some(area)) = (constellation, areas.last()) {
        let limit = points
            .iter()
            .fold(1.0_f64, |limit, &(re, im)| limit.max(re.abs()).max(im.abs()))
            * 1.25;

        let mut chart = ChartBuilder::on(area)
            .caption("Constellation", ("sans-serif", 16))
            .margin(8)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(-limit..limit, -limit..limit)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc("In-phase")
            .y_desc("Quadrature")
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(points.iter().map(|&point| Circle::new(point, 5, RED.filled())))
            .map_err(drawing_error)?;
    }

    root.present().map_err(drawing_error)?;
    tracing::debug!(path = %path.display(), rows, "rendered plot");
    Ok(())
}

/// Plot the output of [`crate::synthesize`]
pub fn render_digital(result: &WaveformResult, title: &str, path: &Path) -> Result<(), PlotError> {
    let mut panels = vec![Panel::from_samples(
        "Modulating signal",
        &result.modulating_staircase(),
        &BLUE,
    )];

    for carrier in &result.carriers {
        panels.push(Panel::single(
            format!("Reference {} ({} Hz)", carrier.kind, carrier.frequency),
            carrier.samples.clone(),
            &GREEN,
        ));
    }

    panels.push(Panel::from_samples("Modulated signal", &result.modulated, &RED));

    let constellation: Option<Vec<(f64, f64)>> = result
        .modulating
        .as_complex()
        .map(|points| points.iter().map(|p| (p.re, p.im)).collect());

    draw_panels(path, title, &result.time, &panels, constellation.as_deref())
}

/// Plot the output of the AM or FM modulator
pub fn render_analog(waveform: &AnalogWaveform, title: &str, path: &Path) -> Result<(), PlotError> {
    let panels = [
        Panel::single("Message signal", waveform.message.clone(), &BLUE),
        Panel::single("Carrier signal", waveform.carrier.clone(), &GREEN),
        Panel::single("Modulated signal", waveform.modulated.clone(), &RED),
    ];

    draw_panels(path, title, &waveform.time, &panels, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SynthesisConfig;
    use crate::scheme::{Scheme, SchemeOptions};
    use crate::synthesize;

    #[test]
    fn test_render_qpsk_svg() {
        let layout = Scheme::Qpsk.symbol_layout(&SchemeOptions::default()).unwrap().unwrap();
        let config = SynthesisConfig::new(5.0, 200.0, 1.0);
        let bits = [0, 1, 1, 0, 1, 1, 0, 0];
        let result = synthesize(&bits, layout.bits_per_symbol, &layout.table, &config).unwrap();

        let path = std::env::temp_dir().join("modsynth_plot_qpsk.svg");
        render_digital(&result, "QPSK", &path).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_empty_waveform_is_rejected() {
        let layout = Scheme::Bpsk.symbol_layout(&SchemeOptions::default()).unwrap().unwrap();
        let config = SynthesisConfig::default();
        let result = synthesize(&[], layout.bits_per_symbol, &layout.table, &config).unwrap();

        let path = std::env::temp_dir().join("modsynth_plot_empty.svg");
        assert!(matches!(
            render_digital(&result, "empty", &path),
            Err(PlotError::EmptyWaveform)
        ));
    }

    #[test]
    fn test_flat_panel_gets_a_range() {
        let panel = Panel::single("flat", vec![0.0; 10], &BLUE);
        assert_eq!(panel.y_range(), (-1.0, 1.0));
    }
}
