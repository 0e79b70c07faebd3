use plotters::coord::Shift;
use plotters::prelude::*;

use super::figure::{Figure, padded_range};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::neuron::SpikeSample;

pub(crate) struct SpikeChart {
    title: String,
    t: Vec<f64>,
    potential: Vec<f64>,
    fired: Vec<f64>,
    recovery: Vec<f64>,
    current: Vec<f64>,
    font: String,
    caption_size: u32,
}

pub(crate) fn figure_title(title: Option<&str>) -> String {
    match title {
        Some(t) => format!("Izhikevich's spiking neuron model ({t})"),
        None => "Izhikevich's spiking neuron model".to_string(),
    }
}

impl SpikeChart {
    pub(crate) fn new(spikes: &[SpikeSample], title: Option<&str>, cfg: &PlotConfig) -> Self {
        Self {
            title: figure_title(title),
            t: spikes.iter().map(|s| s.t).collect(),
            potential: spikes.iter().map(|s| s.potential).collect(),
            fired: spikes.iter().map(|s| s.fired).collect(),
            recovery: spikes.iter().map(|s| s.recovery).collect(),
            current: spikes.iter().map(|s| s.current).collect(),
            font: cfg.font_family.clone(),
            caption_size: cfg.caption_size,
        }
    }

    fn panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        y_desc: &str,
        ys: &[f64],
        color: RGBColor,
        markers: bool,
    ) -> Result<()> {
        let points: Vec<(f64, f64)> = self.t.iter().copied().zip(ys.iter().copied()).collect();

        let mut chart = ChartBuilder::on(area)
            .margin(8)
            .x_label_area_size(30)
            .y_label_area_size(60)
            .build_cartesian_2d(
                padded_range(self.t.iter().copied()),
                padded_range(ys.iter().copied()),
            )?;

        chart
            .configure_mesh()
            .x_desc("Time (in ms)")
            .y_desc(y_desc)
            .draw()?;

        chart.draw_series(LineSeries::new(points.iter().copied(), &color))?;
        if markers {
            chart.draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
            )?;
        }
        Ok(())
    }
}

impl Figure for SpikeChart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let body = root.titled(&self.title, (self.font.as_str(), self.caption_size))?;
        let panels = body.split_evenly((4, 1));

        self.panel(&panels[0], "Potential (mv)", &self.potential, GREEN, false)?;
        self.panel(&panels[1], "Fired", &self.fired, RED, false)?;
        self.panel(&panels[2], "Recovery (u)", &self.recovery, RED, false)?;
        self.panel(&panels[3], "Current (I)", &self.current, RED, true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_mentions_optional_label() {
        assert_eq!(figure_title(None), "Izhikevich's spiking neuron model");
        assert_eq!(
            figure_title(Some("fast spiking")),
            "Izhikevich's spiking neuron model (fast spiking)"
        );
    }
}
