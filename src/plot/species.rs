use plotters::coord::Shift;
use plotters::prelude::*;

use super::figure::{Figure, generation_range};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::stats::SpeciesHistory;

pub(crate) struct SpeciesChart {
    /// Cumulative size per species: `layers[k][g]` = sum of species 0..=k at generation g.
    layers: Vec<Vec<f64>>,
    generations: usize,
    font: String,
    caption_size: u32,
}

impl SpeciesChart {
    pub(crate) fn from_history<S: SpeciesHistory + ?Sized>(stats: &S, cfg: &PlotConfig) -> Self {
        let sizes = stats.species_sizes();
        Self {
            layers: stack_layers(&sizes),
            generations: sizes.len(),
            font: cfg.font_family.clone(),
            caption_size: cfg.caption_size,
        }
    }
}

/// Transpose generation rows into per-species curves and stack them.
pub(crate) fn stack_layers(sizes: &[Vec<usize>]) -> Vec<Vec<f64>> {
    let n_species = sizes.iter().map(Vec::len).max().unwrap_or(0);
    let mut layers = Vec::with_capacity(n_species);
    let mut running = vec![0.0f64; sizes.len()];
    for sid in 0..n_species {
        for (g, row) in sizes.iter().enumerate() {
            running[g] += row.get(sid).copied().unwrap_or(0) as f64;
        }
        layers.push(running.clone());
    }
    layers
}

impl Figure for SpeciesChart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let y_max = self
            .layers
            .last()
            .map(|top| top.iter().copied().fold(0.0f64, f64::max))
            .unwrap_or(0.0)
            .max(1.0);

        let mut chart = ChartBuilder::on(root)
            .caption("Speciation", (self.font.as_str(), self.caption_size))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(generation_range(self.generations), 0.0f64..y_max * 1.05)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc("Generations")
            .y_desc("Size per Species")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.0}", y))
            .draw()?;

        // Tallest layer first so each lower band paints over it.
        for (sid, layer) in self.layers.iter().enumerate().rev() {
            let color = Palette99::pick(sid);
            let points: Vec<(f64, f64)> = layer
                .iter()
                .enumerate()
                .map(|(g, &y)| (g as f64, y))
                .collect();
            chart.draw_series(
                AreaSeries::new(points, 0.0, color.mix(0.9).filled()).border_style(color),
            )?;
        }
        Ok(())
    }
}
