use plotters::coord::Shift;
use plotters::prelude::*;

use super::figure::{Figure, generation_range, padded_range};
use crate::config::PlotConfig;
use crate::error::Result;
use crate::stats::FitnessHistory;

pub(crate) struct FitnessChart {
    best: Vec<f64>,
    average: Vec<f64>,
    stdev: Vec<f64>,
    ylog: bool,
    font: String,
    caption_size: u32,
}

impl FitnessChart {
    pub(crate) fn from_history<S: FitnessHistory + ?Sized>(
        stats: &S,
        ylog: bool,
        cfg: &PlotConfig,
    ) -> Self {
        Self {
            best: stats.best_fitness(),
            average: stats.fitness_mean(),
            stdev: stats.fitness_stdev(),
            ylog,
            font: cfg.font_family.clone(),
            caption_size: cfg.caption_size,
        }
    }

    fn scale(&self, y: f64) -> f64 {
        if self.ylog { symlog(y) } else { y }
    }

    fn series(&self, values: impl Iterator<Item = f64>) -> Vec<(f64, f64)> {
        values
            .enumerate()
            .map(|(i, y)| (i as f64, self.scale(y)))
            .collect()
    }
}

impl Figure for FitnessChart {
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let average = self.series(self.average.iter().copied());
        let lower = self.series(self.average.iter().zip(&self.stdev).map(|(m, s)| m - s));
        let upper = self.series(self.average.iter().zip(&self.stdev).map(|(m, s)| m + s));
        let best = self.series(self.best.iter().copied());

        let generations = self.best.len().max(self.average.len());
        let y_range = padded_range(
            average
                .iter()
                .chain(&lower)
                .chain(&upper)
                .chain(&best)
                .map(|(_, y)| *y),
        );

        let mut chart = ChartBuilder::on(root)
            .caption(
                "Population's average and best fitness",
                (self.font.as_str(), self.caption_size),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(generation_range(generations), y_range)?;

        let ylog = self.ylog;
        chart
            .configure_mesh()
            .x_desc("Generations")
            .y_desc("Fitness")
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format_tick(if ylog { symlog_inv(*y) } else { *y }))
            .draw()?;

        chart
            .draw_series(LineSeries::new(average, &BLUE))?
            .label("average")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
        chart
            .draw_series(DashedLineSeries::new(lower, 8, 4, GREEN.stroke_width(1)))?
            .label("-1 sd")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
        chart
            .draw_series(DashedLineSeries::new(upper, 8, 4, GREEN.stroke_width(1)))?
            .label("+1 sd")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN));
        chart
            .draw_series(LineSeries::new(best, &RED))?
            .label("best")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}

/// Symmetric log: linear near zero, logarithmic in both tails.
pub(crate) fn symlog(y: f64) -> f64 {
    y.signum() * y.abs().ln_1p()
}

pub(crate) fn symlog_inv(y: f64) -> f64 {
    y.signum() * y.abs().exp_m1()
}

fn format_tick(v: f64) -> String {
    let a = v.abs();
    if a != 0.0 && !(0.01..10_000.0).contains(&a) {
        format!("{v:.1e}")
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symlog_is_odd_and_invertible() {
        for y in [-1e6, -12.5, -1.0, 0.0, 0.25, 3.0, 4.2e4] {
            assert!((symlog(-y) + symlog(y)).abs() < 1e-12);
            let back = symlog_inv(symlog(y));
            assert!((back - y).abs() <= 1e-9 * y.abs().max(1.0), "{y} -> {back}");
        }
        assert!(symlog(1000.0) < 10.0);
    }

    #[test]
    fn ticks_switch_to_scientific_at_extremes() {
        assert_eq!(format_tick(0.0), "0.00");
        assert_eq!(format_tick(12.5), "12.50");
        assert_eq!(format_tick(25_000.0), "2.5e4");
        assert_eq!(format_tick(0.001), "1.0e-3");
    }
}
