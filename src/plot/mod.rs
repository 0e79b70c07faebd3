//! Fitness, spike-train and speciation charts drawn with `plotters`.
//!
//! Charts are only available with the `plot` feature. Without it every
//! entry point warns once per call and returns `Ok(None)`.

#[cfg(feature = "plot")]
mod figure;
#[cfg(feature = "plot")]
mod fitness;
#[cfg(feature = "plot")]
mod species;
#[cfg(feature = "plot")]
mod spikes;

use std::path::PathBuf;

use tracing::warn;

use crate::config::VizConfig;
use crate::error::Result;
use crate::neuron::SpikeSample;
use crate::stats::{FitnessHistory, SpeciesHistory};

#[derive(Debug, Clone)]
pub struct StatsPlotOptions {
    /// Symmetric-log y axis.
    pub ylog: bool,
    pub view: bool,
    pub filename: PathBuf,
}

impl Default for StatsPlotOptions {
    fn default() -> Self {
        Self {
            ylog: false,
            view: false,
            filename: PathBuf::from("avg_fitness.svg"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpikePlotOptions {
    pub view: bool,
    pub filename: Option<PathBuf>,
    pub title: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SpeciesPlotOptions {
    pub view: bool,
    pub filename: PathBuf,
}

impl Default for SpeciesPlotOptions {
    fn default() -> Self {
        Self {
            view: false,
            filename: PathBuf::from("speciation.svg"),
        }
    }
}

/// A rendered spike-train figure, kept as an SVG document.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeFigure {
    pub svg: String,
    /// Where the figure was written, if anywhere.
    pub path: Option<PathBuf>,
}

/// Whether chart rendering is compiled in. Warns when it is not.
pub fn check_plotting() -> bool {
    if cfg!(feature = "plot") {
        true
    } else {
        warn!("This display is not available due to a missing optional dependency (plotters)");
        false
    }
}

/// Plot the population's average and best fitness per generation.
///
/// Returns the written file, or `Ok(None)` when plotting is unavailable.
pub fn plot_stats<S: FitnessHistory + ?Sized>(
    statistics: &S,
    opts: &StatsPlotOptions,
    cfg: &VizConfig,
) -> Result<Option<PathBuf>> {
    if !check_plotting() {
        return Ok(None);
    }
    #[cfg(feature = "plot")]
    {
        let chart = fitness::FitnessChart::from_history(statistics, opts.ylog, &cfg.plot);
        figure::save(&chart, &opts.filename, (cfg.plot.width, cfg.plot.height))?;
        if opts.view {
            crate::viewer::open(&opts.filename, &cfg.viewer)?;
        }
        Ok(Some(opts.filename.clone()))
    }
    #[cfg(not(feature = "plot"))]
    {
        let _ = (statistics, opts, cfg);
        Ok(None)
    }
}

/// Plot the trains of a single spiking neuron as four stacked panels.
///
/// The figure is always returned; it is written to `opts.filename` when set.
pub fn plot_spikes(
    spikes: &[SpikeSample],
    opts: &SpikePlotOptions,
    cfg: &VizConfig,
) -> Result<Option<SpikeFigure>> {
    if !check_plotting() {
        return Ok(None);
    }
    #[cfg(feature = "plot")]
    {
        let chart = spikes::SpikeChart::new(spikes, opts.title.as_deref(), &cfg.plot);
        let size = (cfg.plot.spike_width, cfg.plot.spike_height);
        let svg = figure::to_svg_string(&chart, size)?;

        let path = match &opts.filename {
            Some(path) => {
                figure::save(&chart, path, size)?;
                Some(path.clone())
            }
            None if opts.view => Some(keep_temp_svg("neatviz_spikes_", &svg)?),
            None => None,
        };
        if opts.view {
            if let Some(path) = &path {
                crate::viewer::open(path, &cfg.viewer)?;
            }
        }
        Ok(Some(SpikeFigure { svg, path }))
    }
    #[cfg(not(feature = "plot"))]
    {
        let _ = (spikes, opts, cfg);
        Ok(None)
    }
}

/// Write `svg` to a fresh temp file that outlives this call, so a viewer
/// launched on it is not raced by the next figure.
#[cfg(feature = "plot")]
fn keep_temp_svg(prefix: &str, svg: &str) -> Result<PathBuf> {
    use std::io::Write;

    let mut tmp = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".svg")
        .tempfile()?;
    tmp.write_all(svg.as_bytes())?;
    let path = tmp.into_temp_path().keep().map_err(std::io::Error::from)?;
    Ok(path)
}

/// Stacked area chart of species sizes over generations.
pub fn plot_species<S: SpeciesHistory + ?Sized>(
    statistics: &S,
    opts: &SpeciesPlotOptions,
    cfg: &VizConfig,
) -> Result<Option<PathBuf>> {
    if !check_plotting() {
        return Ok(None);
    }
    #[cfg(feature = "plot")]
    {
        let chart = species::SpeciesChart::from_history(statistics, &cfg.plot);
        figure::save(&chart, &opts.filename, (cfg.plot.width, cfg.plot.height))?;
        if opts.view {
            crate::viewer::open(&opts.filename, &cfg.viewer)?;
        }
        Ok(Some(opts.filename.clone()))
    }
    #[cfg(not(feature = "plot"))]
    {
        let _ = (statistics, opts, cfg);
        Ok(None)
    }
}

#[cfg(all(test, feature = "plot"))]
mod tests {
    use super::*;

    #[test]
    fn temp_svgs_get_distinct_paths_and_persist() {
        let a = keep_temp_svg("neatviz_spikes_", "<svg>a</svg>").unwrap();
        let b = keep_temp_svg("neatviz_spikes_", "<svg>b</svg>").unwrap();
        assert_ne!(a, b);
        assert_eq!(std::fs::read_to_string(&a).unwrap(), "<svg>a</svg>");
        assert_eq!(std::fs::read_to_string(&b).unwrap(), "<svg>b</svg>");
        assert!(a.extension().is_some_and(|e| e == "svg"));
        let _ = std::fs::remove_file(&a);
        let _ = std::fs::remove_file(&b);
    }
}

#[cfg(all(test, not(feature = "plot")))]
mod no_backend_tests {
    use super::*;
    use crate::stats::Statistics;

    #[test]
    fn plots_soft_fail_without_backend() {
        let cfg = VizConfig::default();
        let stats = Statistics::default();
        let stats_opts = StatsPlotOptions {
            filename: std::env::temp_dir().join("neatviz_no_backend_fitness.svg"),
            ..StatsPlotOptions::default()
        };
        assert!(!check_plotting());
        assert!(plot_stats(&stats, &stats_opts, &cfg).unwrap().is_none());
        assert!(!stats_opts.filename.exists());
        assert!(plot_species(&stats, &SpeciesPlotOptions::default(), &cfg).unwrap().is_none());
        assert!(plot_spikes(&[], &SpikePlotOptions::default(), &cfg).unwrap().is_none());
    }
}
