//! Plots and network diagrams for NEAT neuro-evolution runs.
//!
//! Four entry points, each guarded by a check for its rendering dependency:
//!
//! * [`plot_stats`]: average / best fitness per generation
//! * [`plot_spikes`]: trains of a single Izhikevich neuron
//! * [`plot_species`]: species sizes as a stacked area chart
//! * [`draw_net`]: network topology through Graphviz
//!
//! A missing dependency is logged as a warning and the call returns `Ok(None)`.

pub mod config;
pub mod error;
pub mod genome;
pub mod net;
pub mod neuron;
pub mod plot;
pub mod stats;
mod viewer;

pub use config::VizConfig;
pub use error::{Result, VisualizeError};
pub use net::{NetDrawOptions, check_graphviz, draw_net};
pub use plot::{
    SpeciesPlotOptions, SpikeFigure, SpikePlotOptions, StatsPlotOptions, check_plotting,
    plot_species, plot_spikes, plot_stats,
};
