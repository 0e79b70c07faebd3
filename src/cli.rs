use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use neatviz::neuron::IzPreset;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "neatviz.toml")]
    pub config: String,

    /// Directory that relative output names are placed in
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Open each result with the configured viewer
    #[arg(long, default_value_t = false)]
    pub view: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Average and best fitness over generations
    Stats {
        /// Statistics JSON
        input: PathBuf,
        #[arg(long, default_value = "avg_fitness.svg")]
        out: PathBuf,
        /// Symmetric-log fitness axis
        #[arg(long, default_value_t = false)]
        ylog: bool,
    },
    /// Species sizes over generations
    Species {
        /// Statistics JSON
        input: PathBuf,
        #[arg(long, default_value = "speciation.svg")]
        out: PathBuf,
    },
    /// Network topology of a genome
    Net(NetArgs),
    /// Simulate one Izhikevich neuron and plot its trains
    Spikes(SpikeArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct NetArgs {
    /// Net JSON (config, genome, optional node_names / node_colors)
    pub input: PathBuf,
    /// DOT source path; the image is written next to it
    #[arg(long, default_value = "Digraph.gv")]
    pub out: PathBuf,
    /// Output format passed to dot
    #[arg(long, default_value = "svg")]
    pub fmt: String,
    /// Leave out disabled connections
    #[arg(long, default_value_t = false)]
    pub hide_disabled: bool,
    /// Drop nodes that cannot reach an output
    #[arg(long, default_value_t = false)]
    pub prune_unused: bool,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SpikeArgs {
    #[arg(long, value_enum, default_value_t = IzPreset::RegularSpiking)]
    pub preset: IzPreset,
    /// Input current while the stimulus is on
    #[arg(long, default_value_t = 10.0)]
    pub current: f64,
    #[arg(long, default_value_t = 1000)]
    pub steps: usize,
    /// Step size in milliseconds
    #[arg(long, default_value_t = 0.25)]
    pub dt: f64,
    /// First and last step of the stimulus
    #[arg(long, num_args = 2, default_values_t = [100, 800])]
    pub stimulus: Vec<usize>,
    #[arg(long, default_value = "spikes.svg")]
    pub out: PathBuf,
    #[arg(long)]
    pub title: Option<String>,
}
