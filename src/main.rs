// Entry point: loads run data and writes the requested plot or diagram.
mod cli;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Args, Command, NetArgs, SpikeArgs};
use neatviz::genome::NetFile;
use neatviz::neuron::{simulate, step_current};
use neatviz::stats::Statistics;
use neatviz::{
    NetDrawOptions, SpeciesPlotOptions, SpikePlotOptions, StatsPlotOptions, VizConfig, draw_net,
    plot_species, plot_spikes, plot_stats,
};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let cfg = VizConfig::load_or_default(&args.config);
    let place = |p: &Path| -> PathBuf {
        if p.is_absolute() { p.to_path_buf() } else { args.out_dir.join(p) }
    };

    match &args.command {
        Command::Stats { input, out, ylog } => {
            let stats = Statistics::load(input)?;
            let opts = StatsPlotOptions {
                ylog: *ylog,
                view: args.view,
                filename: place(out),
            };
            report("fitness plot", plot_stats(&stats, &opts, &cfg)?);
        }
        Command::Species { input, out } => {
            let stats = Statistics::load(input)?;
            let opts = SpeciesPlotOptions {
                view: args.view,
                filename: place(out),
            };
            report("speciation plot", plot_species(&stats, &opts, &cfg)?);
        }
        Command::Net(net) => run_net(net, &place(&net.out), args.view, &cfg)?,
        Command::Spikes(spk) => run_spikes(spk, &place(&spk.out), args.view, &cfg)?,
    }
    Ok(())
}

fn run_net(net: &NetArgs, out: &Path, view: bool, cfg: &VizConfig) -> Result<(), Box<dyn Error>> {
    let file = NetFile::load(&net.input)?;
    let opts = NetDrawOptions {
        view,
        filename: Some(out.to_path_buf()),
        node_names: file.node_names,
        node_colors: file.node_colors,
        show_disabled: !net.hide_disabled,
        prune_unused: net.prune_unused,
        fmt: net.fmt.clone(),
    };
    let graph = draw_net(&file.config, &file.genome, &opts, cfg)?;
    report(
        "network diagram",
        graph.map(|_| PathBuf::from(format!("{}.{}", out.display(), net.fmt))),
    );
    Ok(())
}

fn run_spikes(
    spk: &SpikeArgs,
    out: &Path,
    view: bool,
    cfg: &VizConfig,
) -> Result<(), Box<dyn Error>> {
    let (on, off) = match spk.stimulus.as_slice() {
        [on, off] => (*on, *off),
        _ => (0, spk.steps),
    };
    let trace = simulate(
        spk.preset.params(),
        spk.steps,
        spk.dt,
        step_current(spk.current, on, off),
    );
    let fired = trace.iter().filter(|s| s.fired > 0.0).count();
    info!("simulated {} steps, {} spikes", trace.len(), fired);

    let opts = SpikePlotOptions {
        view,
        filename: Some(out.to_path_buf()),
        title: spk.title.clone(),
    };
    let figure = plot_spikes(&trace, &opts, cfg)?;
    report("spike trains", figure.and_then(|f| f.path));
    Ok(())
}

fn report(what: &str, written: Option<PathBuf>) {
    match written {
        Some(path) => info!("Saved {what} to {}", path.display()),
        None => warn!("Skipped {what}"),
    }
}
