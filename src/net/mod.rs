//! Network topology diagrams rendered through Graphviz.

pub mod dot;
pub mod prune;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

pub use dot::Digraph;
pub use prune::required_for_output;

use crate::config::{GraphvizConfig, VizConfig};
use crate::error::Result;
use crate::genome::{Genome, GenomeConfig, NodeKey};
use crate::viewer;

#[derive(Debug, Clone)]
pub struct NetDrawOptions {
    pub view: bool,
    /// DOT source path; the image lands next to it as `<filename>.<fmt>`.
    pub filename: Option<PathBuf>,
    pub node_names: BTreeMap<NodeKey, String>,
    pub node_colors: BTreeMap<NodeKey, String>,
    pub show_disabled: bool,
    pub prune_unused: bool,
    pub fmt: String,
}

impl Default for NetDrawOptions {
    fn default() -> Self {
        Self {
            view: false,
            filename: None,
            node_names: BTreeMap::new(),
            node_colors: BTreeMap::new(),
            show_disabled: true,
            prune_unused: false,
            fmt: "svg".to_string(),
        }
    }
}

/// Whether the Graphviz `dot` executable can be run. Warns when it cannot.
pub fn check_graphviz(cfg: &GraphvizConfig) -> bool {
    let found = Command::new(&cfg.dot_path)
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    if !found {
        warn!("This display is not available due to a missing optional dependency (graphviz)");
    }
    found
}

/// Lay out the genome as a DOT graph without rendering it.
pub fn build_net_graph(config: &GenomeConfig, genome: &Genome, opts: &NetDrawOptions) -> Digraph {
    let name_of = |k: NodeKey| opts.node_names.get(&k).cloned().unwrap_or_else(|| k.to_string());
    let color_of = |k: NodeKey, fallback: &str| {
        opts.node_colors
            .get(&k)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };

    let mut graph = Digraph::new(
        opts.fmt.clone(),
        dot::attrs([
            ("shape", "circle"),
            ("fontsize", "9"),
            ("height", "0.2"),
            ("width", "0.2"),
        ]),
    );

    let inputs: BTreeSet<NodeKey> = config.input_keys.iter().copied().collect();
    let outputs: BTreeSet<NodeKey> = config.output_keys.iter().copied().collect();

    for &k in &config.input_keys {
        let fill = color_of(k, "lightgray");
        graph.node(
            name_of(k),
            dot::attrs([("style", "filled"), ("shape", "box"), ("fillcolor", fill.as_str())]),
        );
    }
    for &k in &config.output_keys {
        let fill = color_of(k, "lightblue");
        graph.node(
            name_of(k),
            dot::attrs([("style", "filled"), ("fillcolor", fill.as_str())]),
        );
    }

    let used: BTreeSet<NodeKey> = if opts.prune_unused {
        required_for_output(&outputs, genome.connections.values(), opts.show_disabled)
    } else {
        genome.nodes.keys().copied().collect()
    };

    for &n in used.difference(&inputs) {
        if outputs.contains(&n) {
            continue;
        }
        let fill = color_of(n, "white");
        graph.node(name_of(n), dot::attrs([("style", "filled"), ("fillcolor", fill.as_str())]));
    }

    let drawn = |k: &NodeKey| inputs.contains(k) || outputs.contains(k) || used.contains(k);
    for cg in genome.connections.values() {
        if !(cg.enabled || opts.show_disabled) {
            continue;
        }
        let (from, to) = cg.key;
        // Pruned endpoints would otherwise be recreated implicitly by dot.
        if opts.prune_unused && !(drawn(&from) && drawn(&to)) {
            continue;
        }
        let style = if cg.enabled { "solid" } else { "dotted" };
        let color = if cg.weight > 0.0 { "green" } else { "red" };
        let width = format!("{}", 0.1 + (cg.weight / 5.0).abs());
        graph.edge(
            name_of(from),
            name_of(to),
            dot::attrs([("style", style), ("color", color), ("penwidth", width.as_str())]),
        );
    }

    debug!(
        "built net graph: {} nodes, {} edges",
        graph.nodes().count(),
        graph.edges().count()
    );
    graph
}

/// Draw a network with arbitrary topology.
///
/// Returns `Ok(None)` when Graphviz is not installed. Otherwise writes the
/// DOT source to `opts.filename` (default `Digraph.gv`), renders it in
/// `opts.fmt` and returns the graph.
pub fn draw_net(
    config: &GenomeConfig,
    genome: &Genome,
    opts: &NetDrawOptions,
    cfg: &VizConfig,
) -> Result<Option<Digraph>> {
    if !check_graphviz(&cfg.graphviz) {
        return Ok(None);
    }

    let graph = build_net_graph(config, genome, opts);
    let filename = opts
        .filename
        .clone()
        .unwrap_or_else(|| PathBuf::from("Digraph.gv"));
    let rendered = graph.render(&filename, &cfg.graphviz.dot_path)?;
    if opts.view {
        viewer::open(&rendered, &cfg.viewer)?;
    }
    Ok(Some(graph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::{ConnectionGene, NodeGene};

    fn xor_like() -> (GenomeConfig, Genome) {
        let config = GenomeConfig::with_counts(2, 1);
        let mut genome = Genome::new(1);
        for k in [0, 1, 2, 3] {
            genome.add_node(NodeGene::new(k));
        }
        genome.add_connection(ConnectionGene::new(-1, 1, 2.5, true));
        genome.add_connection(ConnectionGene::new(-2, 1, -1.0, true));
        genome.add_connection(ConnectionGene::new(1, 0, 0.5, true));
        genome.add_connection(ConnectionGene::new(-2, 2, 1.0, true));
        genome.add_connection(ConnectionGene::new(2, 0, -3.0, false));
        genome.add_connection(ConnectionGene::new(3, 2, 1.0, true));
        (config, genome)
    }

    #[test]
    fn styles_nodes_by_role() {
        let (config, genome) = xor_like();
        let mut opts = NetDrawOptions::default();
        opts.node_names.insert(-1, "A".to_string());
        opts.node_colors.insert(1, "yellow".to_string());
        let g = build_net_graph(&config, &genome, &opts);

        assert_eq!(g.node_attr("A", "shape"), Some("box"));
        assert_eq!(g.node_attr("A", "fillcolor"), Some("lightgray"));
        assert_eq!(g.node_attr("-2", "fillcolor"), Some("lightgray"));
        assert_eq!(g.node_attr("0", "fillcolor"), Some("lightblue"));
        assert_eq!(g.node_attr("0", "shape"), None);
        assert_eq!(g.node_attr("1", "fillcolor"), Some("yellow"));
        assert_eq!(g.node_attr("3", "fillcolor"), Some("white"));
        // Output 0 is declared once, not again as a hidden node.
        assert_eq!(g.nodes().filter(|(n, _)| *n == "0").count(), 1);
    }

    #[test]
    fn edge_style_tracks_weight_and_enabled() {
        let (config, genome) = xor_like();
        let g = build_net_graph(&config, &genome, &NetDrawOptions::default());

        assert_eq!(g.edge_attr("-1", "1", "color"), Some("green"));
        assert_eq!(g.edge_attr("-1", "1", "penwidth"), Some("0.6"));
        assert_eq!(g.edge_attr("-2", "1", "color"), Some("red"));
        assert_eq!(g.edge_attr("2", "0", "style"), Some("dotted"));
        assert_eq!(g.edge_attr("1", "0", "style"), Some("solid"));
    }

    #[test]
    fn hiding_disabled_drops_their_edges() {
        let (config, genome) = xor_like();
        let opts = NetDrawOptions {
            show_disabled: false,
            ..NetDrawOptions::default()
        };
        let g = build_net_graph(&config, &genome, &opts);
        assert_eq!(g.edge_attr("2", "0", "style"), None);
        assert_eq!(g.edges().count(), 5);
    }

    #[test]
    fn prune_keeps_only_nodes_feeding_outputs() {
        let (config, genome) = xor_like();
        let opts = NetDrawOptions {
            show_disabled: false,
            prune_unused: true,
            ..NetDrawOptions::default()
        };
        let g = build_net_graph(&config, &genome, &opts);
        let names: Vec<&str> = g.nodes().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["-1", "-2", "0", "1"]);
        // -2 -> 2 and 3 -> 2 touch a pruned node.
        assert_eq!(g.edges().count(), 3);
    }

    #[test]
    fn prune_with_disabled_reaches_through_them() {
        let (config, genome) = xor_like();
        let opts = NetDrawOptions {
            prune_unused: true,
            ..NetDrawOptions::default()
        };
        let g = build_net_graph(&config, &genome, &opts);
        let names: Vec<&str> = g.nodes().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["-1", "-2", "0", "1", "2", "3"]);
    }

    #[test]
    fn missing_dot_soft_fails() {
        let (config, genome) = xor_like();
        let cfg = VizConfig {
            graphviz: GraphvizConfig {
                dot_path: "/nonexistent/neatviz/dot".to_string(),
            },
            ..VizConfig::default()
        };
        let out = std::env::temp_dir().join("neatviz_missing_dot.gv");
        let _ = std::fs::remove_file(&out);
        let opts = NetDrawOptions {
            filename: Some(out.clone()),
            ..NetDrawOptions::default()
        };
        let res = draw_net(&config, &genome, &opts, &cfg).expect("no error");
        assert!(res.is_none());
        assert!(!out.exists());
    }
}
