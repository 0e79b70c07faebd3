use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Node identifier. Inputs are negative, outputs start at 0.
pub type NodeKey = i64;
pub type ConnectionKey = (NodeKey, NodeKey);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGene {
    pub key: NodeKey,
    #[serde(default)]
    pub bias: f64,
    #[serde(default = "NodeGene::default_activation")]
    pub activation: String,
}

impl NodeGene {
    fn default_activation() -> String {
        "sigmoid".to_string()
    }

    pub fn new(key: NodeKey) -> Self {
        Self {
            key,
            bias: 0.0,
            activation: Self::default_activation(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionGene {
    pub key: ConnectionKey,
    pub weight: f64,
    #[serde(default = "ConnectionGene::default_enabled")]
    pub enabled: bool,
}

impl ConnectionGene {
    fn default_enabled() -> bool {
        true
    }

    pub fn new(from: NodeKey, to: NodeKey, weight: f64, enabled: bool) -> Self {
        Self {
            key: (from, to),
            weight,
            enabled,
        }
    }
}

/// A network topology: hidden/output nodes plus weighted connections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    #[serde(default)]
    pub key: u64,
    #[serde(default, with = "node_list")]
    pub nodes: BTreeMap<NodeKey, NodeGene>,
    #[serde(default, with = "connection_list")]
    pub connections: BTreeMap<ConnectionKey, ConnectionGene>,
}

impl Genome {
    pub fn new(key: u64) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    pub fn add_node(&mut self, node: NodeGene) {
        self.nodes.insert(node.key, node);
    }

    pub fn add_connection(&mut self, conn: ConnectionGene) {
        self.connections.insert(conn.key, conn);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenomeConfig {
    pub input_keys: Vec<NodeKey>,
    pub output_keys: Vec<NodeKey>,
}

impl GenomeConfig {
    /// Keys `-1..=-num_inputs` for inputs and `0..num_outputs` for outputs.
    pub fn with_counts(num_inputs: usize, num_outputs: usize) -> Self {
        Self {
            input_keys: (1..=num_inputs as NodeKey).map(|k| -k).collect(),
            output_keys: (0..num_outputs as NodeKey).collect(),
        }
    }
}

/// Genome plus the configuration and display hints needed to draw it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetFile {
    pub config: GenomeConfig,
    pub genome: Genome,
    #[serde(default)]
    pub node_names: BTreeMap<NodeKey, String>,
    #[serde(default)]
    pub node_colors: BTreeMap<NodeKey, String>,
}

impl NetFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

// Tuple keys cannot be JSON object keys, so both maps travel as lists.
mod node_list {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        nodes: &BTreeMap<NodeKey, NodeGene>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(nodes.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<BTreeMap<NodeKey, NodeGene>, D::Error> {
        let list = Vec::<NodeGene>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|n| (n.key, n)).collect())
    }
}

mod connection_list {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        conns: &BTreeMap<ConnectionKey, ConnectionGene>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(conns.values())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<BTreeMap<ConnectionKey, ConnectionGene>, D::Error> {
        let list = Vec::<ConnectionGene>::deserialize(deserializer)?;
        Ok(list.into_iter().map(|c| (c.key, c)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_with_counts_uses_negative_inputs() {
        let cfg = GenomeConfig::with_counts(2, 1);
        assert_eq!(cfg.input_keys, vec![-1, -2]);
        assert_eq!(cfg.output_keys, vec![0]);
    }

    #[test]
    fn net_file_parses_connection_lists() {
        let json = r#"{
            "config": {"input_keys": [-1, -2], "output_keys": [0]},
            "genome": {
                "nodes": [{"key": 0}, {"key": 5, "bias": 0.3}],
                "connections": [
                    {"key": [-1, 5], "weight": 1.5},
                    {"key": [5, 0], "weight": -0.7, "enabled": false}
                ]
            },
            "node_names": {"-1": "A", "0": "out"}
        }"#;
        let net: NetFile = serde_json::from_str(json).unwrap();
        assert_eq!(net.genome.nodes.len(), 2);
        assert_eq!(net.genome.nodes[&0].activation, "sigmoid");
        assert!(net.genome.connections[&(-1, 5)].enabled);
        assert!(!net.genome.connections[&(5, 0)].enabled);
        assert_eq!(net.node_names[&-1], "A");
    }
}
