use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::genome::{ConnectionGene, NodeKey};

/// Nodes that can influence at least one output.
///
/// Walks backwards from `outputs` over connections that are enabled, or over
/// every connection when `show_disabled` is set. The result always contains
/// the outputs themselves.
pub fn required_for_output<'a, I>(
    outputs: &BTreeSet<NodeKey>,
    connections: I,
    show_disabled: bool,
) -> BTreeSet<NodeKey>
where
    I: IntoIterator<Item = &'a ConnectionGene>,
{
    let mut incoming: BTreeMap<NodeKey, Vec<NodeKey>> = BTreeMap::new();
    for cg in connections {
        if cg.enabled || show_disabled {
            let (from, to) = cg.key;
            incoming.entry(to).or_default().push(from);
        }
    }

    let mut used = outputs.clone();
    let mut pending: VecDeque<NodeKey> = outputs.iter().copied().collect();
    while let Some(node) = pending.pop_front() {
        let Some(sources) = incoming.get(&node) else {
            continue;
        };
        for &src in sources {
            if used.insert(src) {
                pending.push_back(src);
            }
        }
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(from: NodeKey, to: NodeKey, enabled: bool) -> ConnectionGene {
        ConnectionGene::new(from, to, 1.0, enabled)
    }

    fn set(keys: &[NodeKey]) -> BTreeSet<NodeKey> {
        keys.iter().copied().collect()
    }

    #[test]
    fn follows_only_enabled_connections() {
        let conns = [
            conn(-1, 1, true),
            conn(1, 0, true),
            conn(-2, 2, true),
            conn(2, 0, false),
            conn(3, 4, true),
        ];
        let used = required_for_output(&set(&[0]), &conns, false);
        assert_eq!(used, set(&[-1, 0, 1]));
    }

    #[test]
    fn show_disabled_follows_everything() {
        let conns = [conn(-1, 1, true), conn(1, 0, true), conn(-2, 2, true), conn(2, 0, false)];
        let used = required_for_output(&set(&[0]), &conns, true);
        assert_eq!(used, set(&[-2, -1, 0, 1, 2]));
    }

    #[test]
    fn terminates_on_cycles() {
        let conns = [conn(1, 2, true), conn(2, 1, true), conn(2, 0, true), conn(0, 0, true)];
        let used = required_for_output(&set(&[0]), &conns, false);
        assert_eq!(used, set(&[0, 1, 2]));
    }

    #[test]
    fn outputs_survive_without_connections() {
        let used = required_for_output(&set(&[0, 1]), std::iter::empty(), false);
        assert_eq!(used, set(&[0, 1]));
    }

    #[test]
    fn forward_only_nodes_are_dropped() {
        // 0 feeds 5, but 5 never reaches an output.
        let conns = [conn(-1, 0, true), conn(0, 5, true), conn(5, 6, true)];
        let used = required_for_output(&set(&[0]), &conns, true);
        assert_eq!(used, set(&[-1, 0]));
    }
}
