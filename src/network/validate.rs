//! Network validation and connectivity analysis.

use crate::error::{NetworkError, Result};

use super::{Network, NodeId};

/// Check that `node` lies in `[0, node_count)`.
pub fn check_node(node: NodeId, node_count: usize) -> Result<()> {
    if node.0 >= node_count {
        return Err(NetworkError::InvalidNode {
            node: node.0,
            node_count,
        });
    }
    Ok(())
}

/// Check that a resistance is finite and strictly positive.
pub fn check_resistance(resistance: f64) -> Result<()> {
    // NaN fails the comparison as well
    if !(resistance.is_finite() && resistance > 0.0) {
        return Err(NetworkError::InvalidResistance { resistance });
    }
    Ok(())
}

/// Connected components of a network.
///
/// Components are numbered in order of their lowest node, so component 0
/// always contains node 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Components {
    labels: Vec<usize>,
    representatives: Vec<NodeId>,
}

impl Components {
    /// Component index of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the labeled network.
    pub fn component_of(&self, node: NodeId) -> usize {
        self.labels[node.0]
    }

    /// Number of components (isolated nodes count as their own component).
    pub fn count(&self) -> usize {
        self.representatives.len()
    }

    /// Check whether a conductive path joins `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics if either node is outside the labeled network.
    pub fn same_component(&self, a: NodeId, b: NodeId) -> bool {
        self.labels[a.0] == self.labels[b.0]
    }

    /// Lowest-index node of each component, indexed by component.
    pub fn representatives(&self) -> &[NodeId] {
        &self.representatives
    }

    /// Check whether `node` is the representative of its component.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the labeled network.
    pub fn is_representative(&self, node: NodeId) -> bool {
        self.representatives[self.labels[node.0]] == node
    }
}

/// Label every node of `network` with its connected component.
pub fn connected_components(network: &Network) -> Components {
    let n = network.node_count();
    let mut labels = vec![usize::MAX; n];
    let mut representatives = Vec::new();
    let mut stack = Vec::new();

    for start in 0..n {
        if labels[start] != usize::MAX {
            continue;
        }
        let label = representatives.len();
        representatives.push(NodeId(start));
        labels[start] = label;
        stack.push(start);

        while let Some(node) = stack.pop() {
            for neighbor in network.neighbors(node) {
                let next = neighbor.node.0;
                if labels[next] == usize::MAX {
                    labels[next] = label;
                    stack.push(next);
                }
            }
        }
    }

    Components {
        labels,
        representatives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_resistance() {
        assert!(check_resistance(1e-6).is_ok());
        assert!(check_resistance(1e9).is_ok());
        assert!(check_resistance(0.0).is_err());
        assert!(check_resistance(-0.0).is_err());
        assert!(check_resistance(f64::NAN).is_err());
    }

    #[test]
    fn test_components_of_split_network() {
        // 0-1-2 and 3-4, node 5 isolated
        let net = Network::from_edges(6, [(0, 1, 1.0), (2, 1, 1.0), (4, 3, 1.0)]).unwrap();
        let comps = connected_components(&net);

        assert_eq!(comps.count(), 3);
        assert!(comps.same_component(NodeId(0), NodeId(2)));
        assert!(comps.same_component(NodeId(3), NodeId(4)));
        assert!(!comps.same_component(NodeId(2), NodeId(3)));
        assert!(!comps.same_component(NodeId(4), NodeId(5)));
        assert_eq!(
            comps.representatives(),
            &[NodeId(0), NodeId(3), NodeId(5)]
        );
        assert!(comps.is_representative(NodeId(3)));
        assert!(!comps.is_representative(NodeId(4)));
    }

    #[test]
    fn test_fully_connected() {
        let net = Network::from_edges(3, [(0, 1, 1.0), (1, 2, 1.0), (2, 0, 1.0)]).unwrap();
        let comps = connected_components(&net);
        assert_eq!(comps.count(), 1);
        assert_eq!(comps.component_of(NodeId(2)), 0);
    }

    #[test]
    #[should_panic]
    fn test_component_of_out_of_range_panics() {
        let net = Network::from_edges(2, [(0, 1, 1.0)]).unwrap();
        connected_components(&net).component_of(NodeId(2));
    }
}
