//! Core types for network representation.

use std::fmt;

/// Identifier of a node in a network, dense in `[0, node_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The raw index of this node.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// Identifier of a resistor, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// A resistive connection between two distinct nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    pub id: EdgeId,
    pub nodes: [NodeId; 2],
    /// Resistance in Ohms, finite and strictly positive
    pub resistance: f64,
}

impl Resistor {
    /// Get the conductance (1/R) in Siemens.
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }
}

/// One adjacency entry: a neighbor reached through a specific resistor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub node: NodeId,
    pub conductance: f64,
    pub edge: EdgeId,
}
