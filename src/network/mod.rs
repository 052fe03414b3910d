//! Resistor network representation and validation.
//!
//! This module provides the [`Network`] graph: a fixed set of nodes joined
//! by resistors, stored as an adjacency list keyed by node index. All
//! mutations are validated up front so a network always satisfies its
//! invariants (nodes in range, no self-loops, positive finite resistances).

mod graph;
mod types;
mod validate;

pub use graph::Network;
pub use types::*;
pub use validate::{check_node, check_resistance, connected_components, Components};
