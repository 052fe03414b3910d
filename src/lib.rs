//! # Resistor Net
//!
//! Equivalent resistance of arbitrary resistor networks.
//!
//! This library provides:
//! - A fixed-size [`Network`] of nodes joined by resistors, validated on
//!   every mutation
//! - A nodal analysis solver that handles any topology (bridges, meshes,
//!   parallel resistors) instead of matching series/parallel patterns
//! - A small netlist format for describing networks in text
//!
//! ## Architecture
//!
//! - [`network`] - Network graph representation and validation
//! - [`solver`] - Conductance matrix assembly and linear solving
//! - [`netlist`] - Lexer and parser for the netlist format
//! - [`error`] - The unified error type
//!
//! ## Usage
//!
//! ```
//! use resistor_net::{equivalent_resistance, Network};
//!
//! let mut network = Network::new(3)?;
//! network.connect(0, 1, 100.0)?;
//! network.connect(1, 2, 220.0)?;
//! network.connect(0, 2, 320.0)?;
//!
//! let r = equivalent_resistance(&network, 0, 2)?;
//! assert!((r - 160.0).abs() < 1e-9);
//! # Ok::<(), resistor_net::NetworkError>(())
//! ```
//!
//! ## Method
//!
//! 1. Assemble the conductance matrix G from the resistors
//! 2. Ground one reference node per connected component
//! 3. Inject 1 A at the source and draw it out at the sink
//! 4. Solve G v = i with a Cholesky factorization
//! 5. The equivalent resistance is v[source] - v[sink]
//!
//! The library logs through the [`log`] facade and never prints on its own.

pub mod error;
pub mod netlist;
pub mod network;
pub mod solver;

// Re-export main types for convenience
pub use error::{NetworkError, Result};
pub use network::{EdgeId, Network, NodeId};
pub use solver::{equivalent_resistance, total_resistance, NodalSolver, SolverConfig};
