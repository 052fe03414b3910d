//! Nodal analysis solver.
//!
//! This module computes equivalent resistances from Kirchhoff's Current Law.
//!
//! ## Nodal Analysis
//!
//! For a network of conductances the node potentials `v` satisfy
//!
//! ```text
//! G v = i
//! ```
//!
//! where:
//! - G is the conductance matrix (`G[k][k]` = total conductance at node k,
//!   `G[j][k]` = minus the conductance joining j and k)
//! - i is the vector of currents injected into each node
//!
//! Every row of G sums to zero, so G is singular: only potential differences
//! are defined. Fixing one reference node per connected component at 0 V and
//! removing its row and column leaves a symmetric positive definite system.
//!
//! Injecting +1 A at the source and -1 A at the sink, the equivalent
//! resistance is `v[source] - v[sink]`.

mod conductance;
mod linear;
mod nodal;

pub use conductance::{assemble_grounded, conductance_matrix, ConductanceMatrix, RowMap};
pub use linear::{FactorKind, Factorization};
pub use nodal::{equivalent_resistance, total_resistance, NodalSolver, SolverConfig};

/// Default relative pivot tolerance for the LU fallback.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-14;
