//! Conductance matrix assembly.

use nalgebra::DMatrix;

use crate::network::{Components, Network, NodeId};

/// Symmetric conductance matrix built by stamping resistors.
#[derive(Debug, Clone)]
pub struct ConductanceMatrix {
    /// Dense matrix storage
    matrix: DMatrix<f64>,
}

impl ConductanceMatrix {
    /// Create a zero matrix of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            matrix: DMatrix::zeros(size, size),
        }
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Clear the matrix to zero.
    pub fn clear(&mut self) {
        self.matrix.fill(0.0);
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.matrix[(row, col)]
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.matrix[(row, col)] += value;
    }

    /// Stamp a conductance between two rows.
    /// For a conductance G between nodes n1 and n2:
    ///   A[n1,n1] += G
    ///   A[n2,n2] += G
    ///   A[n1,n2] -= G
    ///   A[n2,n1] -= G
    /// A `None` row is a grounded node and contributes nothing.
    pub fn stamp_conductance(&mut self, n1: Option<usize>, n2: Option<usize>, g: f64) {
        if let Some(i) = n1 {
            self.add(i, i, g);
        }
        if let Some(j) = n2 {
            self.add(j, j, g);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
    }

    /// Largest absolute entry, used to scale singularity thresholds.
    pub fn max_abs(&self) -> f64 {
        self.matrix.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Consume into the underlying dense matrix.
    pub fn into_inner(self) -> DMatrix<f64> {
        self.matrix
    }

    /// Borrow the underlying dense matrix.
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }
}

/// Mapping from network nodes to rows of a grounded system.
///
/// Grounded (reference) nodes have no row; their potential is fixed at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowMap {
    rows: Vec<Option<usize>>,
    size: usize,
}

impl RowMap {
    /// Ground the representative of every component.
    pub fn grounding(components: &Components, node_count: usize) -> Self {
        let mut rows = Vec::with_capacity(node_count);
        let mut size = 0;
        for node in 0..node_count {
            if components.is_representative(NodeId(node)) {
                rows.push(None);
            } else {
                rows.push(Some(size));
                size += 1;
            }
        }
        Self { rows, size }
    }

    /// Row of `node`, or `None` if it is grounded.
    ///
    /// # Panics
    ///
    /// Panics if `node` is outside the network the map was built for.
    pub fn row(&self, node: NodeId) -> Option<usize> {
        self.rows[node.0]
    }

    /// Number of ungrounded nodes (dimension of the reduced system).
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Assemble the full `N x N` conductance matrix of a network.
///
/// Diagonal entries hold the total conductance incident to each node,
/// off-diagonal entries the negated conductance between two nodes with
/// parallel resistors summed. Every row sums to zero, so this matrix is
/// singular; it is exposed for inspection.
pub fn conductance_matrix(network: &Network) -> DMatrix<f64> {
    let mut matrix = ConductanceMatrix::new(network.node_count());
    for r in network.edges() {
        matrix.stamp_conductance(Some(r.nodes[0].0), Some(r.nodes[1].0), r.conductance());
    }
    matrix.into_inner()
}

/// Assemble the conductance matrix with grounded rows and columns removed.
pub fn assemble_grounded(network: &Network, rows: &RowMap) -> ConductanceMatrix {
    let mut matrix = ConductanceMatrix::new(rows.size());
    for r in network.edges() {
        matrix.stamp_conductance(rows.row(r.nodes[0]), rows.row(r.nodes[1]), r.conductance());
    }
    matrix
}
