//! Nodal analysis solver for equivalent resistance queries.

use log::debug;
use nalgebra::DVector;

use crate::error::{NetworkError, Result};
use crate::network::{check_node, connected_components, Components, Network, NodeId};

use super::conductance::{assemble_grounded, RowMap};
use super::linear::{FactorKind, Factorization};
use super::DEFAULT_PIVOT_TOLERANCE;

/// Configuration for the solver.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Reject `source == sink` with `DegenerateQuery` instead of returning 0.
    pub strict_terminals: bool,
    /// Relative pivot magnitude below which the LU fallback reports a
    /// singular matrix.
    pub pivot_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strict_terminals: false,
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl SolverConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether identical terminals are an error.
    pub fn with_strict_terminals(mut self, strict: bool) -> Self {
        self.strict_terminals = strict;
        self
    }

    /// Set the LU pivot tolerance.
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }
}

/// Equivalent resistance solver bound to one network.
///
/// Construction assembles the conductance matrix with one reference node
/// grounded per connected component and factors it once. Every query then
/// injects a unit current at the source, draws it out at the sink, and
/// reads the resulting potential difference.
///
/// The solver borrows the network, so the network cannot be modified while
/// a solver for it is alive.
#[derive(Debug)]
pub struct NodalSolver<'a> {
    /// The network being solved
    network: &'a Network,
    /// Connected components (one grounded node each)
    components: Components,
    /// Node to reduced-system row mapping
    rows: RowMap,
    /// Factored grounded conductance matrix
    factorization: Factorization,
    config: SolverConfig,
}

impl<'a> NodalSolver<'a> {
    /// Create a solver with default configuration.
    pub fn new(network: &'a Network) -> Result<Self> {
        Self::with_config(network, SolverConfig::default())
    }

    /// Create a solver with custom configuration.
    pub fn with_config(network: &'a Network, config: SolverConfig) -> Result<Self> {
        let components = connected_components(network);
        let rows = RowMap::grounding(&components, network.node_count());
        let matrix = assemble_grounded(network, &rows);

        debug!(
            "assembled {}x{} grounded conductance matrix ({} nodes, {} resistors, {} component(s))",
            rows.size(),
            rows.size(),
            network.node_count(),
            network.edge_count(),
            components.count()
        );

        let factorization = Factorization::factor(matrix.into_inner(), config.pivot_tolerance)?;

        Ok(Self {
            network,
            components,
            rows,
            factorization,
            config,
        })
    }

    /// The network this solver answers for.
    pub fn network(&self) -> &Network {
        self.network
    }

    /// Connected components of the network.
    pub fn components(&self) -> &Components {
        &self.components
    }

    /// Decomposition used for the grounded system.
    pub fn factor_kind(&self) -> FactorKind {
        self.factorization.kind()
    }

    /// Get the configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Equivalent resistance in Ohms between `source` and `sink`.
    ///
    /// Identical terminals give `0.0`, or `DegenerateQuery` in strict mode.
    /// Terminals with no conductive path between them give `Unreachable`.
    pub fn equivalent_resistance(&self, source: usize, sink: usize) -> Result<f64> {
        let (source, sink) = match self.terminals(NodeId(source), NodeId(sink))? {
            Some(pair) => pair,
            None => return Ok(0.0),
        };

        let x = self.solve_unit_injection(source, sink)?;
        let resistance = self.potential(&x, source) - self.potential(&x, sink);

        if !resistance.is_finite() || resistance < 0.0 {
            return Err(NetworkError::numeric(format!(
                "resistance between {} and {} came out as {}",
                source, sink, resistance
            )));
        }
        Ok(resistance)
    }

    /// Node potentials (volts) for a 1 A current from `source` to `sink`.
    ///
    /// Potentials are referenced to the sink, so `V[sink] = 0` and
    /// `V[source]` equals the equivalent resistance. Nodes outside the
    /// terminals' component carry no current and report `0.0`.
    pub fn potentials(&self, source: usize, sink: usize) -> Result<Vec<f64>> {
        let n = self.network.node_count();
        let (source, sink) = match self.terminals(NodeId(source), NodeId(sink))? {
            Some(pair) => pair,
            None => return Ok(vec![0.0; n]),
        };

        let x = self.solve_unit_injection(source, sink)?;
        let reference = self.potential(&x, sink);
        let component = self.components.component_of(sink);

        Ok((0..n)
            .map(NodeId)
            .map(|node| {
                if self.components.component_of(node) == component {
                    self.potential(&x, node) - reference
                } else {
                    0.0
                }
            })
            .collect())
    }

    /// Current (amps) through each resistor for a 1 A current from `source`
    /// to `sink`, indexed by `EdgeId`.
    ///
    /// Positive values flow from `nodes[0]` to `nodes[1]` of the resistor.
    pub fn branch_currents(&self, source: usize, sink: usize) -> Result<Vec<f64>> {
        let potentials = self.potentials(source, sink)?;
        Ok(self
            .network
            .edges()
            .map(|r| (potentials[r.nodes[0].0] - potentials[r.nodes[1].0]) * r.conductance())
            .collect())
    }

    /// Validate a terminal pair. `None` means a degenerate (identical) pair
    /// that is answered without solving.
    fn terminals(&self, source: NodeId, sink: NodeId) -> Result<Option<(NodeId, NodeId)>> {
        let node_count = self.network.node_count();
        check_node(source, node_count)?;
        check_node(sink, node_count)?;

        if source == sink {
            if self.config.strict_terminals {
                return Err(NetworkError::DegenerateQuery { node: source.0 });
            }
            return Ok(None);
        }

        if !self.components.same_component(source, sink) {
            return Err(NetworkError::Unreachable {
                from: source.0,
                to: sink.0,
            });
        }

        Ok(Some((source, sink)))
    }

    /// Solve the grounded system for +1 A at `source` and -1 A at `sink`.
    fn solve_unit_injection(&self, source: NodeId, sink: NodeId) -> Result<DVector<f64>> {
        let mut current = DVector::zeros(self.rows.size());
        // A grounded terminal has no equation; its potential is pinned to 0
        if let Some(i) = self.rows.row(source) {
            current[i] += 1.0;
        }
        if let Some(j) = self.rows.row(sink) {
            current[j] -= 1.0;
        }
        self.factorization.solve(&current)
    }

    /// Potential of `node` in a reduced solution vector.
    fn potential(&self, x: &DVector<f64>, node: NodeId) -> f64 {
        match self.rows.row(node) {
            Some(i) => x[i],
            None => 0.0, // Ground
        }
    }
}

/// Equivalent resistance in Ohms between `source` and `sink` of `network`.
///
/// One-shot form of [`NodalSolver::equivalent_resistance`] with default
/// configuration. Build a [`NodalSolver`] directly to answer several
/// queries on the same network without refactoring.
pub fn equivalent_resistance(network: &Network, source: usize, sink: usize) -> Result<f64> {
    NodalSolver::new(network)?.equivalent_resistance(source, sink)
}

/// Resistance between the first and last node of `network`.
pub fn total_resistance(network: &Network) -> Result<f64> {
    equivalent_resistance(network, 0, network.node_count() - 1)
}
