//! Resistor network graph structure.

use super::types::{EdgeId, Neighbor, NodeId, Resistor};
use super::validate::{check_node, check_resistance};
use crate::error::{NetworkError, Result};
use crate::netlist::NetlistAst;

/// A fixed-size resistor network.
///
/// Nodes are created up front and never added or removed. Edges are
/// appended with [`Network::connect`]; parallel edges between the same pair
/// of nodes are kept as separate resistors and combine as parallel
/// conductances when solved.
///
/// `connect` takes `&mut self` while every query borrows `&self`, so a
/// network cannot be mutated during a solve. To share one network between
/// threads, wrap it in a `RwLock`: write access for `connect`, read access
/// for resistance queries.
#[derive(Debug, Clone)]
pub struct Network {
    /// Number of nodes
    node_count: usize,
    /// All resistors in insertion order (indexed by `EdgeId`)
    resistors: Vec<Resistor>,
    /// Per-node adjacency list
    adjacency: Vec<Vec<Neighbor>>,
}

impl Network {
    /// Create a network with `node_count` unconnected nodes.
    ///
    /// A resistance measurement needs two distinct terminals, so fewer than
    /// two nodes is rejected. A count too large to allocate adjacency for is
    /// rejected the same way.
    pub fn new(node_count: usize) -> Result<Self> {
        if node_count < 2 {
            return Err(NetworkError::InvalidConfiguration { node_count });
        }

        let mut adjacency = Vec::new();
        adjacency
            .try_reserve_exact(node_count)
            .map_err(|_| NetworkError::InvalidConfiguration { node_count })?;
        adjacency.resize_with(node_count, Vec::new);

        Ok(Self {
            node_count,
            resistors: Vec::new(),
            adjacency,
        })
    }

    /// Build a network from a list of `(a, b, resistance)` triples.
    ///
    /// Fails on the first invalid edge.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut network = Self::new(node_count)?;
        for (a, b, resistance) in edges {
            network.connect(a, b, resistance)?;
        }
        Ok(network)
    }

    /// Build a network from a parsed netlist.
    ///
    /// Without a `.nodes` directive the node count is one past the highest
    /// node referenced by any resistor.
    pub fn from_netlist(ast: &NetlistAst) -> Result<Self> {
        let node_count = match ast.node_count {
            Some(count) => count,
            None => match ast.resistors.iter().max_by_key(|r| r.nodes[0].max(r.nodes[1])) {
                Some(def) => {
                    let highest = def.nodes[0].max(def.nodes[1]);
                    highest.checked_add(1).ok_or_else(|| {
                        NetworkError::parse(def.line, format!("node index {} is too large", highest))
                    })?
                }
                None => 0,
            },
        };

        let mut network = Self::new(node_count)?;
        for def in &ast.resistors {
            network.connect(def.nodes[0], def.nodes[1], def.value)?;
        }
        Ok(network)
    }

    /// Connect nodes `a` and `b` with a resistor of `resistance` Ohms.
    ///
    /// Returns the new resistor's id. On failure the network is unchanged.
    pub fn connect(&mut self, a: usize, b: usize, resistance: f64) -> Result<EdgeId> {
        let a = NodeId(a);
        let b = NodeId(b);

        check_node(a, self.node_count)?;
        check_node(b, self.node_count)?;
        if a == b {
            return Err(NetworkError::SelfLoop { node: a.0 });
        }
        check_resistance(resistance)?;

        let id = EdgeId(self.resistors.len());
        let resistor = Resistor {
            id,
            nodes: [a, b],
            resistance,
        };
        let conductance = resistor.conductance();

        self.resistors.push(resistor);
        self.adjacency[a.0].push(Neighbor {
            node: b,
            conductance,
            edge: id,
        });
        self.adjacency[b.0].push(Neighbor {
            node: a,
            conductance,
            edge: id,
        });

        Ok(id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of resistors (parallel resistors count separately).
    pub fn edge_count(&self) -> usize {
        self.resistors.len()
    }

    /// Check whether `node` lies in this network.
    pub fn contains(&self, node: usize) -> bool {
        node < self.node_count
    }

    /// Iterate over all resistors in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Resistor> + '_ {
        self.resistors.iter()
    }

    /// Get a resistor by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Resistor> {
        self.resistors.get(id.0)
    }

    /// Adjacency entries of `node` (one per incident resistor).
    ///
    /// Returns an empty slice for nodes outside the network.
    pub fn neighbors(&self, node: usize) -> &[Neighbor] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of resistors incident to `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }

    /// Total conductance directly between `a` and `b`, summing parallel
    /// resistors. Zero when no resistor joins them.
    pub fn conductance_between(&self, a: usize, b: usize) -> f64 {
        let b = NodeId(b);
        self.neighbors(a)
            .iter()
            .filter(|n| n.node == b)
            .map(|n| n.conductance)
            .sum()
    }
}
