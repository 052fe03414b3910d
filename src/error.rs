//! Error types for the resistor network solver.
//!
//! This module provides a unified error type [`NetworkError`] that covers
//! all error conditions that can occur while building a network, reading a
//! netlist, and computing equivalent resistances.

use thiserror::Error;

/// Result type alias using [`NetworkError`].
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Unified error type for all network operations.
#[derive(Error, Debug)]
pub enum NetworkError {
    // ============ Network Construction Errors ============
    /// Network with fewer than two nodes, or too many to allocate
    #[error("Invalid network configuration: {node_count} node(s) - need at least 2 that fit in memory")]
    InvalidConfiguration { node_count: usize },

    /// Node index outside `[0, node_count)`
    #[error("Node {node} is out of range for a network with {node_count} nodes")]
    InvalidNode { node: usize, node_count: usize },

    /// Edge connecting a node to itself
    #[error("Self-loop on node {node} - a resistor must connect two distinct nodes")]
    SelfLoop { node: usize },

    /// Zero, negative or non-finite resistance
    #[error("Invalid resistance {resistance} Ohm - must be finite and greater than zero")]
    InvalidResistance { resistance: f64 },

    // ============ Query Errors ============
    /// Source and sink are the same node (strict mode only)
    #[error("Degenerate query - source and sink are both node {node}")]
    DegenerateQuery { node: usize },

    /// No conductive path between the terminals
    #[error("Node {to} is unreachable from node {from} - resistance is infinite")]
    Unreachable { from: usize, to: usize },

    /// Linear solve failed on a well-formed network
    #[error("Numeric instability: {message}")]
    NumericInstability { message: String },

    // ============ Netlist Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    // ============ I/O Errors ============
    /// Error reading a netlist file
    #[cfg(feature = "cli")]
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl NetworkError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a numeric instability error
    pub fn numeric(message: impl Into<String>) -> Self {
        Self::NumericInstability {
            message: message.into(),
        }
    }
}
