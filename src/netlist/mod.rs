//! Netlist reader for resistor networks.
//!
//! A line-oriented, human-editable text format listing the resistors of a
//! network and, optionally, which two nodes to measure between.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | directive | resistor | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = ".nodes" count | ".measure" node node
//! resistor    = [name] node node value
//!
//! name        = ('R' | 'r') { letter | digit | '_' }
//! node        = digit+
//! value       = number [unit_suffix]
//!
//! number      = ['-'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! ```
//!
//! Nodes are dense indices starting at 0. Without `.nodes` the network has
//! one node more than the highest index referenced. Node counts and indices
//! are limited to [`MAX_NODES`].
//!
//! # Example
//!
//! ```text
//! # Wheatstone bridge
//! .measure 0 3
//!
//! R1 0 1 1k
//! R2 0 2 2k
//! R3 1 3 3k
//! R4 2 3 4k
//! R5 1 2 5k
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Largest network a netlist may describe. The solver stores a dense
/// `n x n` conductance matrix, so anything bigger cannot be solved anyway.
pub const MAX_NODES: usize = 1 << 16;

/// Parse a netlist string into an AST.
pub fn parse(input: &str) -> Result<NetlistAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<NetlistAst> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::NetworkError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content)
}
