//! Abstract Syntax Tree types for netlists.

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetlistAst {
    /// Node count from `.nodes`, if given
    pub node_count: Option<usize>,
    /// Terminals from `.measure`, if given
    pub measure: Option<Measure>,
    /// All resistor definitions in file order
    pub resistors: Vec<ResistorDef>,
}

impl NetlistAst {
    /// Create a new empty netlist AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest node index referenced by any resistor.
    pub fn highest_node(&self) -> Option<usize> {
        self.resistors
            .iter()
            .flat_map(|r| r.nodes)
            .max()
    }
}

/// A `.measure <source> <sink>` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measure {
    pub source: usize,
    pub sink: usize,
    /// Source line number for error reporting
    pub line: usize,
}

/// A resistor definition from the netlist.
#[derive(Debug, Clone, PartialEq)]
pub struct ResistorDef {
    /// Optional name (`R1`, `Rload`, ...)
    pub name: Option<String>,
    /// Connected node indices
    pub nodes: [usize; 2],
    /// Resistance in Ohms
    pub value: f64,
    /// Source line number for error reporting
    pub line: usize,
}
