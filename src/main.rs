//! resnet - equivalent resistance calculator
//!
//! Reads a resistor netlist and prints the resistance between two nodes.
//!
//! # Usage
//!
//! ```bash
//! resnet bridge.net --from 0 --to 3
//! RUST_LOG=debug resnet            # built-in 9-node sample network
//! ```

use std::path::PathBuf;

use clap::Parser;
use resistor_net::{
    error::Result,
    netlist::{self, NetlistAst},
    Network, NodalSolver, SolverConfig,
};

/// Resistor network equivalent resistance calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file (defaults to the built-in sample network)
    #[arg(value_name = "NETLIST")]
    netlist: Option<PathBuf>,

    /// Source terminal (defaults to `.measure`, else node 0)
    #[arg(short, long)]
    from: Option<usize>,

    /// Sink terminal (defaults to `.measure`, else the last node)
    #[arg(short, long)]
    to: Option<usize>,

    /// Treat identical terminals as an error instead of 0 Ohm
    #[arg(long)]
    strict: bool,

    /// Also print node potentials for a 1 A test current
    #[arg(long)]
    potentials: bool,
}

/// The sample network: 9 nodes, measured from node 0 to node 8.
const SAMPLE_NETLIST: &str = "\
.nodes 9
.measure 0 8
R1  0 1 2
R2  1 2 6
R3  2 3 2
R4  3 4 10
R5  3 7 20
R6  3 8 20
R7  4 5 10
R8  4 6 20
R9  4 7 20
R10 5 6 10
R11 6 7 10
R12 7 8 10
";

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Parse the netlist
    let ast: NetlistAst = match &args.netlist {
        Some(path) => netlist::parse_file(path)?,
        None => netlist::parse(SAMPLE_NETLIST)?,
    };

    // Build the network
    let network = Network::from_netlist(&ast)?;

    // Resolve terminals
    let measure = ast.measure.map(|m| (m.source, m.sink));
    let source = args.from.or(measure.map(|m| m.0)).unwrap_or(0);
    let sink = args
        .to
        .or(measure.map(|m| m.1))
        .unwrap_or(network.node_count() - 1);

    // Solve
    let config = SolverConfig::new().with_strict_terminals(args.strict);
    let solver = NodalSolver::with_config(&network, config)?;
    let resistance = solver.equivalent_resistance(source, sink)?;

    println!("Total Resistance: {} Ohm", resistance);

    if args.potentials {
        for (node, v) in solver.potentials(source, sink)?.iter().enumerate() {
            println!("  V({}) = {:.6} V", node, v);
        }
    }

    Ok(())
}
