use std::sync::RwLock;

use approx::assert_relative_eq;
use resistor_net::{
    equivalent_resistance, netlist, solver::conductance_matrix, total_resistance, NetworkError,
    Network, NodalSolver, SolverConfig,
};

fn sample_network() -> Network {
    let mut net = Network::new(9).unwrap();
    net.connect(0, 1, 2.0).unwrap();
    net.connect(1, 2, 6.0).unwrap();
    net.connect(2, 3, 2.0).unwrap();
    net.connect(3, 4, 10.0).unwrap();
    net.connect(3, 7, 20.0).unwrap();
    net.connect(3, 8, 20.0).unwrap();
    net.connect(4, 5, 10.0).unwrap();
    net.connect(4, 6, 20.0).unwrap();
    net.connect(4, 7, 20.0).unwrap();
    net.connect(5, 6, 10.0).unwrap();
    net.connect(6, 7, 10.0).unwrap();
    net.connect(7, 8, 10.0).unwrap();
    net
}

/// Unit cube of 1 Ohm resistors; vertex bits are the xyz coordinates.
fn resistor_cube() -> Network {
    let mut net = Network::new(8).unwrap();
    for v in 0..8usize {
        for bit in [1, 2, 4] {
            if v & bit == 0 {
                net.connect(v, v | bit, 1.0).unwrap();
            }
        }
    }
    net
}

#[test]
fn sample_network_regression() {
    let net = sample_network();
    assert_relative_eq!(
        equivalent_resistance(&net, 0, 8).unwrap(),
        20.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        equivalent_resistance(&net, 8, 0).unwrap(),
        20.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(total_resistance(&net).unwrap(), 20.0, max_relative = 1e-9);
}

#[test]
fn wheatstone_bridge() {
    let net = Network::from_edges(
        4,
        [(0, 1, 1.0), (0, 2, 2.0), (1, 3, 3.0), (2, 3, 4.0), (1, 2, 5.0)],
    )
    .unwrap();
    assert_relative_eq!(
        equivalent_resistance(&net, 0, 3).unwrap(),
        170.0 / 71.0,
        max_relative = 1e-9
    );
}

#[test]
fn balanced_bridge_carries_no_current() {
    // R1/R2 == R3/R4, so the bridge resistor sees no voltage
    let net = Network::from_edges(
        4,
        [(0, 1, 100.0), (1, 3, 200.0), (0, 2, 50.0), (2, 3, 100.0), (1, 2, 1.0)],
    )
    .unwrap();
    let solver = NodalSolver::new(&net).unwrap();

    // Two 300 and 150 Ohm legs in parallel
    assert_relative_eq!(
        solver.equivalent_resistance(0, 3).unwrap(),
        100.0,
        max_relative = 1e-9
    );
    let currents = solver.branch_currents(0, 3).unwrap();
    assert!(currents[4].abs() < 1e-9);
}

#[test]
fn cube_of_unit_resistors() {
    let net = resistor_cube();
    let solver = NodalSolver::new(&net).unwrap();

    assert_relative_eq!(
        solver.equivalent_resistance(0, 7).unwrap(),
        5.0 / 6.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        solver.equivalent_resistance(0, 1).unwrap(),
        7.0 / 12.0,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        solver.equivalent_resistance(0, 3).unwrap(),
        3.0 / 4.0,
        max_relative = 1e-9
    );
}

#[test]
fn wide_resistance_ratios() {
    let series = Network::from_edges(3, [(0, 1, 1e-3), (1, 2, 1e6)]).unwrap();
    assert_relative_eq!(
        equivalent_resistance(&series, 0, 2).unwrap(),
        1e6 + 1e-3,
        max_relative = 1e-12
    );

    let parallel = Network::from_edges(2, [(0, 1, 1.0), (0, 1, 1e9)]).unwrap();
    assert_relative_eq!(
        equivalent_resistance(&parallel, 0, 1).unwrap(),
        1e9 / (1e9 + 1.0),
        max_relative = 1e-12
    );

    // 1000:1 ladder: each rung 1k, each rail segment 1 Ohm
    let mut ladder = Network::new(11).unwrap();
    for k in 1..11 {
        ladder.connect(k - 1, k, 1.0).unwrap();
        ladder.connect(k, 0, 1000.0).unwrap();
    }
    let r = equivalent_resistance(&ladder, 0, 10).unwrap();
    // Exact value 10165793718003365560136018001000 / 1055496719006004820680153019001
    assert_relative_eq!(r, 9.631288790340173, max_relative = 1e-12);
    assert_relative_eq!(
        r,
        equivalent_resistance(&ladder, 10, 0).unwrap(),
        max_relative = 1e-12
    );
}

#[test]
fn disconnected_terminals_are_unreachable() {
    let net = Network::from_edges(5, [(0, 1, 1.0), (1, 2, 1.0), (3, 4, 1.0)]).unwrap();
    for (a, b) in [(0, 3), (4, 2), (1, 4)] {
        assert!(matches!(
            equivalent_resistance(&net, a, b),
            Err(NetworkError::Unreachable { .. })
        ));
    }
    assert_relative_eq!(equivalent_resistance(&net, 0, 2).unwrap(), 2.0, max_relative = 1e-9);
}

#[test]
fn degenerate_query_convention() {
    let net = sample_network();
    for node in 0..9 {
        assert_eq!(equivalent_resistance(&net, node, node).unwrap(), 0.0);
    }

    let solver =
        NodalSolver::with_config(&net, SolverConfig::new().with_strict_terminals(true)).unwrap();
    assert!(matches!(
        solver.equivalent_resistance(3, 3),
        Err(NetworkError::DegenerateQuery { node: 3 })
    ));
}

#[test]
fn failed_connect_leaves_network_unchanged() {
    let mut net = sample_network();
    let edges = net.edge_count();
    let matrix = conductance_matrix(&net);

    assert!(matches!(net.connect(4, 4, 10.0), Err(NetworkError::SelfLoop { .. })));
    assert!(matches!(
        net.connect(0, 1, 0.0),
        Err(NetworkError::InvalidResistance { .. })
    ));
    assert!(matches!(
        net.connect(0, 1, -10.0),
        Err(NetworkError::InvalidResistance { .. })
    ));
    assert!(matches!(
        net.connect(0, 99, 10.0),
        Err(NetworkError::InvalidNode { node: 99, .. })
    ));

    assert_eq!(net.edge_count(), edges);
    assert_eq!(conductance_matrix(&net), matrix);
}

#[test]
fn network_reused_across_queries_and_mutations() {
    let mut net = Network::from_edges(3, [(0, 1, 10.0), (1, 2, 10.0)]).unwrap();
    assert_relative_eq!(equivalent_resistance(&net, 0, 2).unwrap(), 20.0, max_relative = 1e-9);

    // Adding a parallel path changes later answers
    net.connect(0, 2, 20.0).unwrap();
    assert_relative_eq!(equivalent_resistance(&net, 0, 2).unwrap(), 10.0, max_relative = 1e-9);
}

#[test]
fn concurrent_queries_share_one_network() {
    let net = RwLock::new(sample_network());
    let expected: Vec<f64> = {
        let guard = net.read().unwrap();
        let solver = NodalSolver::new(&guard).unwrap();
        let values = (0..9)
            .map(|sink| solver.equivalent_resistance(0, sink).unwrap())
            .collect();
        values
    };
    assert_relative_eq!(expected[5], 21.9921875, max_relative = 1e-9);

    std::thread::scope(|s| {
        for sink in 1..9 {
            let net = &net;
            let expected = expected[sink];
            s.spawn(move || {
                let guard = net.read().unwrap();
                let r = equivalent_resistance(&guard, 0, sink).unwrap();
                assert_relative_eq!(r, expected, max_relative = 1e-12);
            });
        }
    });

    net.write().unwrap().connect(0, 8, 20.0).unwrap();
    let guard = net.read().unwrap();
    assert_relative_eq!(
        equivalent_resistance(&guard, 0, 8).unwrap(),
        10.0,
        max_relative = 1e-9
    );
}

#[test]
fn netlist_round_trip() {
    let input = "\
# Wheatstone bridge
.measure 0 3

R1 0 1 1k
R2 0 2 2k
R3 1 3 3k
R4 2 3 4k
R5 1 2 5k
";
    let ast = netlist::parse(input).unwrap();
    let net = Network::from_netlist(&ast).unwrap();
    assert_eq!(net.node_count(), 4);
    assert_eq!(net.edge_count(), 5);

    let m = ast.measure.unwrap();
    assert_relative_eq!(
        equivalent_resistance(&net, m.source, m.sink).unwrap(),
        170_000.0 / 71.0,
        max_relative = 1e-9
    );
}

#[test]
fn netlist_network_errors_surface() {
    let ast = netlist::parse(".nodes 2\nR1 0 0 10").unwrap();
    assert!(matches!(
        Network::from_netlist(&ast),
        Err(NetworkError::SelfLoop { node: 0 })
    ));

    let ast = netlist::parse(".nodes 2\nR1 0 2 10").unwrap();
    assert!(matches!(
        Network::from_netlist(&ast),
        Err(NetworkError::InvalidNode { node: 2, node_count: 2 })
    ));

    let ast = netlist::parse("R1 0 1 0").unwrap();
    assert!(matches!(
        Network::from_netlist(&ast),
        Err(NetworkError::InvalidResistance { .. })
    ));

    assert!(matches!(
        netlist::parse("0 18446744073709551615 1"),
        Err(NetworkError::ParseError { line: 1, .. })
    ));
    assert!(matches!(
        netlist::parse(".nodes 4000000000000\n0 1 10"),
        Err(NetworkError::ParseError { line: 1, .. })
    ));

    let ast = netlist::parse("# empty\n").unwrap();
    assert!(matches!(
        Network::from_netlist(&ast),
        Err(NetworkError::InvalidConfiguration { node_count: 0 })
    ));
}
