use courier_routing::graph::RoadGraph;
use courier_routing::models::{Completion, CoordinateTable, Location, Order};
use courier_routing::pathfinding::shortest_path_astar;
use courier_routing::planner::{
    ClusterOutcome, DeliveryPlan, Planner, PlannerConfig, SegmentOutcome,
};
use courier_routing::sequencing::SequencerConfig;
use courier_routing::SequenceError;

fn triangle() -> RoadGraph {
    RoadGraph::build([("D", "A", 1.0), ("D", "B", 2.0), ("A", "B", 1.0)]).expect("valid graph")
}

#[test]
fn scenario_two_stops_on_a_triangle() {
    let locations = [
        Location::new("D", 0.0, 0.0),
        Location::new("A", 1.0, 0.0),
        Location::new("B", 1.0, 1.0),
    ];
    let orders = [Order::new("P1", "B"), Order::new("P2", "A")];

    let plan = Planner::new(PlannerConfig::new("D", 1))
        .plan(&triangle(), &locations, &orders)
        .expect("valid input");

    assert_eq!(plan.clusters.len(), 1);
    let routed = plan.routes().next().expect("single cluster is routed");
    assert_eq!(routed.route.stops(), ["D", "A", "B"]);
    assert_eq!(routed.route.cost(), 2.0);
    assert!(routed.route.completion().is_exhaustive());

    let legs: Vec<(&str, &str)> = routed
        .segments
        .iter()
        .filter_map(SegmentOutcome::segment)
        .map(|s| (s.origin.as_str(), s.destination.as_str()))
        .collect();
    assert_eq!(legs, vec![("D", "A"), ("A", "B")]);
    assert_eq!(routed.verified_cost(), routed.route.cost());
}

#[test]
fn scenario_missing_target_coordinates_degrades() {
    let graph = RoadGraph::build([
        ("S", "M", 2.0),
        ("M", "T", 2.0),
        ("S", "N", 1.0),
        ("N", "T", 4.0),
    ])
    .expect("valid graph");
    let coordinates: CoordinateTable = [
        Location::new("S", 0.0, 0.0),
        Location::new("M", 1.0, 1.0),
        Location::new("N", 1.0, -1.0),
    ]
    .into_iter()
    .collect();

    let found = shortest_path_astar(&graph, "S", "T", &coordinates).expect("connected");
    assert_eq!(found.path.nodes, vec!["S", "M", "T"]);
    assert_eq!(found.path.cost, 4.0);
    assert!(found.is_degraded());
    assert!(found.missing_coordinates.contains(&"T".to_string()));
}

#[test]
fn scenario_degradation_reaches_the_plan() {
    // the delivery point has no coordinates in the table used for A*, but
    // the order's location is still known for clustering
    let graph = RoadGraph::build([("D", "A", 1.0), ("A", "X", 1.0)]).expect("valid graph");
    let locations = [
        Location::new("D", 0.0, 0.0),
        Location::new("X", 2.0, 0.0),
    ];
    let plan = Planner::new(PlannerConfig::new("D", 1))
        .plan(&graph, &locations, &[Order::new("o1", "X")])
        .expect("valid input");

    let routed = plan.routes().next().expect("routed");
    assert_eq!(routed.route.stops(), ["D", "X"]);
    assert_eq!(routed.verified_cost(), 2.0);
    assert_eq!(plan.degraded_nodes(), vec!["A"]);
}

#[test]
fn scenario_disconnected_cluster_does_not_block_others() {
    let graph = RoadGraph::build([
        ("D", "A", 1.0),
        ("D", "B", 1.0),
        ("X", "Y", 1.0),
    ])
    .expect("valid graph");
    let locations = [
        Location::new("D", 0.0, 0.0),
        Location::new("A", 1.0, 0.0),
        Location::new("B", 0.0, 1.0),
        Location::new("X", 100.0, 100.0),
        Location::new("Y", 101.0, 100.0),
    ];
    let orders = [
        Order::new("o1", "A"),
        Order::new("o2", "X"),
        Order::new("o3", "B"),
        Order::new("o4", "Y"),
    ];

    let plan = Planner::new(PlannerConfig::new("D", 2))
        .plan(&graph, &locations, &orders)
        .expect("valid input");

    assert_eq!(plan.clusters.len(), 2);
    assert_eq!(plan.assignment.cluster_of("o1"), plan.assignment.cluster_of("o3"));
    assert_eq!(plan.assignment.cluster_of("o2"), plan.assignment.cluster_of("o4"));

    let routed: Vec<_> = plan.routes().collect();
    assert_eq!(routed.len(), 1);
    assert_eq!(routed[0].route.stops(), ["D", "A", "B"]);
    assert_eq!(routed[0].route.cost(), 3.0);

    let failures: Vec<_> = plan.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(
        failures[0].1,
        &SequenceError::NoFeasibleRoute {
            depot: "D".into(),
            unreachable: vec!["X".into(), "Y".into()],
        }
    );
}

#[test]
fn same_input_gives_same_plan() {
    let locations: Vec<Location> = (0..8u32)
        .map(|i| Location::new(format!("L{i}"), f64::from(i % 4), f64::from(i / 4)))
        .chain(std::iter::once(Location::new("D", 0.0, 0.0)))
        .collect();
    let mut edges = vec![("D".to_string(), "L0".to_string(), 0.5)];
    for i in 0..7u32 {
        edges.push((format!("L{i}"), format!("L{}", i + 1), 1.0 + f64::from(i) * 0.1));
    }
    let graph = RoadGraph::build(edges).expect("valid graph");
    let orders: Vec<Order> = (0..8)
        .map(|i| Order::new(format!("o{i}"), format!("L{i}")))
        .collect();

    let planner = Planner::new(PlannerConfig::new("D", 3));
    let first = planner.plan(&graph, &locations, &orders).expect("valid input");
    let second = planner.plan(&graph, &locations, &orders).expect("valid input");
    assert_eq!(first, second);
    assert_eq!(first.assignment.len(), 8);
    assert!(first.failures().next().is_none());
}

#[test]
fn budgeted_sequencing_is_flagged() {
    let graph = RoadGraph::build([("D", "A", 1.0), ("A", "B", 1.0), ("B", "C", 1.0)])
        .expect("valid graph");
    let locations = [
        Location::new("D", 0.0, 0.0),
        Location::new("A", 1.0, 0.0),
        Location::new("B", 2.0, 0.0),
        Location::new("C", 3.0, 0.0),
    ];
    let orders = [Order::new("o1", "C"), Order::new("o2", "B"), Order::new("o3", "A")];
    let config = PlannerConfig::new("D", 1)
        .with_sequencing(SequencerConfig::default().with_max_permutations(2));

    let plan = Planner::new(config)
        .plan(&graph, &locations, &orders)
        .expect("valid input");
    match &plan.clusters[0].outcome {
        ClusterOutcome::Routed(routed) => {
            assert_eq!(routed.route.completion(), Completion::BudgetExhausted { evaluated: 2 });
            assert_eq!(routed.route.stops().len(), 4);
        }
        other => panic!("expected a route, got {other:?}"),
    }
}

#[test]
fn plan_serialises_as_json() {
    let locations = [
        Location::new("D", 0.0, 0.0),
        Location::new("A", 1.0, 0.0),
        Location::new("B", 1.0, 1.0),
    ];
    let plan = Planner::new(PlannerConfig::new("D", 1))
        .plan(&triangle(), &locations, &[Order::new("P1", "A"), Order::new("P2", "B")])
        .expect("valid input");

    let json = serde_json::to_string(&plan).expect("serialisable");
    let back: DeliveryPlan = serde_json::from_str(&json).expect("deserialisable");
    assert_eq!(back, plan);
}

#[test]
fn config_loads_with_defaults() {
    let config: PlannerConfig =
        serde_json::from_str(r#"{ "depot": "Depot", "courier_count": 4 }"#).expect("valid json");
    assert_eq!(config, PlannerConfig::new("Depot", 4));
    assert_eq!(config.clustering.seed, 42);
    assert!(config.parallel);
}
