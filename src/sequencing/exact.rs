//! Exact stop sequencing for one cluster.
//!
//! # Algorithm
//!
//! Exhaustive search over every visiting order of the stops, starting at the
//! depot and without returning to it. Leg costs are plain shortest-path costs
//! on the road graph, computed once per call into a [`CostMatrix`]. Orders
//! are enumerated lexicographically by input position; a candidate replaces
//! the incumbent only if strictly cheaper, so the earliest optimum wins.
//!
//! A partial order whose cost already reaches the incumbent is abandoned
//! together with every order sharing its prefix: with non-negative weights
//! none of them can become strictly cheaper.
//!
//! # Complexity
//!
//! O(m! · m) for m stops in the worst case, plus m + 1 Dijkstra runs. Meant
//! for the handful of stops a single courier carries.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::distance::CostMatrix;
use crate::error::SequenceError;
use crate::graph::RoadGraph;
use crate::models::Completion;

use super::{Permutations, SequencerConfig};

/// How often the wall clock is consulted, in evaluated orderings.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// The chosen visiting order for a set of stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopSequence {
    /// Depot followed by every distinct stop once.
    pub stops: Vec<String>,
    /// Sum of shortest-path costs between consecutive stops.
    pub cost: f64,
    /// Whether the search finished.
    pub completion: Completion,
}

/// Exact TSP-path solver over road-graph shortest paths.
///
/// # Examples
///
/// ```
/// use courier_routing::graph::RoadGraph;
/// use courier_routing::sequencing::RouteSequencer;
///
/// let graph = RoadGraph::build([("D", "A", 1.0), ("D", "B", 2.0), ("A", "B", 1.0)]).unwrap();
/// let seq = RouteSequencer::default().sequence("D", &["B", "A"], &graph).unwrap();
/// assert_eq!(seq.stops, vec!["D", "A", "B"]);
/// assert_eq!(seq.cost, 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteSequencer {
    config: SequencerConfig,
}

impl RouteSequencer {
    /// Creates a sequencer with the given search bounds.
    pub fn new(config: SequencerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SequencerConfig {
        &self.config
    }

    /// Finds the cheapest order to visit `stops` starting from `depot`.
    ///
    /// Stops equal to the depot are dropped and repeated stops are visited
    /// once. No stops yields `[depot]` at cost 0.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::NoFeasibleRoute`] if some stop cannot be reached
    ///   from the depot (every ordering then has an infinite leg).
    /// - [`SequenceError::BudgetExhausted`] if the budget ran out before any
    ///   feasible ordering was completed.
    pub fn sequence<S: AsRef<str>>(
        &self,
        depot: &str,
        stops: &[S],
        graph: &RoadGraph,
    ) -> Result<StopSequence, SequenceError> {
        let targets = distinct_stops(depot, stops);
        if targets.is_empty() {
            return Ok(StopSequence {
                stops: vec![depot.to_string()],
                cost: 0.0,
                completion: Completion::Exhaustive,
            });
        }

        let mut points = Vec::with_capacity(targets.len() + 1);
        points.push(depot);
        points.extend(targets.iter().copied());
        let matrix = CostMatrix::from_graph(graph, &points);

        let unreachable: Vec<String> = targets
            .iter()
            .enumerate()
            .filter(|&(i, _)| !matrix.is_reachable(0, i + 1))
            .map(|(_, stop)| stop.to_string())
            .collect();
        if !unreachable.is_empty() {
            warn!(depot, ?unreachable, "stops unreachable from depot");
            return Err(SequenceError::NoFeasibleRoute {
                depot: depot.to_string(),
                unreachable,
            });
        }

        let search = self.search(&matrix);
        let Some((order, cost)) = search.best else {
            return Err(match search.completion {
                Completion::BudgetExhausted { evaluated } => {
                    warn!(depot, evaluated, "sequencing budget exhausted before a feasible route");
                    SequenceError::BudgetExhausted { evaluated }
                }
                Completion::Exhaustive => SequenceError::NoFeasibleRoute {
                    depot: depot.to_string(),
                    unreachable: Vec::new(),
                },
            });
        };

        if let Completion::BudgetExhausted { evaluated } = search.completion {
            warn!(depot, evaluated, cost, "sequencing budget exhausted; keeping best so far");
        }

        let mut sequence = Vec::with_capacity(order.len() + 1);
        sequence.push(depot.to_string());
        sequence.extend(order.iter().map(|&i| targets[i].to_string()));
        debug!(depot, stops = targets.len(), cost, "stops sequenced");

        Ok(StopSequence {
            stops: sequence,
            cost,
            completion: search.completion,
        })
    }

    /// Searches orderings of matrix points `1..size`, starting from point 0.
    fn search(&self, matrix: &CostMatrix) -> Search {
        let m = matrix.size() - 1;
        let started = Instant::now();
        let mut permutations = Permutations::new(m);
        let mut best: Option<(Vec<usize>, f64)> = None;
        let mut best_cost = f64::INFINITY;
        let mut evaluated = 0u64;

        loop {
            let Some(order) = permutations.next_ordering() else {
                break;
            };
            // an ordering remains, so stopping here leaves the search incomplete
            if self.budget_spent(evaluated, started) {
                return Search {
                    best,
                    completion: Completion::BudgetExhausted { evaluated },
                };
            }
            evaluated += 1;

            let mut cost = 0.0;
            let mut prev = 0;
            let mut abandoned_at = None;
            for (position, &stop) in order.iter().enumerate() {
                cost += matrix.get(prev, stop + 1);
                if cost >= best_cost {
                    abandoned_at = Some(position + 1);
                    break;
                }
                prev = stop + 1;
            }

            match abandoned_at {
                Some(prefix) => permutations.skip_prefix(prefix),
                None => {
                    best_cost = cost;
                    best = Some((order.to_vec(), cost));
                }
            }
        }

        Search {
            best,
            completion: Completion::Exhaustive,
        }
    }

    fn budget_spent(&self, evaluated: u64, started: Instant) -> bool {
        if let Some(max) = self.config.max_permutations {
            if evaluated >= max {
                return true;
            }
        }
        if let Some(limit) = self.config.time_limit {
            let check_clock = evaluated > 0 && evaluated % CLOCK_CHECK_INTERVAL == 0;
            if check_clock && started.elapsed() >= limit {
                return true;
            }
        }
        false
    }
}

struct Search {
    best: Option<(Vec<usize>, f64)>,
    completion: Completion,
}

/// Sequences with no search bounds.
pub fn sequence_stops<S: AsRef<str>>(
    depot: &str,
    stops: &[S],
    graph: &RoadGraph,
) -> Result<StopSequence, SequenceError> {
    RouteSequencer::default().sequence(depot, stops, graph)
}

/// Stops in first-seen order, without the depot and without repeats.
fn distinct_stops<'a, S: AsRef<str>>(depot: &str, stops: &'a [S]) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::with_capacity(stops.len());
    for stop in stops {
        let stop = stop.as_ref();
        if stop != depot && !seen.contains(&stop) {
            seen.push(stop);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn triangle() -> RoadGraph {
        RoadGraph::build([("D", "A", 1.0), ("D", "B", 2.0), ("A", "B", 1.0)]).expect("valid graph")
    }

    /// Brute-force reference: every permutation, costs from plain shortest paths.
    fn brute_force(depot: &str, stops: &[&str], graph: &RoadGraph) -> f64 {
        let mut best = f64::INFINITY;
        for order in Permutations::new(stops.len()) {
            let mut cost = 0.0;
            let mut prev = depot;
            for &i in &order {
                cost += crate::graph::shortest_path(graph, prev, stops[i])
                    .map(|p| p.cost)
                    .unwrap_or(f64::INFINITY);
                prev = stops[i];
            }
            best = best.min(cost);
        }
        best
    }

    #[test]
    fn test_prefers_cheaper_order() {
        let seq = sequence_stops("D", &["A", "B"], &triangle()).expect("feasible");
        assert_eq!(seq.stops, vec!["D", "A", "B"]);
        assert_eq!(seq.cost, 2.0);
        assert!(seq.completion.is_exhaustive());
    }

    #[test]
    fn test_empty_stops() {
        let seq = sequence_stops::<&str>("D", &[], &triangle()).expect("trivial");
        assert_eq!(seq.stops, vec!["D"]);
        assert_eq!(seq.cost, 0.0);
    }

    #[test]
    fn test_depot_and_duplicates_normalised() {
        let seq = sequence_stops("D", &["B", "D", "A", "B"], &triangle()).expect("feasible");
        assert_eq!(seq.stops, vec!["D", "A", "B"]);
    }

    #[test]
    fn test_equal_cost_keeps_first_enumerated() {
        // square: D at a corner, A and B both at distance 1, C opposite
        let g = RoadGraph::build([
            ("D", "A", 1.0),
            ("D", "B", 1.0),
            ("A", "C", 1.0),
            ("B", "C", 1.0),
        ])
        .expect("valid graph");
        let seq = sequence_stops("D", &["B", "A"], &g).expect("feasible");
        // [D,B,A] and [D,A,B] both cost 3; B is first in input order
        assert_eq!(seq.stops, vec!["D", "B", "A"]);
        assert_eq!(seq.cost, 3.0);
    }

    #[test]
    fn test_unreachable_stop() {
        let g = RoadGraph::build([("D", "A", 1.0), ("X", "Y", 1.0)]).expect("valid graph");
        let err = sequence_stops("D", &["A", "Y"], &g).unwrap_err();
        assert_eq!(
            err,
            SequenceError::NoFeasibleRoute {
                depot: "D".into(),
                unreachable: vec!["Y".into()],
            }
        );
    }

    #[test]
    fn test_stop_not_in_graph() {
        let err = sequence_stops("D", &["ghost"], &triangle()).unwrap_err();
        assert!(matches!(err, SequenceError::NoFeasibleRoute { .. }));
    }

    #[test]
    fn test_matches_brute_force() {
        let g = RoadGraph::build([
            ("D", "A", 4.0),
            ("D", "B", 2.5),
            ("A", "B", 1.0),
            ("B", "C", 3.0),
            ("C", "E", 1.5),
            ("A", "E", 6.0),
            ("D", "F", 7.0),
            ("F", "E", 0.5),
            ("C", "F", 2.0),
        ])
        .expect("valid graph");
        let stops = ["A", "C", "E", "F", "B"];
        let seq = sequence_stops("D", &stops, &g).expect("feasible");
        assert!((seq.cost - brute_force("D", &stops, &g)).abs() < 1e-9);
        assert_eq!(seq.stops.len(), stops.len() + 1);
        let mut visited: Vec<&str> = seq.stops[1..].iter().map(String::as_str).collect();
        visited.sort_unstable();
        assert_eq!(visited, vec!["A", "B", "C", "E", "F"]);
    }

    #[test]
    fn test_budget_keeps_best_so_far() {
        let g = RoadGraph::build([("D", "A", 1.0), ("A", "B", 1.0), ("B", "C", 1.0)])
            .expect("valid graph");
        let sequencer = RouteSequencer::new(SequencerConfig::default().with_max_permutations(1));
        let seq = sequencer.sequence("D", &["C", "B", "A"], &g).expect("one ordering evaluated");
        assert_eq!(seq.completion, Completion::BudgetExhausted { evaluated: 1 });
        // the identity ordering D,C,B,A
        assert_eq!(seq.stops, vec!["D", "C", "B", "A"]);
        assert_eq!(seq.cost, 5.0);
    }

    #[test]
    fn test_zero_budget() {
        let sequencer = RouteSequencer::new(SequencerConfig::default().with_max_permutations(0));
        let err = sequencer.sequence("D", &["A"], &triangle()).unwrap_err();
        assert_eq!(err, SequenceError::BudgetExhausted { evaluated: 0 });
    }

    #[test]
    fn test_budget_equal_to_search_space_is_exhaustive() {
        let sequencer = RouteSequencer::new(SequencerConfig::default().with_max_permutations(2));
        let seq = sequencer.sequence("D", &["A", "B"], &triangle()).expect("feasible");
        assert!(seq.completion.is_exhaustive());
        assert_eq!(seq.stops, vec!["D", "A", "B"]);

        let sequencer = RouteSequencer::new(SequencerConfig::default().with_max_permutations(1));
        let seq = sequencer.sequence("D", &["A"], &triangle()).expect("feasible");
        assert_eq!(seq.completion, Completion::Exhaustive);
    }

    #[test]
    fn test_time_limit_keeps_best_so_far() {
        // complete graph with unit weights: every ordering ties, so pruning
        // only cuts at the last stop and every ordering is visited
        let names = ["D", "S1", "S2", "S3", "S4", "S5", "S6", "S7"];
        let mut edges = Vec::new();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                edges.push((*a, *b, 1.0));
            }
        }
        let g = RoadGraph::build(edges).expect("valid graph");
        let stops = &names[1..];

        let sequencer =
            RouteSequencer::new(SequencerConfig::default().with_time_limit(Duration::ZERO));
        let seq = sequencer.sequence("D", stops, &g).expect("best so far is kept");

        assert_eq!(
            seq.completion,
            Completion::BudgetExhausted {
                evaluated: CLOCK_CHECK_INTERVAL
            }
        );
        assert_eq!(seq.stops[0], "D");
        let mut visited: Vec<&str> = seq.stops[1..].iter().map(String::as_str).collect();
        visited.sort_unstable();
        assert_eq!(visited, stops);
        assert_eq!(seq.cost, 7.0);
    }

    #[test]
    fn test_generous_budget_is_exhaustive() {
        let sequencer = RouteSequencer::new(
            SequencerConfig::default()
                .with_max_permutations(1_000)
                .with_time_limit(Duration::from_secs(60)),
        );
        let seq = sequencer.sequence("D", &["B", "A"], &triangle()).expect("feasible");
        assert!(seq.completion.is_exhaustive());
        assert_eq!(seq.cost, 2.0);
    }
}
