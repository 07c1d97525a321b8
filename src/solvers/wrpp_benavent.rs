//! Windy Rural Postman, Benavent's H1 heuristic (§4.7): connect the required
//! subgraph's components with a minimum spanning tree of shortest windy distances,
//! then run the same odd-degree matching and extraction as Win's heuristic.

use std::collections::HashMap;

use crate::algo::{connectivity, matching, mst, shortest_paths};
use crate::error::SolveError;
use crate::graph::{Graph, VertexId};
use crate::problem::Problem;
use crate::route::Route;
use crate::solvers::{common, SolverConfig};

pub fn solve(problem: &Problem, config: &SolverConfig) -> Result<Route, SolveError> {
	if let Some(trivial) = common::trivial_if_unrequired(&problem.graph, problem.depot) {
		return Ok(trivial);
	}
	common::check_required_reachable(&problem.graph, problem.depot, false)?;
	config.cancel.check()?;

	// The working graph starts as required links only: RPP is free to skip any
	// non-required link that isn't needed for connectivity or parity, so the
	// circuit must not be forced to cover the whole original graph the way CPP
	// does. Non-required links come back, one at a time, only where step 2/3
	// actually select them as connectors or parity repairs.
	let mut g = problem.graph.clone();
	let deadheads: Vec<_> = problem.graph.links().filter(|l| !l.required).map(|l| l.id).collect();
	for id in deadheads {
		g.remove_link(id);
	}

	// "Cheapest windy distance between two vertices" uses the cheaper of the two
	// directions as a symmetric stand-in, per §4.7 step 2/3.
	let symmetric = common::cost_projection(&problem.graph, i64::min);
	let apsp = shortest_paths::all_pairs_shortest_paths(&symmetric, false);

	connect_required_components(&mut g, &problem.graph, &apsp, config)?;
	config.cancel.check()?;
	repair_parity(&mut g, &apsp, config)?;

	let route = common::extract_route(&g, problem.depot, false)?;
	Ok(common::cheaper_direction(&g, route))
}

/// Builds the subgraph induced by `R`'s own links only, finds its connected
/// components, and connects them with an MST over the cheapest inter-component
/// vertex pair, duplicating each chosen connector's shortest path into `g`.
fn connect_required_components(g: &mut Graph, original: &Graph, apsp: &shortest_paths::Apsp, config: &SolverConfig) -> Result<(), SolveError> {
	let mut required_only = Graph::new(original.kind);
	for _ in 0..original.node_count() {
		required_only.add_vertex();
	}
	for link in original.required_links() {
		required_only.add_link(link.p1, link.p2, link.forward_cost, link.reverse_cost, true, false, None);
	}
	let components: Vec<Vec<VertexId>> = connectivity::strongly_connected_components(&required_only, false, false)
		.into_iter()
		.map(|set| {
			let mut vs: Vec<VertexId> = set.into_iter().collect();
			vs.sort();
			vs
		})
		.collect();

	if components.len() <= 1 {
		return Ok(());
	}

	let mut weight: HashMap<(usize, usize), i64> = HashMap::new();
	let mut best_pair: HashMap<(usize, usize), (VertexId, VertexId)> = HashMap::new();
	for i in 0..components.len() {
		for j in (i + 1)..components.len() {
			let mut best = (shortest_paths::INF, VertexId(0), VertexId(0));
			for &a in &components[i] {
				for &b in &components[j] {
					let d = apsp.dist(a, b);
					if d < best.0 {
						best = (d, a, b);
					}
				}
			}
			weight.insert((i, j), best.0);
			best_pair.insert((i, j), (best.1, best.2));
		}
	}

	let nodes: Vec<usize> = (0..components.len()).collect();
	let tree = mst::minimum_spanning_tree_complete(&nodes, |a, b| weight[&(a.min(b), a.max(b))]);
	for (i, j) in tree {
		config.cancel.check()?;
		let (a, b) = best_pair[&(i.min(j), i.max(j))];
		common::duplicate_shortest_path(g, apsp, a, b);
	}
	Ok(())
}

/// UCPP-style parity repair over the (now connected) required-plus-connector
/// subgraph: matches odd-degree vertices under the undirected projection, using
/// the symmetric windy distance, and duplicates their shortest connecting paths.
fn repair_parity(g: &mut Graph, apsp: &shortest_paths::Apsp, config: &SolverConfig) -> Result<(), SolveError> {
	let odd: Vec<VertexId> = g.vertex_ids().filter(|&v| !g.is_orphan(v) && g.degree(v) % 2 == 1).collect();
	config.cancel.check()?;
	let pairs = matching::min_cost_perfect_matching(&odd, |a, b| apsp.dist(a, b), config.matching);
	for (a, b) in pairs {
		config.cancel.check()?;
		common::duplicate_shortest_path(g, apsp, a, b);
	}
	Ok(())
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::graph::GraphKind;

	fn hexagon() -> Graph {
		let mut g = Graph::new(GraphKind::Windy);
		for _ in 0..6 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		let required = [(0, 1), (2, 3), (4, 5)];
		for i in 0..6u32 {
			let (a, b) = (v(i), v((i + 1) % 6));
			let req = required.contains(&(i, (i + 1) % 6));
			g.add_link(a, b, 5, 7, req, false, None);
		}
		g
	}

	#[test]
	fn hexagon_subset_is_solved_and_valid() {
		// Hand-verified for this exact geometry: the three required edges form three
		// singleton components, an MST over the three equal-weight gap edges needs
		// only two connectors to join them, and the one remaining gap repairs parity
		// by itself — three deadheads total, cost 3*5 (required) + 3*5 (deadhead) = 30.
		let problem = Problem::new(hexagon(), VertexId(0));
		let route = solve(&problem, &SolverConfig::default()).unwrap();
		route.validate(&problem.graph).unwrap();
		assert_eq!(route.deadhead_count(), 3);
		assert_eq!(route.total_cost().unwrap(), 30);
	}

	#[test]
	fn fully_required_windy_rpp_matches_wcpp() {
		let mut g = Graph::new(GraphKind::Windy);
		for _ in 0..3 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(0), v(1), 4, 8, true, false, None);
		g.add_link(v(1), v(2), 5, 3, true, false, None);
		g.add_link(v(2), v(0), 6, 6, true, false, None);
		let problem = Problem::new(g, v(0));
		let route = solve(&problem, &SolverConfig::default()).unwrap();
		assert_eq!(route.total_cost().unwrap(), 15);
	}

	#[test]
	fn disconnected_required_link_is_infeasible() {
		let mut g = Graph::new(GraphKind::Windy);
		for _ in 0..3 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(1), v(2), 1, 1, true, false, None);
		let problem = Problem::new(g, v(0));
		assert!(matches!(solve(&problem, &SolverConfig::default()), Err(SolveError::InfeasibleInstance { .. })));
	}
}
