//! Undirected Chinese Postman, exact (§4.2): odd-degree matching, shortest-path
//! duplication, Hierholzer.

use crate::algo::matching;
use crate::algo::shortest_paths;
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

	let g = augment(&problem.graph, config)?;
	common::extract_route(&g, problem.depot, false)
}

/// Odd-degree matching and shortest-path duplication, without extraction. Shared with
/// Win's windy heuristic, which runs this on an averaged-cost copy to find the
/// augmentation pattern and then re-extracts under true costs.
pub fn augment(g: &Graph, config: &SolverConfig) -> Result<Graph, SolveError> {
	let mut g = g.clone();
	let apsp = shortest_paths::all_pairs_shortest_paths(&g, false);

	let odd: Vec<VertexId> = g.vertex_ids().filter(|&v| !g.is_orphan(v) && g.degree(v) % 2 == 1).collect();
	config.cancel.check()?;
	let pairs = matching::min_cost_perfect_matching(&odd, |a, b| apsp.dist(a, b), config.matching);

	for (a, b) in pairs {
		config.cancel.check()?;
		common::duplicate_shortest_path(&mut g, &apsp, a, b);
	}
	Ok(g)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::graph::GraphKind;

	fn square() -> Graph {
		let mut g = Graph::new(GraphKind::Undirected);
		for _ in 0..4 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(0), v(1), 5, 5, true, false, None);
		g.add_link(v(1), v(2), 3, 3, true, false, None);
		g.add_link(v(2), v(3), 7, 7, true, false, None);
		g.add_link(v(3), v(0), 2, 2, true, false, None);
		g
	}

	#[test]
	fn square_is_already_eulerian() {
		let g = square();
		let problem = Problem::new(g, VertexId(0));
		let route = solve(&problem, &SolverConfig::default()).unwrap();
		assert_eq!(route.total_cost().unwrap(), 17);
		assert_eq!(route.deadhead_count(), 0);
		route.validate(&problem.graph).unwrap();
	}

	#[test]
	fn odd_degree_vertices_get_matched_and_duplicated() {
		// A path 0-1-2-3 (all required): vertices 0 and 3 have odd degree, the
		// cheapest way to rebalance them is to duplicate the whole path.
		let mut g = Graph::new(GraphKind::Undirected);
		for _ in 0..4 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(0), v(1), 1, 1, true, false, None);
		g.add_link(v(1), v(2), 1, 1, true, false, None);
		g.add_link(v(2), v(3), 1, 1, true, false, None);
		let problem = Problem::new(g, v(0));
		let route = solve(&problem, &SolverConfig::default()).unwrap();
		assert_eq!(route.total_cost().unwrap(), 6);
		assert_eq!(route.deadhead_count(), 3);
		route.validate(&problem.graph).unwrap();
	}
}
