//! Directed Chinese Postman, exact (§4.3): excess classification, successive
//! shortest augmenting paths over the transportation network, Hierholzer.

use crate::algo::shortest_paths;
use crate::error::SolveError;
use crate::graph::VertexId;
use crate::problem::Problem;
use crate::route::Route;
use crate::solvers::{common, SolverConfig};

pub fn solve(problem: &Problem, config: &SolverConfig) -> Result<Route, SolveError> {
	if let Some(trivial) = common::trivial_if_unrequired(&problem.graph, problem.depot) {
		return Ok(trivial);
	}
	common::check_required_reachable(&problem.graph, problem.depot, true)?;
	config.cancel.check()?;

	let mut g = problem.graph.clone();
	let apsp = shortest_paths::all_pairs_shortest_paths(&g, true);

	// P: out-in > 0 (too many arcs leaving, needs extra in-arcs). N: in-out > 0
	// (too many arcs arriving, needs extra out-arcs). Supply flows N -> P.
	let mut demand: Vec<(VertexId, i64)> = Vec::new();
	let mut supply: Vec<(VertexId, i64)> = Vec::new();
	for v in g.vertex_ids() {
		let (indeg, outdeg) = g.in_out_degree(v);
		let excess = outdeg as i64 - indeg as i64;
		if excess > 0 {
			demand.push((v, excess));
		} else if excess < 0 {
			supply.push((v, -excess));
		}
	}

	// Repeatedly saturate the globally cheapest remaining (supplier, demander) pair.
	// A simple successive-shortest-path loop, as permitted for instances this small.
	loop {
		config.cancel.check()?;
		let mut best: Option<(i64, usize, usize)> = None;
		for (si, &(s, sq)) in supply.iter().enumerate() {
			if sq == 0 {
				continue;
			}
			for (di, &(d, dq)) in demand.iter().enumerate() {
				if dq == 0 {
					continue;
				}
				let cost = apsp.dist(s, d);
				let candidate = (cost, si, di);
				if best.map_or(true, |b| candidate < b) {
					best = Some(candidate);
				}
			}
		}
		let Some((_, si, di)) = best else { break };
		let (s, _) = supply[si];
		let (d, _) = demand[di];
		common::duplicate_shortest_path_committed(&mut g, &apsp, s, d);
		supply[si].1 -= 1;
		demand[di].1 -= 1;
		if supply.iter().all(|&(_, q)| q == 0) {
			break;
		}
	}

	common::extract_route(&g, problem.depot, true)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::graph::{Graph, GraphKind};

	#[test]
	fn imbalanced_square_with_shortcut() {
		let mut g = Graph::new(GraphKind::Directed);
		for _ in 0..4 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(0), v(1), 5, 5, true, true, None);
		g.add_link(v(1), v(2), 3, 3, true, true, None);
		g.add_link(v(2), v(3), 7, 7, true, true, None);
		g.add_link(v(3), v(0), 2, 2, true, true, None);
		g.add_link(v(0), v(2), 4, 4, true, true, None);
		let problem = Problem::new(g, v(0));
		let route = solve(&problem, &SolverConfig::default()).unwrap();
		assert_eq!(route.total_cost().unwrap(), 30);
		route.validate(&problem.graph).unwrap();
	}

	#[test]
	fn already_balanced_directed_cycle_has_no_deadheads() {
		let mut g = Graph::new(GraphKind::Directed);
		for _ in 0..3 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(0), v(1), 1, 1, true, true, None);
		g.add_link(v(1), v(2), 1, 1, true, true, None);
		g.add_link(v(2), v(0), 1, 1, true, true, None);
		let problem = Problem::new(g, v(0));
		let route = solve(&problem, &SolverConfig::default()).unwrap();
		assert_eq!(route.total_cost().unwrap(), 3);
		assert_eq!(route.deadhead_count(), 0);
	}
}
