//! Windy Chinese Postman, Win's heuristic (§4.6): average the two directional costs
//! to pick the augmentation pattern (which pairs get matched, which shortest paths get
//! duplicated), then realize it on the real graph so each traversal lands on its true
//! cost, and finally resolve direction by keeping whichever of the circuit's two
//! walking directions is cheaper under the true costs.

use crate::algo::{matching, shortest_paths};
use crate::error::SolveError;
use crate::graph::VertexId;
use crate::problem::Problem;
use crate::route::Route;
use crate::solvers::{common, SolverConfig};

pub fn solve(problem: &Problem, config: &SolverConfig) -> Result<Route, SolveError> {
	if let Some(trivial) = common::trivial_if_unrequired(&problem.graph, problem.depot) {
		return Ok(trivial);
	}
	common::check_required_reachable(&problem.graph, problem.depot, false)?;
	config.cancel.check()?;

	let mut g = problem.graph.clone();
	let averaged = common::cost_projection(&problem.graph, |f, r| (f + r) / 2);
	let apsp = shortest_paths::all_pairs_shortest_paths(&averaged, false);

	let odd: Vec<VertexId> = g.vertex_ids().filter(|&v| !g.is_orphan(v) && g.degree(v) % 2 == 1).collect();
	config.cancel.check()?;
	let pairs = matching::min_cost_perfect_matching(&odd, |a, b| apsp.dist(a, b), config.matching);
	for (a, b) in pairs {
		config.cancel.check()?;
		// Path is chosen under averaged cost; duplicating onto `g` reads each hop's
		// true forward/reverse cost straight off the original link.
		common::duplicate_shortest_path(&mut g, &apsp, a, b);
	}

	let route = common::extract_route(&g, problem.depot, false)?;
	Ok(common::cheaper_direction(&g, route))
}
