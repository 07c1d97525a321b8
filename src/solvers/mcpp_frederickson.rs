//! Mixed Chinese Postman, Frederickson's 2-approximation (§4.4): run both orderings
//! of parity repair and arc-imbalance fixing, keep the cheaper augmentation.

use crate::algo::matching;
use crate::algo::shortest_paths;
use crate::error::SolveError;
use crate::graph::{Graph, VertexId};
use crate::problem::Problem;
use crate::route::Route;
use crate::solvers::{common, SolverConfig};

/// Which repair runs first. Sub-procedure index breaks ties on equal cost (1 wins).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubProcedure {
	EvenThenInOut = 1,
	InOutThenEven = 2,
}

/// Runs both sub-procedures and returns the cheaper augmented graph alongside which
/// one won, so Yaoyuenyong's local search can keep improving it without repeating
/// Frederickson's own work.
pub fn best_augmentation(g: &Graph, config: &SolverConfig) -> Result<(Graph, SubProcedure), SolveError> {
	let a = augment(g, config, SubProcedure::EvenThenInOut)?;
	config.cancel.check()?;
	let b = augment(g, config, SubProcedure::InOutThenEven)?;
	let cost_a: i64 = a.links().filter(|l| !l.required).map(|l| l.forward_cost).sum();
	let cost_b: i64 = b.links().filter(|l| !l.required).map(|l| l.forward_cost).sum();
	if cost_a <= cost_b {
		Ok((a, SubProcedure::EvenThenInOut))
	} else {
		Ok((b, SubProcedure::InOutThenEven))
	}
}

pub fn solve(problem: &Problem, config: &SolverConfig) -> Result<Route, SolveError> {
	if let Some(trivial) = common::trivial_if_unrequired(&problem.graph, problem.depot) {
		return Ok(trivial);
	}
	common::check_required_reachable(&problem.graph, problem.depot, true)?;
	config.cancel.check()?;

	let (augmented, _) = best_augmentation(&problem.graph, config)?;
	common::extract_route(&augmented, problem.depot, true)
}

fn augment(g: &Graph, config: &SolverConfig, order: SubProcedure) -> Result<Graph, SolveError> {
	let mut g = g.clone();
	match order {
		SubProcedure::EvenThenInOut => {
			even_parity_repair(&mut g, config)?;
			fix_arc_imbalance(&mut g, config)?;
		}
		SubProcedure::InOutThenEven => {
			fix_arc_imbalance(&mut g, config)?;
			even_parity_repair(&mut g, config)?;
		}
	}
	// fix_arc_imbalance commits single arcs along its augmenting paths, which can
	// leave a vertex with odd total degree even though in/out stayed balanced. A
	// second, idempotent parity pass closes that gap whichever sub-procedure ran
	// fix_arc_imbalance last.
	even_parity_repair(&mut g, config)?;
	Ok(g)
}

/// UCPP-style parity repair over the undirected projection (arcs traversable either
/// way for the purpose of this search): matches odd-total-degree vertices and
/// duplicates their shortest connecting paths. Duplicates keep their source link's
/// directedness, so an edge picked up here is still free for the orientation pass.
fn even_parity_repair(g: &mut Graph, config: &SolverConfig) -> Result<(), SolveError> {
	let apsp = shortest_paths::all_pairs_shortest_paths(g, false);
	let odd: Vec<VertexId> = g.vertex_ids().filter(|&v| !g.is_orphan(v) && g.degree(v) % 2 == 1).collect();
	config.cancel.check()?;
	let pairs = matching::min_cost_perfect_matching(&odd, |a, b| apsp.dist(a, b), config.matching);
	for (a, b) in pairs {
		config.cancel.check()?;
		common::duplicate_shortest_path(g, &apsp, a, b);
	}
	Ok(())
}

/// DCPP-style successive-shortest-path fix of arc in/out excess. Undirected edges
/// contribute equally to in- and out-degree (see [`crate::graph::Graph::in_out_degree`]),
/// so this excess calculation already isolates the arc-only imbalance without the
/// undirected edges needing to be pre-oriented; duplicated hops are committed to the
/// direction walked, "orienting" whichever free edges the augmenting path crosses.
fn fix_arc_imbalance(g: &mut Graph, config: &SolverConfig) -> Result<(), SolveError> {
	let apsp = shortest_paths::all_pairs_shortest_paths(g, true);
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
				let candidate = (apsp.dist(s, d), si, di);
				if best.map_or(true, |b| candidate < b) {
					best = Some(candidate);
				}
			}
		}
		let Some((_, si, di)) = best else { break };
		let (s, _) = supply[si];
		let (d, _) = demand[di];
		common::duplicate_shortest_path_committed(g, &apsp, s, d);
		supply[si].1 -= 1;
		demand[di].1 -= 1;
		if supply.iter().all(|&(_, q)| q == 0) {
			break;
		}
	}
	Ok(())
}
