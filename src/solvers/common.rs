//! Shared failure semantics (§4.8) and augmentation helpers used by every solver.

use crate::algo::connectivity;
use crate::algo::euler::{self, Step};
use crate::algo::shortest_paths::Apsp;
use crate::error::SolveError;
use crate::graph::{Graph, VertexId};
use crate::route::{Route, Traversal};

/// If `g` has no required links, the trivial depot-only route (§4.8). Otherwise
/// `None`, and the caller should proceed with the real solve.
pub fn trivial_if_unrequired(g: &Graph, depot: VertexId) -> Option<Route> {
	if g.required_links().next().is_none() {
		Some(Route::trivial(depot))
	} else {
		None
	}
}

/// Verifies every required link's endpoints are reachable from (and can reach back
/// to, when `respect_direction`) the depot. Fails with `InfeasibleInstance` naming
/// the first such link found, in link-id order.
pub fn check_required_reachable(g: &Graph, depot: VertexId, respect_direction: bool) -> Result<(), SolveError> {
	let out = connectivity::reachable(g, depot, respect_direction);
	let back = if respect_direction { connectivity::reachable_reverse(g, depot, respect_direction) } else { out.clone() };
	for link in g.required_links() {
		if !out.contains(&link.p1) || !out.contains(&link.p2) || !back.contains(&link.p1) || !back.contains(&link.p2) {
			return Err(SolveError::InfeasibleInstance { link: link.origin });
		}
	}
	Ok(())
}

/// Duplicates every link on the `u -> v` shortest path (as found by `apsp`) into `g`,
/// making each hop a non-required deadhead. A hop walked in a link's true forward
/// direction (`from == p1`) keeps that link's directedness; a hop that only exists
/// because `apsp` ignored direction (walking a directed arc backwards) always
/// produces a free duplicate, since a "reverse of a one-way arc" isn't a direction
/// this duplicate can legitimately hold. Used by UCPP/Win/Benavent-H1/Frederickson
/// even-parity repair, all computed over an undirected APSP.
pub fn duplicate_shortest_path(g: &mut Graph, apsp: &Apsp, u: VertexId, v: VertexId) {
	if let Some(path) = apsp.path(u, v) {
		for (link_id, from) in path {
			let link = g.link(link_id).clone();
			let to = link.other(from);
			let (p1, p2) = if from == link.p1 { (link.p1, link.p2) } else { (link.p2, link.p1) };
			let directed = link.directed && from == link.p1;
			g.add_duplicate_link(link_id, p1, p2, link.cost_from(from), link.cost_from(to), directed);
		}
	}
}

/// Like [`duplicate_shortest_path`], but commits each hop's duplicate to the direction
/// it was walked regardless of the original link's directedness. Used by mixed-graph
/// arc-imbalance fixing, where an edge crossed while correcting in/out excess must
/// actually count toward that excess rather than staying a neutral free edge.
pub fn duplicate_shortest_path_committed(g: &mut Graph, apsp: &Apsp, u: VertexId, v: VertexId) {
	if let Some(path) = apsp.path(u, v) {
		for (link_id, from) in path {
			let link = g.link(link_id).clone();
			let to = link.other(from);
			let cost = link.cost_from(from);
			g.add_duplicate_link(link_id, from, to, cost, cost, true);
		}
	}
}

/// Runs Hierholzer on the (already augmented) graph and converts the resulting steps
/// into a [`Route`] expressed in terms of the original instance's link ids (via each
/// traversed link's `origin`).
pub fn extract_route(g: &Graph, depot: VertexId, respect_direction: bool) -> Result<Route, SolveError> {
	let steps = euler::hierholzer(g, depot, respect_direction)?;
	Ok(steps_to_route(g, depot, &steps))
}

pub fn steps_to_route(g: &Graph, depot: VertexId, steps: &[Step]) -> Route {
	let traversals = steps
		.iter()
		.map(|s| {
			let link = g.link(s.link);
			let to = link.other(s.from);
			Traversal { link: link.origin, from: s.from, to, direction: link.direction_from(s.from), cost: link.cost_from(s.from), required: link.required }
		})
		.collect();
	Route { depot, traversals }
}

/// Windy links carry no true direction constraint, so a whole Eulerian circuit can
/// always be walked forwards or reversed without breaking continuity — reversing
/// swaps every traversal's realized cost to the opposite direction of the same edge.
/// Tries both and keeps the cheaper, which is exactly "choose the cheaper direction of
/// each edge traversal" (§4.6/§4.7 step 4) applied at the only granularity a closed
/// walk actually allows an independent choice: the circuit's overall direction.
pub fn cheaper_direction(g: &Graph, route: Route) -> Route {
	let reversed = reverse_route(g, &route);
	match (route.total_cost(), reversed.total_cost()) {
		(Ok(forward_cost), Ok(reverse_cost)) if reverse_cost < forward_cost => reversed,
		_ => route,
	}
}

fn reverse_route(g: &Graph, route: &Route) -> Route {
	let traversals = route
		.traversals
		.iter()
		.rev()
		.map(|t| {
			let link = g.link(t.link);
			let (from, to) = (t.to, t.from);
			Traversal { link: t.link, from, to, direction: link.direction_from(from), cost: link.cost_from(from), required: t.required }
		})
		.collect();
	Route { depot: route.depot, traversals }
}

/// A same-topology copy of `g` where every link's forward and reverse cost are both
/// replaced by `combine(forward, reverse)`. Link ids line up 1:1 with `g`'s, so an
/// [`Apsp`] computed over this projection can have its paths replayed directly onto
/// `g` (or a clone of it) via [`duplicate_shortest_path`] and pick up `g`'s true
/// per-direction costs automatically. Grounds Win's cost-averaging and Benavent
/// H1's cost-minimum symmetric distance in one shared routine.
pub fn cost_projection(g: &Graph, combine: impl Fn(i64, i64) -> i64) -> Graph {
	let mut out = Graph::new(g.kind);
	for _ in 0..g.node_count() {
		out.add_vertex();
	}
	for link in g.links() {
		let cost = combine(link.forward_cost, link.reverse_cost);
		out.add_link(link.p1, link.p2, cost, cost, link.required, false, None);
	}
	out
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::graph::GraphKind;

	#[test]
	fn trivial_route_when_nothing_required() {
		let mut g = Graph::new(GraphKind::Undirected);
		let a = g.add_vertex();
		let b = g.add_vertex();
		g.add_link(a, b, 1, 1, false, false, None);
		assert!(trivial_if_unrequired(&g, a).is_some());
	}

	#[test]
	fn infeasible_instance_names_unreachable_link() {
		// `x` has no link at all to the `m`-`y` component, but the link between them
		// is required.
		let mut g = Graph::new(GraphKind::Undirected);
		let x = g.add_vertex();
		let m = g.add_vertex();
		let y = g.add_vertex();
		let bad = g.add_link(m, y, 1, 1, true, false, None);
		let err = check_required_reachable(&g, x, false).unwrap_err();
		assert_eq!(err, SolveError::InfeasibleInstance { link: bad });
	}
}
