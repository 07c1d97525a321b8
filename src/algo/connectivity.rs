//! Connectivity and strong-connectivity.
//!
//! The SCC routine is an iterative (unrecursed) Tarjan's algorithm, avoiding recursion
//! so it stays safe on the wide, shallow graphs these instances tend to produce.

use std::cmp::min;
use std::collections::{HashMap, HashSet};

use crate::graph::{Graph, VertexId};

/// Vertices reachable from `source` via the undirected projection (directionality
/// ignored), including `source` itself.
pub fn reachable_undirected(g: &Graph, source: VertexId) -> HashSet<VertexId> {
	reachable(g, source, false)
}

/// Vertices reachable from `source`, respecting directionality iff `respect_direction`.
pub fn reachable(g: &Graph, source: VertexId, respect_direction: bool) -> HashSet<VertexId> {
	let mut seen = HashSet::new();
	seen.insert(source);
	let mut queue = std::collections::VecDeque::new();
	queue.push_back(source);
	while let Some(u) = queue.pop_front() {
		for link in g.outgoing(u, respect_direction) {
			let v = link.other(u);
			if seen.insert(v) {
				queue.push_back(v);
			}
		}
	}
	seen
}

/// Vertices that can reach `target`, respecting directionality iff `respect_direction`
/// (found by walking incoming links backward).
pub fn reachable_reverse(g: &Graph, target: VertexId, respect_direction: bool) -> HashSet<VertexId> {
	let mut seen = HashSet::new();
	seen.insert(target);
	let mut queue = std::collections::VecDeque::new();
	queue.push_back(target);
	while let Some(u) = queue.pop_front() {
		for link in g.incident(u).filter(|l| l.is_incoming(u, respect_direction)) {
			let v = link.other(u);
			if seen.insert(v) {
				queue.push_back(v);
			}
		}
	}
	seen
}

/// Strongly connected components.
///
/// `respect_direction` toggles whether directed links are treated as one-way (the
/// classic SCC decomposition) or not (equivalent to plain undirected connected
/// components, used to validate mixed/windy graphs where only the undirected
/// projection needs to hold together). `include_orphans` controls whether
/// zero-degree vertices each form their own singleton component.
pub fn strongly_connected_components(g: &Graph, respect_direction: bool, include_orphans: bool) -> Vec<HashSet<VertexId>> {
	let mut sccs = Vec::new();
	let mut index = 0usize;
	let mut stack = Vec::new();
	let mut info: HashMap<VertexId, (bool, usize, usize)> = HashMap::new();
	let mut work: Vec<(VertexId, Vec<VertexId>, bool)> = Vec::new();

	for start in g.vertex_ids() {
		if g.is_orphan(start) && !include_orphans {
			continue;
		}
		if info.contains_key(&start) {
			continue;
		}
		work.push((start, g.outgoing(start, respect_direction).map(|l| l.other(start)).collect(), false));
		'unrec: while let Some((u, succ, jumped)) = work.last_mut() {
			let u = *u;
			if !info.contains_key(&u) {
				stack.push(u);
				info.insert(u, (true, index, index));
				index += 1;
			}
			while let Some(&v) = succ.last() {
				match info.get(&v).copied() {
					None => {
						*jumped = true;
						work.push((v, g.outgoing(v, respect_direction).map(|l| l.other(v)).collect(), false));
						continue 'unrec;
					}
					Some((_, _, v_low)) if *jumped => {
						let (_, _, u_low) = info.get_mut(&u).unwrap();
						*u_low = min(*u_low, v_low);
						*jumped = false;
					}
					Some((true, v_idx, _)) => {
						let (_, _, u_low) = info.get_mut(&u).unwrap();
						*u_low = min(*u_low, v_idx);
					}
					_ => {}
				}
				succ.pop();
			}
			let (_, idx, low) = *info.get(&u).unwrap();
			if idx == low {
				let mut scc = HashSet::new();
				loop {
					let v = stack.pop().unwrap();
					info.get_mut(&v).unwrap().0 = false;
					scc.insert(v);
					if v == u {
						break;
					}
				}
				sccs.push(scc);
			}
			work.pop();
		}
	}
	sccs
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::graph::GraphKind;

	#[test]
	fn sccs_of_a_simple_directed_graph() {
		let mut g = Graph::new(GraphKind::Directed);
		for _ in 0..6 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(0), v(1), 1, 1, false, true, None);
		g.add_link(v(1), v(2), 1, 1, false, true, None);
		g.add_link(v(2), v(0), 1, 1, false, true, None);
		g.add_link(v(3), v(1), 1, 1, false, true, None);
		g.add_link(v(3), v(2), 1, 1, false, true, None);
		g.add_link(v(4), v(5), 1, 1, false, true, None);
		g.add_link(v(5), v(4), 1, 1, false, true, None);
		let sccs = strongly_connected_components(&g, true, false);
		let mut sizes: Vec<usize> = sccs.iter().map(HashSet::len).collect();
		sizes.sort();
		assert_eq!(sizes, vec![1, 2, 3]);
		let undirected = strongly_connected_components(&g, false, false);
		let mut sizes: Vec<usize> = undirected.iter().map(HashSet::len).collect();
		sizes.sort();
		assert_eq!(sizes, vec![2, 4]);
	}

	#[test]
	fn reachability_respects_undirected_projection() {
		let mut g = Graph::new(GraphKind::Directed);
		for _ in 0..3 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(1), v(0), 1, 1, false, true, None);
		g.add_link(v(1), v(2), 1, 1, false, true, None);
		let r = reachable_undirected(&g, v(0));
		assert_eq!(r.len(), 3);
	}
}
