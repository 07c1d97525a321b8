//! Eulerian circuit extraction (Hierholzer), with the forward-movement splice
//! preference required by the design: when a subtour is found at a vertex already
//! placed in the main circuit, it is spliced *after* that position, never before.

use std::collections::HashSet;

use crate::error::SolveError;
use crate::graph::{Graph, LinkId, VertexId};

/// One step of an extracted circuit: the link traversed and the vertex it was
/// traversed from (the vertex traversed to is implicit: `link.other(from)`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
	pub link: LinkId,
	pub from: VertexId,
}

/// Checks the Hierholzer preconditions: every vertex with nonzero degree is balanced
/// (even total degree if `!respect_direction`, in==out if `respect_direction`), and
/// all such vertices are connected to `depot`.
pub fn check_preconditions(g: &Graph, depot: VertexId, respect_direction: bool) -> Result<(), SolveError> {
	for v in g.vertex_ids() {
		if g.is_orphan(v) {
			continue;
		}
		let balanced = if respect_direction {
			// in == out is necessary but not sufficient: an undirected link counts
			// toward both in_out_degree sides at once, so it can mask a vertex whose
			// true (direction-ignoring) degree is odd and so can never close into a
			// circuit.
			let (indeg, outdeg) = g.in_out_degree(v);
			indeg == outdeg && g.degree(v) % 2 == 0
		} else {
			g.degree(v) % 2 == 0
		};
		if !balanced {
			return Err(SolveError::InternalInvariantViolation(format!("vertex {:?} is not balanced before Eulerian extraction", v)));
		}
	}
	let reachable = crate::algo::connectivity::reachable_undirected(g, depot);
	for v in g.vertex_ids() {
		if !g.is_orphan(v) && !reachable.contains(&v) {
			return Err(SolveError::InternalInvariantViolation(format!("vertex {:?} is disconnected from depot before Eulerian extraction", v)));
		}
	}
	Ok(())
}

/// Extracts an Eulerian circuit starting and ending at `depot`, consuming every link
/// of `g` exactly once.
///
/// Builds the main circuit incrementally: whenever the vertex at the current
/// position still has unused outgoing links, a fresh subtour is walked from it
/// (guaranteed by the balance precondition to return to that same vertex) and
/// spliced in immediately *after* the current position — forward of where we are,
/// never behind — before the scan continues.
pub fn hierholzer(g: &Graph, depot: VertexId, respect_direction: bool) -> Result<Vec<Step>, SolveError> {
	check_preconditions(g, depot, respect_direction)?;
	if g.link_count() == 0 {
		return Ok(Vec::new());
	}

	let mut used: HashSet<LinkId> = HashSet::new();
	// circuit[i] is the vertex occupying position i; circuit[0] == depot.
	// steps[i] is the step taken to arrive at circuit[i+1] from circuit[i].
	let mut circuit: Vec<VertexId> = vec![depot];
	let mut steps: Vec<Step> = Vec::new();

	let mut i = 0usize;
	while i < circuit.len() {
		let v = circuit[i];
		if let Some(link) = g.outgoing(v, respect_direction).filter(|l| !used.contains(&l.id)).min_by_key(|l| l.id) {
			// Walk a subtour from v until genuinely stuck (guaranteed to land back on v).
			let mut sub_steps = Vec::new();
			let mut sub_verts = Vec::new();
			let mut cur = v;
			used.insert(link.id);
			sub_steps.push(Step { link: link.id, from: cur });
			cur = link.other(cur);
			sub_verts.push(cur);
			loop {
				match g.outgoing(cur, respect_direction).filter(|l| !used.contains(&l.id)).min_by_key(|l| l.id) {
					Some(next) => {
						used.insert(next.id);
						sub_steps.push(Step { link: next.id, from: cur });
						cur = next.other(cur);
						sub_verts.push(cur);
					}
					None => break,
				}
			}
			if cur != v {
				return Err(SolveError::InternalInvariantViolation(format!("subtour from {:?} got stuck at {:?} instead of returning", v, cur)));
			}
			// Splice forward of position i.
			for (k, step) in sub_steps.into_iter().enumerate() {
				steps.insert(i + k, step);
				circuit.insert(i + 1 + k, sub_verts[k]);
			}
		} else {
			i += 1;
		}
	}

	if used.len() != g.link_count() {
		return Err(SolveError::InternalInvariantViolation(format!("Eulerian extraction used {} of {} links", used.len(), g.link_count())));
	}
	Ok(steps)
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::graph::GraphKind;

	#[test]
	fn square_cycle_is_extracted_whole() {
		let mut g = Graph::new(GraphKind::Undirected);
		for _ in 0..4 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(0), v(1), 5, 5, true, false, None);
		g.add_link(v(1), v(2), 3, 3, true, false, None);
		g.add_link(v(2), v(3), 7, 7, true, false, None);
		g.add_link(v(3), v(0), 2, 2, true, false, None);
		let steps = hierholzer(&g, v(0), false).unwrap();
		assert_eq!(steps.len(), 4);
		let total: i64 = steps.iter().map(|s| g.link(s.link).cost_from(s.from)).sum();
		assert_eq!(total, 17);
	}

	#[test]
	fn forward_splice_places_subtour_right_after_branch_point() {
		// Main triangle 0-1-2-0, plus a pendant triangle 1-5-6-1 hanging off vertex 1,
		// which only has unused edges left once the scan reaches vertex 1's position
		// in the (already-built) main circuit. Forward-movement preference requires
		// the pendant to be spliced immediately after that position, i.e. the walk
		// detours 0,1,5,6,1 before continuing on to 2,0 - not the other way around.
		let mut g = Graph::new(GraphKind::Undirected);
		for _ in 0..7 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(0), v(1), 1, 1, true, false, None);
		g.add_link(v(1), v(2), 1, 1, true, false, None);
		g.add_link(v(2), v(0), 1, 1, true, false, None);
		g.add_link(v(1), v(5), 1, 1, true, false, None);
		g.add_link(v(5), v(6), 1, 1, true, false, None);
		g.add_link(v(6), v(1), 1, 1, true, false, None);
		let steps = hierholzer(&g, v(0), false).unwrap();
		assert_eq!(steps.len(), 6);
		let visited: Vec<VertexId> = {
			let mut vs = vec![v(0)];
			let mut cur = v(0);
			for s in &steps {
				cur = g.link(s.link).other(cur);
				vs.push(cur);
			}
			vs
		};
		assert_eq!(visited, vec![v(0), v(1), v(5), v(6), v(1), v(2), v(0)]);
	}

	#[test]
	fn unbalanced_graph_is_rejected() {
		let mut g = Graph::new(GraphKind::Undirected);
		for _ in 0..3 {
			g.add_vertex();
		}
		let v = |i: u32| VertexId(i);
		g.add_link(v(0), v(1), 1, 1, true, false, None);
		g.add_link(v(1), v(2), 1, 1, true, false, None);
		assert!(matches!(hierholzer(&g, v(0), false), Err(SolveError::InternalInvariantViolation(_))));
	}
}
