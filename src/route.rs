//! The solved route: an ordered walk of links plus the derived quantities §3 names.

use std::collections::HashMap;

use crate::error::SolveError;
use crate::graph::{Direction, Graph, LinkId, VertexId};

/// One traversal of a link, in the direction actually taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Traversal {
	pub link: LinkId,
	pub from: VertexId,
	pub to: VertexId,
	pub direction: Direction,
	pub cost: i64,
	/// Whether the link actually traversed (an augmentation duplicate, or the
	/// original) was required. A repeat traversal of a required link's own
	/// duplicate is still a deadhead (§GLOSSARY): this is the copy's own flag,
	/// not the origin link's.
	pub required: bool,
}

pub struct Route {
	pub depot: VertexId,
	pub traversals: Vec<Traversal>,
}

impl Route {
	/// The trivial route: stay at the depot, cost 0. Used whenever the required set
	/// is empty (§4.8).
	pub fn trivial(depot: VertexId) -> Self {
		Self { depot, traversals: Vec::new() }
	}

	pub fn total_cost(&self) -> Result<i64, SolveError> {
		let mut total = 0i64;
		for t in &self.traversals {
			total = total.checked_add(t.cost).ok_or(SolveError::CostOverflow)?;
		}
		Ok(total)
	}

	pub fn vertices(&self) -> Vec<VertexId> {
		let mut vs = vec![self.depot];
		for t in &self.traversals {
			vs.push(t.to);
		}
		vs
	}

	/// Number of times each link id is traversed.
	pub fn traversal_counts(&self) -> HashMap<LinkId, usize> {
		let mut counts = HashMap::new();
		for t in &self.traversals {
			*counts.entry(t.link).or_insert(0) += 1;
		}
		counts
	}

	pub fn deadhead_count(&self) -> usize {
		self.traversals.iter().filter(|t| !t.required).count()
	}

	/// Validates the structural invariants of §3: consecutive links connect, every
	/// required link appears, and the walk starts/ends at the depot.
	pub fn validate(&self, g: &Graph) -> Result<(), String> {
		let verts = self.vertices();
		if verts.first() != Some(&self.depot) || verts.last() != Some(&self.depot) {
			return Err("route does not start and end at the depot".to_string());
		}
		for w in self.traversals.windows(2) {
			if w[0].to != w[1].from {
				return Err(format!("non-contiguous walk: traversal into {:?} followed by traversal from {:?}", w[0].to, w[1].from));
			}
		}
		let counts = self.traversal_counts();
		for link in g.required_links() {
			if counts.get(&link.id).copied().unwrap_or(0) == 0 {
				return Err(format!("required link {:?} was never traversed", link.id));
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::graph::GraphKind;

	#[test]
	fn trivial_route_validates_on_empty_requirements() {
		let mut g = Graph::new(GraphKind::Undirected);
		g.add_vertex();
		let route = Route::trivial(VertexId(0));
		assert_eq!(route.total_cost().unwrap(), 0);
		assert!(route.validate(&g).is_ok());
	}

	#[test]
	fn overflow_is_reported() {
		let route = Route {
			depot: VertexId(0),
			traversals: vec![
				Traversal { link: LinkId(0), from: VertexId(0), to: VertexId(0), direction: Direction::Forward, cost: i64::MAX, required: true },
				Traversal { link: LinkId(1), from: VertexId(0), to: VertexId(0), direction: Direction::Forward, cost: 1, required: true },
			],
		};
		assert_eq!(route.total_cost(), Err(SolveError::CostOverflow));
	}
}
