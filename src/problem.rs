//! Binds a graph, a required-link designation, and a depot into the immutable object
//! solvers consume.

use crate::graph::{Graph, LinkId, VertexId};

pub struct Problem {
	pub graph: Graph,
	pub depot: VertexId,
}

impl Problem {
	/// `required` is read off each link's own `required` flag (the parser / builder
	/// sets it); this just validates the depot and reports which family the
	/// instance falls into.
	pub fn new(graph: Graph, depot: VertexId) -> Self {
		let mut graph = graph;
		graph.set_depot(depot);
		Self { graph, depot }
	}

	pub fn required_link_ids(&self) -> Vec<LinkId> {
		self.graph.required_links().map(|l| l.id).collect()
	}

	/// A postman (CPP) problem has every link required; otherwise it's rural (RPP).
	pub fn is_postman(&self) -> bool {
		self.graph.required_links().count() == self.graph.link_count()
	}
}
