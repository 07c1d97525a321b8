//! Minimum spanning tree / forest (Kruskal): sort edges ascending, union-find to skip
//! anything that would close a cycle, over this crate's dense `VertexId`/`LinkId` types.

use crate::graph::{Graph, LinkId, VertexId};

struct UnionFind {
	parent: Vec<u32>,
	rank: Vec<u8>,
}

impl UnionFind {
	fn new(n: usize) -> Self {
		Self { parent: (0..n as u32).collect(), rank: vec![0; n] }
	}

	fn find(&mut self, x: u32) -> u32 {
		if self.parent[x as usize] != x {
			self.parent[x as usize] = self.find(self.parent[x as usize]);
		}
		self.parent[x as usize]
	}

	/// Unions the sets containing `a` and `b`. Returns `true` if they were distinct
	/// (i.e. the union actually merged two trees).
	fn union(&mut self, a: u32, b: u32) -> bool {
		let (ra, rb) = (self.find(a), self.find(b));
		if ra == rb {
			return false;
		}
		match self.rank[ra as usize].cmp(&self.rank[rb as usize]) {
			std::cmp::Ordering::Less => self.parent[ra as usize] = rb,
			std::cmp::Ordering::Greater => self.parent[rb as usize] = ra,
			std::cmp::Ordering::Equal => {
				self.parent[rb as usize] = ra;
				self.rank[ra as usize] += 1;
			}
		}
		true
	}
}

/// Computes a minimum spanning forest over `g`'s undirected projection, restricted to
/// the links for which `eligible` returns `true`. Ties broken by lower link id first.
pub fn minimum_spanning_forest(g: &Graph, eligible: impl Fn(LinkId) -> bool) -> Vec<LinkId> {
	let mut candidates: Vec<&crate::graph::Link> = g.links().filter(|l| eligible(l.id) && !l.is_cyclic()).collect();
	candidates.sort_by_key(|l| (l.forward_cost, l.id));
	let mut uf = UnionFind::new(g.node_count());
	let mut tree = Vec::new();
	for link in candidates {
		if uf.union(link.p1.0, link.p2.0) {
			tree.push(link.id);
		}
	}
	tree
}

/// Computes a minimum spanning tree over an arbitrary complete graph given as a list of
/// abstract node indices and a symmetric weight function — used by the component
/// connector step of Benavent's H1 heuristic, where nodes are required-subgraph
/// components rather than graph vertices.
pub fn minimum_spanning_tree_complete(nodes: &[usize], weight: impl Fn(usize, usize) -> i64) -> Vec<(usize, usize)> {
	let mut edges: Vec<(i64, usize, usize)> = Vec::new();
	for i in 0..nodes.len() {
		for j in (i + 1)..nodes.len() {
			edges.push((weight(nodes[i], nodes[j]), nodes[i], nodes[j]));
		}
	}
	edges.sort_by_key(|&(w, a, b)| (w, a, b));
	let index_of: std::collections::HashMap<usize, u32> = nodes.iter().enumerate().map(|(i, &n)| (n, i as u32)).collect();
	let mut uf = UnionFind::new(nodes.len());
	let mut tree = Vec::new();
	for (_, a, b) in edges {
		if uf.union(index_of[&a], index_of[&b]) {
			tree.push((a, b));
		}
	}
	tree
}

/// Used only by vertex ids directly, for parity with the rest of the algebra that
/// speaks in `VertexId` rather than raw `usize`.
pub fn mst_edge_ids_to_vertex_pairs(g: &Graph, tree: &[LinkId]) -> Vec<(VertexId, VertexId)> {
	tree.iter().map(|id| { let l = g.link(*id); (l.p1, l.p2) }).collect()
}
