//! Flavor-agnostic graph algebra shared by every solver.

pub mod connectivity;
pub mod euler;
pub mod matching;
pub mod mst;
pub mod shortest_paths;
