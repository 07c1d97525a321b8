//! Arc-routing solvers for street-like graphs: directed/undirected/mixed/windy
//! Chinese and Rural Postman variants over a shared graph algebra.

pub mod algo;
pub mod cancel;
pub mod error;
pub mod graph;
pub mod parser;
pub mod problem;
pub mod report;
pub mod route;
pub mod solvers;

use error::ErrorKind;
use solvers::SolverConfig;

/// The programmatic entry point §6 specifies for an embedding shell: parses
/// `instance_text`, dispatches to solver `solver_id` (1..=7, id 6 reserved), and
/// renders the resulting route as the text report of §6 — or returns the error kind
/// the caller should map to an exit code / user message.
pub fn solve(solver_id: u8, instance_text: &str) -> Result<String, ErrorKind> {
	let parsed = parser::parse(instance_text)?;
	let config = SolverConfig::default();
	let route = solvers::dispatch(solver_id, &parsed.problem, &config)?;
	Ok(report::render(&parsed.instance_name, solver_id, &parsed.problem.graph, &route))
}

pub use cancel::CancelToken as Cancel;
pub use error::{ErrorKind as Error, ParseError, SolveError};
