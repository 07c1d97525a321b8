//! The six solvers of §4.2-4.7, plus the shared failure semantics of §4.8 and the
//! augmentation helpers they all lean on.

mod common;
pub mod dcpp;
pub mod mcpp_frederickson;
pub mod mcpp_yaoyuenyong;
pub mod ucpp;
pub mod wcpp_win;
pub mod wrpp_benavent;

use crate::algo::matching::MatchingBackend;
use crate::cancel::CancelToken;
use crate::error::SolveError;
use crate::problem::Problem;
use crate::route::Route;

/// Tunables every solver reads instead of any ambient global: which matching backend
/// to use, how hard Yaoyuenyong's local search should try, and the cooperative cancel
/// token.
#[derive(Clone)]
pub struct SolverConfig {
	pub matching: MatchingBackend,
	pub yaoyuenyong_move_budget: usize,
	pub cancel: CancelToken,
}

impl Default for SolverConfig {
	fn default() -> Self {
		Self { matching: MatchingBackend::Exact, yaoyuenyong_move_budget: 500, cancel: CancelToken::new() }
	}
}

/// Human-readable name for a solver id, used in the §6 report header.
pub fn solver_name(id: u8) -> &'static str {
	match id {
		1 => "Undirected Chinese Postman (exact)",
		2 => "Directed Chinese Postman (exact)",
		3 => "Mixed Chinese Postman (Frederickson)",
		4 => "Mixed Chinese Postman (Yaoyuenyong)",
		5 => "Windy Chinese Postman (Win)",
		7 => "Windy Rural Postman (Benavent H1)",
		_ => "unsupported",
	}
}

/// Dispatches `problem` to the solver named by `solver_id` (1..=7; 6 is reserved).
pub fn dispatch(solver_id: u8, problem: &Problem, config: &SolverConfig) -> Result<Route, SolveError> {
	match solver_id {
		1 => ucpp::solve(problem, config),
		2 => dcpp::solve(problem, config),
		3 => mcpp_frederickson::solve(problem, config),
		4 => mcpp_yaoyuenyong::solve(problem, config),
		5 => wcpp_win::solve(problem, config),
		7 => wrpp_benavent::solve(problem, config),
		_ => Err(SolveError::UnsupportedSolver(solver_id)),
	}
}
