//! Error kinds shared by the parser and the solver family.

use thiserror::Error;

use crate::graph::LinkId;

/// Malformed OARLIB input.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("parse error at line {line}: {reason}")]
pub struct ParseError {
	pub line: usize,
	pub reason: String,
}

impl ParseError {
	pub fn new(line: usize, reason: impl Into<String>) -> Self {
		Self { line, reason: reason.into() }
	}
}

/// Failure of a solve, bubbled unchanged from the solver to the programmatic entry point.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum SolveError {
	/// A required link sits in a component the depot cannot reach.
	#[error("required link {link:?} is unreachable from the depot")]
	InfeasibleInstance { link: LinkId },
	/// `solverId` was 6, or outside `1..=7`.
	#[error("solver id {0} is not supported")]
	UnsupportedSolver(u8),
	/// The 64-bit cost accumulator would have wrapped.
	#[error("cost accumulator overflowed")]
	CostOverflow,
	/// The cooperative cancel token fired before the solve completed.
	#[error("solve was cancelled")]
	Cancelled,
	/// A post-augmentation Eulerian precondition failed to hold. Always a bug.
	#[error("internal invariant violated: {0}")]
	InternalInvariantViolation(String),
}

/// Top-level error type returned by the programmatic `solve` entry point.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ErrorKind {
	#[error(transparent)]
	Parse(#[from] ParseError),
	#[error(transparent)]
	Solve(#[from] SolveError),
}
