//! Cooperative cancellation, checked at the top of every solver outer loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SolveError;

#[derive(Clone, Default, Debug)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
	pub fn new() -> Self {
		Self(Arc::new(AtomicBool::new(false)))
	}

	/// Requests cancellation; takes effect the next time a solver checks the token.
	pub fn cancel(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}

	/// Returns `Err(Cancelled)` if cancellation has been requested, otherwise `Ok(())`.
	/// Intended to be called at the top of every outer loop iteration a solver runs.
	pub fn check(&self) -> Result<(), SolveError> {
		if self.is_cancelled() {
			Err(SolveError::Cancelled)
		} else {
			Ok(())
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn cancels_cooperatively() {
		let token = CancelToken::new();
		assert!(token.check().is_ok());
		token.cancel();
		assert!(matches!(token.check(), Err(SolveError::Cancelled)));
	}
}
