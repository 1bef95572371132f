/* src/mode.rs */

//!
//! The two ways of consuming a [`Resolution`].
//!
//! - Suspending: [`Suspend`] is a future that waits out a pending fetch and
//!   yields the value or the failure as `Err`.
//! - Tri-state: [`TriState`] is an immediate `(value, pending, error)` report;
//!   the caller polls again later.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::FutureExt;
use futures_util::future::{Either, Ready, ready};

use crate::cache::{Outcome, Pending, Resolution};
use crate::fetch::FetchError;

/// Future returned by suspending-mode access.
///
/// Completes immediately for a settled resolution.
pub struct Suspend<T> {
	inner: Either<Ready<Outcome<T>>, Pending<T>>,
}

impl<T> Future for Suspend<T> {
	type Output = Outcome<T>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		self.inner.poll_unpin(cx)
	}
}

/// Snapshot of a resolution as `(value, pending, error)`.
///
/// While pending, both `value` and `error` are `None`. Once settled, exactly
/// one of them is `Some`.
pub struct TriState<T> {
	value: Option<Arc<T>>,
	pending: bool,
	error: Option<Arc<FetchError>>,
}

impl<T> TriState<T> {
	pub fn pending() -> Self {
		Self {
			value: None,
			pending: true,
			error: None,
		}
	}

	pub fn resolved(value: Arc<T>) -> Self {
		Self {
			value: Some(value),
			pending: false,
			error: None,
		}
	}

	pub fn failed(error: Arc<FetchError>) -> Self {
		Self {
			value: None,
			pending: false,
			error: Some(error),
		}
	}

	pub fn value(&self) -> Option<&Arc<T>> {
		self.value.as_ref()
	}

	pub fn is_pending(&self) -> bool {
		self.pending
	}

	pub fn error(&self) -> Option<&Arc<FetchError>> {
		self.error.as_ref()
	}

	/// Splits into the `(value, pending, error)` triple.
	pub fn into_parts(self) -> (Option<Arc<T>>, bool, Option<Arc<FetchError>>) {
		(self.value, self.pending, self.error)
	}

	/// The settled outcome, or `None` while pending.
	pub fn into_outcome(self) -> Option<Outcome<T>> {
		match (self.value, self.error) {
			(Some(value), _) => Some(Ok(value)),
			(None, Some(error)) => Some(Err(error)),
			(None, None) => None,
		}
	}
}

impl<T> Clone for TriState<T> {
	fn clone(&self) -> Self {
		Self {
			value: self.value.clone(),
			pending: self.pending,
			error: self.error.clone(),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for TriState<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TriState")
			.field("value", &self.value)
			.field("pending", &self.pending)
			.field("error", &self.error)
			.finish()
	}
}

impl<T> Resolution<T> {
	/// Reports this resolution without waiting.
	///
	/// `Unstarted` reads as pending: nothing is available yet.
	pub fn tri_state(&self) -> TriState<T> {
		match self {
			Self::Unstarted | Self::Pending(_) => TriState::pending(),
			Self::Resolved(value) => TriState::resolved(Arc::clone(value)),
			Self::Failed(error) => TriState::failed(Arc::clone(error)),
		}
	}

	/// Waits for this resolution to settle.
	///
	/// Only called on resolutions returned by `request`, which are never
	/// `Unstarted`.
	pub(crate) fn suspend(self) -> Suspend<T> {
		let inner = match self {
			Self::Pending(pending) => Either::Right(pending),
			Self::Resolved(value) => Either::Left(ready(Ok(value))),
			Self::Failed(error) => Either::Left(ready(Err(error))),
			Self::Unstarted => unreachable!("suspend on an unrequested location"),
		};
		Suspend { inner }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tri_state_invariants() {
		let (value, is_pending, error) = TriState::<u8>::pending().into_parts();
		assert!(value.is_none());
		assert!(is_pending);
		assert!(error.is_none());

		let resolved = Resolution::Resolved(Arc::new(7u8)).tri_state();
		let (value, is_pending, error) = resolved.into_parts();
		assert_eq!(value.as_deref(), Some(&7));
		assert!(!is_pending);
		assert!(error.is_none());

		let failed = Resolution::<u8>::Failed(Arc::new(FetchError::Transport("reset".into())));
		let (value, is_pending, error) = failed.tri_state().into_parts();
		assert!(value.is_none());
		assert!(!is_pending);
		assert!(matches!(error.as_deref(), Some(FetchError::Transport(_))));
	}

	#[test]
	fn unstarted_reads_as_pending() {
		let state = Resolution::<u8>::Unstarted.tri_state();
		assert!(state.is_pending());
		assert!(state.into_outcome().is_none());
	}
}
