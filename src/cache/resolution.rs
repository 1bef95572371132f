/* src/cache/resolution.rs */

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};

use super::Outcome;
use crate::fetch::FetchError;
use crate::location::Location;

/// Lifecycle of one location: `Unstarted -> Pending -> {Resolved | Failed}`.
///
/// The terminal states are final.
pub enum Resolution<T> {
	/// No fetch has been issued. Only [`peek`](super::ResourceCache::peek)
	/// reports this; a request never does.
	Unstarted,
	/// A fetch is in flight.
	Pending(Pending<T>),
	/// The fetch succeeded.
	Resolved(Arc<T>),
	/// The fetch failed.
	Failed(Arc<FetchError>),
}

impl<T> Resolution<T> {
	pub fn is_pending(&self) -> bool {
		matches!(self, Self::Pending(_))
	}

	/// True once the resolution is `Resolved` or `Failed`.
	pub fn is_settled(&self) -> bool {
		matches!(self, Self::Resolved(_) | Self::Failed(_))
	}

	pub fn value(&self) -> Option<&Arc<T>> {
		match self {
			Self::Resolved(value) => Some(value),
			_ => None,
		}
	}

	pub fn error(&self) -> Option<&Arc<FetchError>> {
		match self {
			Self::Failed(error) => Some(error),
			_ => None,
		}
	}
}

impl<T> Clone for Resolution<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Unstarted => Self::Unstarted,
			Self::Pending(pending) => Self::Pending(pending.clone()),
			Self::Resolved(value) => Self::Resolved(Arc::clone(value)),
			Self::Failed(error) => Self::Failed(Arc::clone(error)),
		}
	}
}

impl<T: fmt::Debug> fmt::Debug for Resolution<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Unstarted => f.write_str("Unstarted"),
			Self::Pending(pending) => f.debug_tuple("Pending").field(&pending.location).finish(),
			Self::Resolved(value) => f.debug_tuple("Resolved").field(value).finish(),
			Self::Failed(error) => f.debug_tuple("Failed").field(error).finish(),
		}
	}
}

/// Shared handle to an in-flight fetch.
///
/// Every clone awaits the same attempt and yields the same [`Outcome`].
/// Awaiting after the fetch settled returns immediately.
pub struct Pending<T> {
	pub(crate) location: Location,
	pub(crate) settle: Shared<BoxFuture<'static, Outcome<T>>>,
}

impl<T> Pending<T> {
	/// Location being fetched.
	pub fn location(&self) -> &Location {
		&self.location
	}

	/// The outcome, if the fetch has already settled.
	pub fn peek(&self) -> Option<Outcome<T>> {
		self.settle.peek().cloned()
	}
}

impl<T> Clone for Pending<T> {
	fn clone(&self) -> Self {
		Self {
			location: self.location.clone(),
			settle: self.settle.clone(),
		}
	}
}

impl<T> Future for Pending<T> {
	type Output = Outcome<T>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		self.settle.poll_unpin(cx)
	}
}
