/* src/cache/mod.rs */

//!
//! The per-location resolution cache.
//!
//! Each [`Location`](crate::Location) is fetched at most once for the lifetime
//! of a [`ResourceCache`]. The first [`request`](ResourceCache::request) issues
//! the fetch; everyone else, before or after it settles, observes the same
//! [`Resolution`].

mod error;
#[cfg(feature = "events")]
mod event;
mod read;
mod request;
mod resolution;
mod slot;

#[cfg(feature = "events")]
pub use event::CacheEvent;
pub use error::CacheError;
pub use resolution::{Pending, Resolution};

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::runtime::Handle;

use crate::fetch::{Fetch, FetchError};
use crate::location::Location;
use slot::Slot;

/// Settled result of a fetch, shared by every caller.
pub type Outcome<T> = Result<Arc<T>, Arc<FetchError>>;

/// Default event channel capacity.
#[cfg(feature = "events")]
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Location-keyed cache of fetch resolutions.
///
/// Lookups read an RCU snapshot and never block. Creating an entry is a
/// single check-and-create, so concurrent first requests for one location
/// still issue exactly one fetch. Fetches are spawned onto the runtime the
/// cache was built with, so they settle whether or not anyone awaits them.
/// Entries are never evicted and a failed fetch is never retried.
pub struct ResourceCache<T> {
	pub(crate) slots: ArcSwap<HashMap<Location, Arc<Slot<T>>>>,
	pub(crate) fetcher: Arc<dyn Fetch<T>>,
	pub(crate) handle: Handle,
	#[cfg(feature = "events")]
	pub(crate) events: tokio::sync::broadcast::Sender<CacheEvent>,
}

impl<T> ResourceCache<T>
where
	T: Send + Sync + 'static,
{
	/// Creates an empty cache that fetches through `fetcher`, spawning
	/// fetches onto the current tokio runtime.
	pub fn new(fetcher: impl Fetch<T> + 'static) -> Result<Self, CacheError> {
		Self::with_fetcher(Arc::new(fetcher))
	}

	/// Like [`new`](Self::new) for an already shared fetcher.
	pub fn with_fetcher(fetcher: Arc<dyn Fetch<T>>) -> Result<Self, CacheError> {
		let handle = Handle::try_current().map_err(|_| CacheError::NoRuntime)?;
		Ok(Self::with_handle(fetcher, handle))
	}

	/// Creates an empty cache that spawns its fetches onto `handle`.
	///
	/// Use this to build a cache outside the runtime that will drive it.
	pub fn with_handle(fetcher: Arc<dyn Fetch<T>>, handle: Handle) -> Self {
		Self {
			slots: ArcSwap::from_pointee(HashMap::new()),
			fetcher,
			handle,
			#[cfg(feature = "events")]
			events: tokio::sync::broadcast::channel(DEFAULT_EVENT_CAPACITY).0,
		}
	}

	/// Replaces the event channel with one of the given capacity.
	///
	/// Events may be dropped if subscribers fall behind the channel.
	#[cfg(feature = "events")]
	pub fn with_event_capacity(mut self, capacity: usize) -> Self {
		self.events = tokio::sync::broadcast::channel(capacity).0;
		self
	}
}
