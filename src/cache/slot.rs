/* src/cache/slot.rs */

use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;
use futures_util::FutureExt;

#[cfg(feature = "events")]
use super::CacheEvent;
use super::{Outcome, Pending, Resolution, ResourceCache};
use crate::location::Location;

/// Storage for one location's resolution.
///
/// The state starts as `Pending` and is written exactly once more, by the
/// fetch future itself when it settles.
pub(crate) struct Slot<T> {
	state: ArcSwap<Resolution<T>>,
}

impl<T> Slot<T>
where
	T: Send + Sync + 'static,
{
	/// Builds a slot whose fetch has been prepared but not polled.
	///
	/// Dropping the slot before anything drives its future issues no fetch.
	pub(crate) fn prepare(location: Location, cache: &ResourceCache<T>) -> Arc<Self> {
		let fetcher = Arc::clone(&cache.fetcher);
		#[cfg(feature = "events")]
		let events = cache.events.clone();

		Arc::new_cyclic(|weak: &Weak<Self>| {
			let weak = weak.clone();
			let target = location.clone();

			let settle = async move {
				tracing::debug!(location = %target, "fetch started");
				let outcome: Outcome<T> = fetcher
					.fetch(&target)
					.await
					.map(Arc::new)
					.map_err(Arc::new);

				match &outcome {
					Ok(_) => tracing::debug!(location = %target, "fetch resolved"),
					Err(e) => tracing::warn!(location = %target, error = %e, "fetch failed"),
				}

				if let Some(slot) = weak.upgrade() {
					slot.settle(&outcome);
				}

				#[cfg(feature = "events")]
				{
					let event = match &outcome {
						Ok(_) => CacheEvent::Resolved { location: target },
						Err(e) => CacheEvent::Failed {
							location: target,
							error: Arc::clone(e),
						},
					};
					let _ = events.send(event);
				}

				outcome
			}
			.boxed()
			.shared();

			Self {
				state: ArcSwap::from_pointee(Resolution::Pending(Pending { location, settle })),
			}
		})
	}

	fn settle(&self, outcome: &Outcome<T>) {
		let terminal = match outcome {
			Ok(value) => Resolution::Resolved(Arc::clone(value)),
			Err(error) => Resolution::Failed(Arc::clone(error)),
		};
		self.state.store(Arc::new(terminal));
	}
}

impl<T> Slot<T> {
	pub(crate) fn current(&self) -> Resolution<T> {
		Resolution::clone(&self.state.load())
	}
}
