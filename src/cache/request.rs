/* src/cache/request.rs */

use std::cell::RefCell;
use std::sync::Arc;

use futures_util::FutureExt;

#[cfg(feature = "events")]
use super::CacheEvent;
use super::slot::Slot;
use super::{Outcome, Resolution, ResourceCache};
use crate::location::Location;
use crate::mode::TriState;

impl<T> ResourceCache<T>
where
	T: Send + Sync + 'static,
{
	/// Returns the resolution for `location`, issuing its fetch on first use.
	///
	/// - No entry: the fetch is issued and the new `Pending` is returned.
	/// - `Pending`: the existing shared handle is returned; nothing is fetched.
	/// - `Resolved` / `Failed`: returned as is.
	///
	/// Never returns [`Resolution::Unstarted`].
	pub fn request(&self, location: &Location) -> Resolution<T> {
		if let Some(slot) = self.slots.load().get(location) {
			return slot.current();
		}

		let candidate = Slot::prepare(location.clone(), self);

		// Whoever got there first, if the closure's last run found an entry.
		let existing: RefCell<Option<Arc<Slot<T>>>> = RefCell::new(None);

		self.slots.rcu(|map| {
			if let Some(slot) = map.get(location) {
				*existing.borrow_mut() = Some(Arc::clone(slot));
				return Arc::clone(map);
			}
			*existing.borrow_mut() = None;
			let mut next = (**map).clone();
			next.insert(location.clone(), Arc::clone(&candidate));
			Arc::new(next)
		});

		match existing.into_inner() {
			// Lost the race; the candidate is dropped without being polled.
			Some(slot) => slot.current(),
			None => {
				let resolution = candidate.current();
				self.issue(location, &resolution);
				resolution
			}
		}
	}

	/// Suspending mode: waits for the fetch and returns its outcome.
	///
	/// A failed fetch comes back as `Err` on every call.
	pub async fn load(&self, location: &Location) -> Outcome<T> {
		self.request(location).suspend().await
	}

	/// Tri-state mode: reports the current state without waiting.
	pub fn poll(&self, location: &Location) -> TriState<T> {
		self.request(location).tri_state()
	}

	/// Spawns a freshly inserted fetch onto the cache's runtime.
	///
	/// The task owns a handle to the shared future, so the fetch runs to
	/// completion even if every caller goes away.
	fn issue(&self, location: &Location, resolution: &Resolution<T>) {
		let Resolution::Pending(pending) = resolution else {
			return;
		};

		#[cfg(feature = "events")]
		let _ = self.events.send(CacheEvent::Issued {
			location: location.clone(),
		});

		tracing::trace!(location = %location, "fetch spawned");
		self.handle.spawn(pending.clone().map(|_| ()));
	}
}
