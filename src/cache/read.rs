/* src/cache/read.rs */

use super::{Resolution, ResourceCache};
use crate::location::Location;

impl<T> ResourceCache<T> {
	/// Current resolution for `location` without issuing anything.
	pub fn peek(&self, location: &Location) -> Resolution<T> {
		self.slots
			.load()
			.get(location)
			.map_or(Resolution::Unstarted, |slot| slot.current())
	}

	/// Returns every location that has been requested.
	pub fn locations(&self) -> Vec<Location> {
		self.slots.load().keys().cloned().collect()
	}

	/// Returns the number of requested locations.
	pub fn len(&self) -> usize {
		self.slots.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.load().is_empty()
	}

	/// Subscribes to resolution events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<super::CacheEvent> {
		self.events.subscribe()
	}
}
