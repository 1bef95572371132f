use std::sync::Arc;

use crate::fetch::FetchError;
use crate::location::Location;

/// Resolution changes broadcast by a cache.
///
/// Tri-state callers can use these as their cue to poll again.
#[derive(Debug, Clone)]
pub enum CacheEvent {
	/// A fetch was issued for a fresh location.
	Issued { location: Location },
	/// The fetch resolved.
	Resolved { location: Location },
	/// The fetch failed.
	Failed {
		location: Location,
		error: Arc<FetchError>,
	},
}
