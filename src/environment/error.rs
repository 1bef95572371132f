/* src/environment/error.rs */

use std::sync::Arc;

use thiserror::Error;

use crate::fetch::FetchError;
use crate::location::LocateError;

/// Errors surfaced by an [`Environment`](super::Environment).
#[derive(Debug, Clone, Error)]
pub enum EnvError {
	/// The key could not be resolved to a location. Never cached.
	#[error("locate error: {0}")]
	Locate(#[from] LocateError),

	/// The fetch for the resolved location failed. Cached for good.
	#[error("fetch error: {0}")]
	Fetch(#[from] Arc<FetchError>),

	#[error("builder error: {0}")]
	Builder(String),
}

impl EnvError {
	/// The cached fetch failure, if this is one.
	pub fn fetch_error(&self) -> Option<&FetchError> {
		match self {
			Self::Fetch(error) => Some(error.as_ref()),
			_ => None,
		}
	}
}
