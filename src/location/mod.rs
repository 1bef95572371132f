/* src/location/mod.rs */

//!
//! Key to location resolution.
//!
//! The lookup itself belongs to the host; this module only fixes the contract
//! ([`Locate`]) and ships an in-memory [`LinkTable`].

mod error;
mod table;

pub use error::LocateError;
pub use table::LinkTable;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key resolved when the caller supplies no override.
pub const DEFAULT_KEY: &str = "environment";

/// Opaque address of a fetchable resource, used as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
	pub fn new(href: impl Into<String>) -> Self {
		Self(href.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The location without its query string or fragment.
	pub fn path(&self) -> &str {
		let end = self.0.find(['?', '#']).unwrap_or(self.0.len());
		&self.0[..end]
	}

	/// Extension of the last path segment, if any.
	///
	/// The `scheme://authority` part of an absolute URL is not a path, so a
	/// bare host such as `https://cdn.example.com` has no extension.
	pub fn extension(&self) -> Option<&str> {
		let mut path = self.path();
		if let Some((_, rest)) = path.split_once("://") {
			path = rest.find('/').map_or("", |idx| &rest[idx..]);
		}
		let segment = path.rsplit('/').next().unwrap_or(path);
		match segment.rfind('.') {
			Some(0) | None => None,
			Some(idx) => Some(&segment[idx + 1..]),
		}
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for Location {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Location {
	fn from(href: &str) -> Self {
		Self::new(href)
	}
}

impl From<String> for Location {
	fn from(href: String) -> Self {
		Self(href)
	}
}

/// Resolves a logical key to the location of its resource.
///
/// Implementations are supplied by the host. Any closure of the shape
/// `Fn(&str) -> Result<Location, LocateError>` qualifies.
pub trait Locate: Send + Sync {
	fn locate(&self, key: &str) -> Result<Location, LocateError>;
}

impl<F> Locate for F
where
	F: Fn(&str) -> Result<Location, LocateError> + Send + Sync,
{
	fn locate(&self, key: &str) -> Result<Location, LocateError> {
		self(key)
	}
}
