/* src/fetch/mod.rs */

//!
//! The outbound fetch primitive.
//!
//! [`Fetch`] is what the cache calls, once per location. Hosts either implement
//! it directly, wrap an async closure with [`fetch_fn`], or compose a
//! [`Source`] with one or more [`Format`]s through [`SourceFetch`].

mod error;
pub mod format;
mod source;
mod source_fetch;

pub use error::{BuildError, FetchError};
pub use format::{AnyFormat, Format};
pub use source::MemorySource;
pub use source_fetch::{SourceFetch, SourceFetchBuilder};

#[cfg(feature = "fs")]
pub use source::FileSource;

use std::future::Future;

use async_trait::async_trait;

use crate::location::Location;

/// Retrieves and decodes the resource behind a location.
#[async_trait]
pub trait Fetch<T>: Send + Sync {
	async fn fetch(&self, location: &Location) -> Result<T, FetchError>;
}

/// Abstract data source that retrieves raw bytes by key.
#[async_trait]
pub trait Source: Send + Sync {
	async fn read(&self, key: &str) -> Result<Vec<u8>, FetchError>;
}

/// Adapter turning an async closure into a [`Fetch`].
pub struct FetchFn<F>(F);

/// Wraps `f` so it can be handed to a cache as its fetcher.
pub fn fetch_fn<F>(f: F) -> FetchFn<F> {
	FetchFn(f)
}

#[async_trait]
impl<T, F, Fut> Fetch<T> for FetchFn<F>
where
	T: Send + 'static,
	F: Fn(Location) -> Fut + Send + Sync,
	Fut: Future<Output = Result<T, FetchError>> + Send,
{
	async fn fetch(&self, location: &Location) -> Result<T, FetchError> {
		(self.0)(location.clone()).await
	}
}

/// Gate a decoded value passes before it is cached as `Resolved`.
///
/// With `validate` on, this runs `validator` rules and only types deriving
/// `Validate` qualify. Otherwise every type passes unchanged.
pub trait Checked: Sized {
	fn checked(self) -> Result<Self, FetchError>;
}

#[cfg(feature = "validate")]
impl<T: validator::Validate> Checked for T {
	fn checked(self) -> Result<Self, FetchError> {
		self.validate()?;
		Ok(self)
	}
}

#[cfg(not(feature = "validate"))]
impl<T> Checked for T {
	fn checked(self) -> Result<Self, FetchError> {
		Ok(self)
	}
}
