/* src/environment/mod.rs */

//!
//! The caller-facing handle.
//!
//! An [`Environment`] owns its [`Options`], borrows a shared
//! [`ResourceCache`] and a [`Locate`] implementation, and resolves its key to
//! a location once.

mod error;
mod options;

pub use error::EnvError;
pub use options::Options;

use std::sync::{Arc, OnceLock};

use crate::cache::ResourceCache;
use crate::location::{Locate, Location};
use crate::mode::{Suspend, TriState};

/// Result of [`Environment::access`], shaped by [`Options::suspend`].
pub enum Access<T> {
	/// Suspending mode: await for the value or the failure.
	Suspended(Suspend<T>),
	/// Tri-state mode: the current state, poll again later.
	Polled(TriState<T>),
}

/// Handle resolving one environment document through a shared cache.
pub struct Environment<T> {
	cache: Arc<ResourceCache<T>>,
	locator: Arc<dyn Locate>,
	options: Options,
	location: OnceLock<Location>,
}

impl<T> Clone for Environment<T> {
	fn clone(&self) -> Self {
		Self {
			cache: Arc::clone(&self.cache),
			locator: Arc::clone(&self.locator),
			options: self.options.clone(),
			location: self.location.clone(),
		}
	}
}

/// Builder for [`Environment`].
pub struct EnvironmentBuilder<T> {
	cache: Option<Arc<ResourceCache<T>>>,
	locator: Option<Arc<dyn Locate>>,
	options: Options,
}

impl<T> EnvironmentBuilder<T>
where
	T: Send + Sync + 'static,
{
	pub fn new() -> Self {
		Self {
			cache: None,
			locator: None,
			options: Options::default(),
		}
	}

	pub fn cache(mut self, cache: Arc<ResourceCache<T>>) -> Self {
		self.cache = Some(cache);
		self
	}

	pub fn locator(mut self, locator: impl Locate + 'static) -> Self {
		self.locator = Some(Arc::new(locator));
		self
	}

	pub fn shared_locator(mut self, locator: Arc<dyn Locate>) -> Self {
		self.locator = Some(locator);
		self
	}

	pub fn options(mut self, options: Options) -> Self {
		self.options = options;
		self
	}

	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.options.key = key.into();
		self
	}

	pub fn suspend(mut self, suspend: bool) -> Self {
		self.options.suspend = suspend;
		self
	}

	pub fn build(self) -> Result<Environment<T>, EnvError> {
		let cache = self
			.cache
			.ok_or_else(|| EnvError::Builder("cache is required".to_string()))?;
		let locator = self
			.locator
			.ok_or_else(|| EnvError::Builder("locator is required".to_string()))?;

		Ok(Environment {
			cache,
			locator,
			options: self.options,
			location: OnceLock::new(),
		})
	}
}

impl<T> Default for EnvironmentBuilder<T>
where
	T: Send + Sync + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}

impl<T> Environment<T>
where
	T: Send + Sync + 'static,
{
	pub fn builder() -> EnvironmentBuilder<T> {
		EnvironmentBuilder::new()
	}

	/// Creates a handle with default [`Options`].
	pub fn new(cache: Arc<ResourceCache<T>>, locator: impl Locate + 'static) -> Self {
		Self {
			cache,
			locator: Arc::new(locator),
			options: Options::default(),
			location: OnceLock::new(),
		}
	}

	pub fn options(&self) -> &Options {
		&self.options
	}

	pub fn cache(&self) -> &Arc<ResourceCache<T>> {
		&self.cache
	}

	/// Resolves the configured key, once per handle.
	///
	/// A failed lookup is returned as is and retried on the next call; the
	/// cache is not touched.
	pub fn location(&self) -> Result<Location, EnvError> {
		if let Some(location) = self.location.get() {
			return Ok(location.clone());
		}

		let location = self.locator.locate(&self.options.key).inspect_err(|e| {
			tracing::warn!(key = %self.options.key, error = %e, "failed to locate environment");
		})?;

		Ok(self.location.get_or_init(|| location).clone())
	}

	/// Suspending mode: waits until the environment is fetched.
	pub async fn load(&self) -> Result<Arc<T>, EnvError> {
		let location = self.location()?;
		Ok(self.cache.load(&location).await?)
	}

	/// Tri-state mode: reports without waiting.
	pub fn poll(&self) -> Result<TriState<T>, EnvError> {
		let location = self.location()?;
		Ok(self.cache.poll(&location))
	}

	/// Accesses the environment in the mode selected by [`Options::suspend`].
	pub fn access(&self) -> Result<Access<T>, EnvError> {
		let location = self.location()?;
		let resolution = self.cache.request(&location);

		Ok(if self.options.suspend {
			Access::Suspended(resolution.suspend())
		} else {
			Access::Polled(resolution.tri_state())
		})
	}
}
