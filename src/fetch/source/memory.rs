/* src/fetch/source/memory.rs */

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::super::{FetchError, Source};

/// In-memory source keyed by location, for tests and embedded payloads.
#[derive(Debug, Default)]
pub struct MemorySource {
	data: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
		self.data.insert(key.into(), value.into());
	}

	/// Builder-style [`insert`](Self::insert).
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
		self.insert(key, value);
		self
	}
}

#[async_trait]
impl Source for MemorySource {
	async fn read(&self, key: &str) -> Result<Vec<u8>, FetchError> {
		self.data
			.get(key)
			.cloned()
			.ok_or_else(|| FetchError::NotFound {
				location: key.to_string(),
			})
	}
}
