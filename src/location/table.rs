/* src/location/table.rs */

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use super::{Locate, LocateError, Location};

/// In-memory registry of link keys and their hrefs.
///
/// Reads are wait-free; registrations replace the map with RCU.
#[derive(Debug, Default)]
pub struct LinkTable {
	links: ArcSwap<HashMap<String, String>>,
}

impl LinkTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a link, returning the href it replaced.
	pub fn register(&self, key: impl Into<String>, href: impl Into<String>) -> Option<String> {
		let key = key.into();
		let href = href.into();
		let previous: RefCell<Option<String>> = RefCell::new(None);

		self.links.rcu(|map| {
			let mut next = (**map).clone();
			*previous.borrow_mut() = next.insert(key.clone(), href.clone());
			next
		});

		previous.into_inner()
	}

	/// Removes a link, returning its href.
	pub fn unregister(&self, key: &str) -> Option<String> {
		let removed: RefCell<Option<String>> = RefCell::new(None);

		self.links.rcu(|map| {
			let mut next = (**map).clone();
			*removed.borrow_mut() = next.remove(key);
			next
		});

		removed.into_inner()
	}

	pub fn get(&self, key: &str) -> Option<String> {
		self.links.load().get(key).cloned()
	}

	pub fn len(&self) -> usize {
		self.links.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.links.load().is_empty()
	}
}

impl Locate for LinkTable {
	fn locate(&self, key: &str) -> Result<Location, LocateError> {
		let links = self.links.load();
		match links.get(key) {
			None => Err(LocateError::NotFound {
				key: key.to_string(),
			}),
			Some(href) if href.trim().is_empty() => Err(LocateError::EmptyHref {
				key: key.to_string(),
			}),
			Some(href) => Ok(Location::new(href.as_str())),
		}
	}
}

impl<K, V> FromIterator<(K, V)> for LinkTable
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let map: HashMap<String, String> = iter
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();
		Self {
			links: ArcSwap::new(Arc::new(map)),
		}
	}
}
