/* src/environment/options.rs */

use serde::{Deserialize, Serialize};

use crate::location::DEFAULT_KEY;

/// How an [`Environment`](super::Environment) resolves and hands out its value.
///
/// Deserializes from any supported format; missing fields take their defaults.
/// The camel-case names `linkId` and `suspense` are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
	/// Key resolved to the location to fetch.
	#[serde(alias = "linkId", alias = "link_id")]
	pub key: String,
	/// `true` selects suspending mode, `false` tri-state mode.
	#[serde(alias = "suspense")]
	pub suspend: bool,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			key: DEFAULT_KEY.to_string(),
			suspend: true,
		}
	}
}

impl Options {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.key = key.into();
		self
	}

	pub fn suspend(mut self, suspend: bool) -> Self {
		self.suspend = suspend;
		self
	}
}

#[cfg(all(test, feature = "json"))]
mod tests {
	use super::*;

	#[test]
	fn empty_object_uses_defaults() {
		let options: Options = serde_json::from_str("{}").unwrap();
		assert_eq!(options, Options::default());
		assert_eq!(options.key, "environment");
		assert!(options.suspend);
	}

	#[test]
	fn accepts_link_id_and_suspense() {
		let options: Options =
			serde_json::from_str(r#"{"linkId": "runtime-config", "suspense": false}"#).unwrap();
		assert_eq!(options.key, "runtime-config");
		assert!(!options.suspend);
	}
}
