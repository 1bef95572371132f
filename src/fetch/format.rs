/* src/fetch/format.rs */

use serde::de::DeserializeOwned;

use super::FetchError;

/// Parser turning raw bytes into a structured value.
pub trait Format: Send + Sync {
	/// Extensions this format claims, lowercase, without the dot.
	fn extensions(&self) -> &'static [&'static str];

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FetchError>;
}

fn parse_error(e: impl std::fmt::Display) -> FetchError {
	FetchError::Parse(e.to_string())
}

/// JSON via `serde_json`.
#[cfg(feature = "json")]
pub struct Json;

#[cfg(feature = "json")]
impl Format for Json {
	fn extensions(&self) -> &'static [&'static str] {
		&["json"]
	}

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FetchError> {
		serde_json::from_slice(input).map_err(parse_error)
	}
}

/// TOML via `toml`.
#[cfg(feature = "toml")]
pub struct Toml;

#[cfg(feature = "toml")]
impl Format for Toml {
	fn extensions(&self) -> &'static [&'static str] {
		&["toml"]
	}

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FetchError> {
		let text = std::str::from_utf8(input).map_err(parse_error)?;
		toml::from_str(text).map_err(parse_error)
	}
}

/// YAML via `serde_yaml`.
#[cfg(feature = "yaml")]
pub struct Yaml;

#[cfg(feature = "yaml")]
impl Format for Yaml {
	fn extensions(&self) -> &'static [&'static str] {
		&["yaml", "yml"]
	}

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FetchError> {
		serde_yaml::from_slice(input).map_err(parse_error)
	}
}

/// Postcard binary via `postcard`.
#[cfg(feature = "postcard")]
pub struct Postcard;

#[cfg(feature = "postcard")]
impl Format for Postcard {
	fn extensions(&self) -> &'static [&'static str] {
		&["bin", "post"]
	}

	fn parse<T: DeserializeOwned>(&self, input: &[u8]) -> Result<T, FetchError> {
		postcard::from_bytes(input).map_err(parse_error)
	}
}

/// Every compiled-in format behind one value type, so a fetcher can hold a list.
///
/// With no format feature enabled the enum is empty and cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyFormat {
	#[cfg(feature = "json")]
	Json,
	#[cfg(feature = "toml")]
	Toml,
	#[cfg(feature = "yaml")]
	Yaml,
	#[cfg(feature = "postcard")]
	Postcard,
}

impl AnyFormat {
	/// Short name used in logs.
	pub fn name(self) -> &'static str {
		self.extensions()[0]
	}

	pub fn extensions(self) -> &'static [&'static str] {
		match self {
			#[cfg(feature = "json")]
			Self::Json => Json.extensions(),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.extensions(),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.extensions(),
			#[cfg(feature = "postcard")]
			Self::Postcard => Postcard.extensions(),
		}
	}

	/// Whether this format claims `ext` (case-insensitive).
	pub fn handles(self, ext: &str) -> bool {
		self.extensions()
			.iter()
			.any(|known| known.eq_ignore_ascii_case(ext))
	}

	/// Decodes `input` with the underlying parser.
	pub fn decode<T: DeserializeOwned>(self, input: &[u8]) -> Result<T, FetchError> {
		match self {
			#[cfg(feature = "json")]
			Self::Json => Json.parse(input),
			#[cfg(feature = "toml")]
			Self::Toml => Toml.parse(input),
			#[cfg(feature = "yaml")]
			Self::Yaml => Yaml.parse(input),
			#[cfg(feature = "postcard")]
			Self::Postcard => Postcard.parse(input),
		}
	}
}

#[cfg(all(test, feature = "json"))]
mod tests {
	use super::*;

	#[test]
	fn handles_is_case_insensitive() {
		assert!(AnyFormat::Json.handles("JSON"));
		assert!(!AnyFormat::Json.handles("toml"));
	}

	#[test]
	fn name_is_primary_extension() {
		assert_eq!(AnyFormat::Json.name(), "json");
	}

	#[test]
	fn json_parse_error_is_reported() {
		let err = Json.parse::<serde_json::Value>(b"{not json").unwrap_err();
		assert!(matches!(err, FetchError::Parse(_)));
	}
}
