/* src/fetch/source_fetch.rs */

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{AnyFormat, BuildError, Checked, Fetch, FetchError, Source};
use crate::location::Location;

/// A [`Fetch`] that reads bytes from a [`Source`] and decodes them with the
/// format matching the location's extension.
///
/// A location without an extension is decoded with the first registered format.
pub struct SourceFetch {
	source: Box<dyn Source>,
	formats: Vec<AnyFormat>,
}

/// Collects a source and its accepted formats for a [`SourceFetch`].
#[derive(Default)]
pub struct SourceFetchBuilder {
	source: Option<Box<dyn Source>>,
	formats: Vec<AnyFormat>,
}

impl SourceFetchBuilder {
	pub fn source(mut self, source: impl Source + 'static) -> Self {
		self.source = Some(Box::new(source));
		self
	}

	/// Accepts `format`; the first one accepted decodes extensionless locations.
	pub fn format(self, format: AnyFormat) -> Self {
		self.formats([format])
	}

	pub fn formats(mut self, formats: impl IntoIterator<Item = AnyFormat>) -> Self {
		for format in formats {
			if !self.formats.contains(&format) {
				self.formats.push(format);
			}
		}
		self
	}

	pub fn build(self) -> Result<SourceFetch, BuildError> {
		let source = self.source.ok_or(BuildError::MissingSource)?;
		if self.formats.is_empty() {
			return Err(BuildError::NoFormats);
		}
		Ok(SourceFetch {
			source,
			formats: self.formats,
		})
	}
}

impl SourceFetch {
	/// A fetch over `source` accepting a single format.
	pub fn new(source: impl Source + 'static, format: AnyFormat) -> Self {
		Self {
			source: Box::new(source),
			formats: vec![format],
		}
	}

	pub fn builder() -> SourceFetchBuilder {
		SourceFetchBuilder::default()
	}

	/// Picks the format for `location`.
	pub fn select(&self, location: &Location) -> Result<AnyFormat, FetchError> {
		let Some(ext) = location.extension() else {
			#[cfg(feature = "logging")]
			log::debug!(
				"No extension on '{}', decoding as {}",
				location,
				self.formats[0].name()
			);
			return Ok(self.formats[0]);
		};

		self.formats
			.iter()
			.copied()
			.find(|format| format.handles(ext))
			.ok_or_else(|| FetchError::UnsupportedFormat(ext.to_string()))
	}
}

#[async_trait]
impl<T> Fetch<T> for SourceFetch
where
	T: DeserializeOwned + Checked + Send + 'static,
{
	async fn fetch(&self, location: &Location) -> Result<T, FetchError> {
		let format = self.select(location)?;
		let bytes = self.source.read(location.as_str()).await?;

		let value = format.decode::<T>(&bytes).inspect_err(|_e| {
			#[cfg(feature = "logging")]
			log::error!("Failed to decode '{}' as {}: {}", location, format.name(), _e);
		})?;

		#[cfg(feature = "logging")]
		log::info!("Fetched '{}' ({} bytes, {})", location, bytes.len(), format.name());

		value.checked()
	}
}
