/// Failure of a single fetch attempt.
///
/// A failed attempt is cached for the life of its location, so the error is
/// shared behind an `Arc` by every caller that observes it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
	/// Nothing exists at the location.
	#[error("resource not found: {location}")]
	NotFound { location: String },

	/// The payload could not be decoded.
	#[error("parse error: {0}")]
	Parse(String),

	/// No registered format handles the location's extension.
	#[error("unsupported format: {0}")]
	UnsupportedFormat(String),

	/// The transport gave up waiting.
	#[error("timed out fetching {location}")]
	Timeout { location: String },

	/// The transport failed for another reason.
	#[error("transport error: {0}")]
	Transport(String),

	/// IO error from a source.
	#[error("io error: {0}")]
	Io(#[from] std::io::Error),

	/// The location escapes the root of a file system source.
	#[cfg(feature = "fs")]
	#[error("sandbox violation: {location}")]
	SandboxViolation { location: String },

	/// The payload decoded but failed validation.
	#[cfg(feature = "validate")]
	#[error("validation failed: {0}")]
	Validation(#[from] validator::ValidationErrors),
}

/// Errors raised by [`SourceFetchBuilder::build`](super::SourceFetchBuilder::build).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
	#[error("a source is required")]
	MissingSource,
	#[error("at least one format is required")]
	NoFormats,
}
