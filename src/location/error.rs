/// Errors raised while resolving a key to a location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
	/// No link is registered under the key.
	#[error("no link registered for key: {key}")]
	NotFound { key: String },
	/// A link exists but carries no href.
	#[error("link for key has an empty href: {key}")]
	EmptyHref { key: String },
}
