/// Errors raised while building a [`ResourceCache`](super::ResourceCache).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
	/// Built outside a tokio runtime without an explicit handle.
	#[error("no tokio runtime to drive fetches; build inside one or use with_handle")]
	NoRuntime,
}
