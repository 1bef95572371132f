/* src/fetch/source/file.rs */

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::super::{FetchError, Source};

/// File system source rooted at a directory.
///
/// Keys are resolved relative to the root; a leading `/` (as in a
/// site-relative href like `/env.json`) is treated as the root itself.
/// Query strings and fragments are ignored.
#[derive(Debug, Clone)]
pub struct FileSource {
	root: PathBuf,
}

impl FileSource {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	async fn resolve_secure(&self, key: &str) -> Result<PathBuf, FetchError> {
		let end = key.find(['?', '#']).unwrap_or(key.len());
		let relative = key[..end].trim_start_matches('/');

		let violation = || FetchError::SandboxViolation {
			location: key.to_string(),
		};

		if Path::new(relative)
			.components()
			.any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
		{
			return Err(violation());
		}

		let canonical_root = fs::canonicalize(&self.root).await?;

		match fs::canonicalize(self.root.join(relative)).await {
			Ok(path) if path.starts_with(&canonical_root) => Ok(path),
			Ok(_) => Err(violation()),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::NotFound {
				location: key.to_string(),
			}),
			Err(e) => Err(FetchError::Io(e)),
		}
	}
}

#[async_trait]
impl Source for FileSource {
	async fn read(&self, key: &str) -> Result<Vec<u8>, FetchError> {
		let path = self.resolve_secure(key).await?;
		Ok(fs::read(path).await?)
	}
}
