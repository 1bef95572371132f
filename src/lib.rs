/* src/lib.rs */

//!
//! Resolves a linked environment document exactly once per location and
//! hands it to callers in one of two ways.
//!
//! - **location**: maps a logical key (default `"environment"`) to a [`Location`].
//! - **fetch**: the outbound fetch primitive plus source/format building blocks.
//! - **cache**: the per-location resolution state machine (`ResourceCache`).
//! - **mode**: suspending (`await`) and tri-state (`poll`) consumption.
//! - **environment**: the caller-facing handle integrating the above (`Environment`).
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features.
//! - `events`: Enables resolution event broadcasting on `ResourceCache`.
//! - `fs`: Enables `FileSource`.
//! - `json` (default), `toml`, `yaml`, `postcard`: Payload formats.
//! - `validate`: Validation of fetched payloads.
//! - `logging`: Emits `log` records from `SourceFetch`.
//!
//! ## Basic Usage
//!
//! ```ignore
//! let links: LinkTable = [("environment", "/env.json")].into_iter().collect();
//! let cache = Arc::new(ResourceCache::new(fetcher)?);
//! let env = Environment::<Settings>::builder()
//! 	.cache(cache)
//! 	.locator(links)
//! 	.build()?;
//!
//! let settings = env.load().await?;
//! ```

pub mod cache;
pub mod environment;
pub mod fetch;
pub mod location;
pub mod mode;

pub use cache::{CacheError, Outcome, Pending, Resolution, ResourceCache};
#[cfg(feature = "events")]
pub use cache::{CacheEvent, DEFAULT_EVENT_CAPACITY};
pub use environment::{Access, EnvError, Environment, EnvironmentBuilder, Options};
pub use fetch::{Fetch, FetchError, fetch_fn};
pub use location::{DEFAULT_KEY, LinkTable, Locate, LocateError, Location};
pub use mode::{Suspend, TriState};
