/* demos/basic.rs */

use envlink::fetch::{AnyFormat, FileSource, SourceFetch};
use envlink::{Access, Environment, LinkTable, ResourceCache};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Deserialize, validator::Validate)]
struct RuntimeEnv {
	#[validate(length(min = 1))]
	stage: String,
	api_url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 0. Publish an environment document under a temporary site root.
	let site = tempfile::tempdir()?;
	tokio::fs::write(
		site.path().join("env.json"),
		br#"{"stage": "prod", "api_url": "https://api.example.com"}"#,
	)
	.await?;

	// 1. Links the host page would carry.
	let links: LinkTable = [("environment", "/env.json")].into_iter().collect();

	// 2. One cache for the whole process.
	let fetch = SourceFetch::builder()
		.source(FileSource::new(site.path()))
		.format(AnyFormat::Json)
		.build()?;
	let cache = Arc::new(ResourceCache::<RuntimeEnv>::new(fetch)?);
	let links = Arc::new(links);

	// 3. A polling handle sees the fetch in flight.
	let polling = Environment::builder()
		.cache(Arc::clone(&cache))
		.shared_locator(links.clone())
		.suspend(false)
		.build()?;
	if let Access::Polled(state) = polling.access()? {
		println!("Polled first: pending = {}", state.is_pending());
	}

	// 4. A suspending handle waits for it.
	let suspending = Environment::builder()
		.cache(cache)
		.shared_locator(links)
		.build()?;
	let env = suspending.load().await?;
	println!("Loaded: {:?}", env);

	// 5. The poller now sees the same value without another fetch.
	tokio::time::sleep(Duration::from_millis(10)).await;
	let (value, pending, error) = polling.poll()?.into_parts();
	println!(
		"Polled again: value = {:?}, pending = {}, error = {:?}",
		value.map(|v| v.stage.clone()),
		pending,
		error
	);

	Ok(())
}
