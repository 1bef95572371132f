/* tests/cache_tests.rs */

#![cfg(feature = "json")]

use envlink::{CacheError, FetchError, Location, Resolution, ResourceCache, fetch_fn};
use futures_util::FutureExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// A cache whose fetch takes `delay` and then yields `result`, counting calls.
fn delayed_cache(
	delay: Duration,
	result: fn(&Location) -> Result<Value, FetchError>,
) -> (Arc<ResourceCache<Value>>, Arc<AtomicUsize>) {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);

	let cache = ResourceCache::new(fetch_fn(move |location: Location| {
		let counter = Arc::clone(&counter);
		async move {
			counter.fetch_add(1, Ordering::SeqCst);
			tokio::time::sleep(delay).await;
			result(&location)
		}
	}))
	.unwrap();

	(Arc::new(cache), calls)
}

fn prod(_: &Location) -> Result<Value, FetchError> {
	Ok(json!({ "stage": "prod" }))
}

fn timeout(location: &Location) -> Result<Value, FetchError> {
	Err(FetchError::Timeout {
		location: location.to_string(),
	})
}

#[tokio::test(start_paused = true)]
async fn test_pending_then_resolved_with_single_fetch() {
	let (cache, calls) = delayed_cache(Duration::from_millis(10), prod);
	let location = Location::new("/env.json");

	// t = 0ms
	let (value, pending, error) = cache.poll(&location).into_parts();
	assert!(value.is_none());
	assert!(pending);
	assert!(error.is_none());

	// t = 5ms
	tokio::time::sleep(Duration::from_millis(5)).await;
	let (value, pending, error) = cache.poll(&location).into_parts();
	assert!(value.is_none());
	assert!(pending);
	assert!(error.is_none());
	assert_eq!(calls.load(Ordering::SeqCst), 1);

	// t = 15ms
	tokio::time::sleep(Duration::from_millis(10)).await;
	let (value, pending, error) = cache.poll(&location).into_parts();
	assert_eq!(value.as_deref(), Some(&json!({ "stage": "prod" })));
	assert!(!pending);
	assert!(error.is_none());

	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failure_is_cached_and_surfaced_in_both_modes() {
	let (cache, calls) = delayed_cache(Duration::from_millis(10), timeout);
	let location = Location::new("/env.json");

	let err = cache.load(&location).await.unwrap_err();
	assert!(matches!(*err, FetchError::Timeout { .. }));

	let (value, pending, error) = cache.poll(&location).into_parts();
	assert!(value.is_none());
	assert!(!pending);
	let error = error.expect("tri-state error");
	assert!(Arc::ptr_eq(&error, &err));

	// Still failed, still not refetched.
	let again = cache.load(&location).await.unwrap_err();
	assert!(Arc::ptr_eq(&again, &err));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_resolution_is_monotonic() {
	let (cache, _calls) = delayed_cache(Duration::from_millis(10), prod);
	let location = Location::new("/env.json");

	assert!(matches!(cache.peek(&location), Resolution::Unstarted));
	assert!(cache.is_empty());

	let first = cache.request(&location);
	assert!(first.is_pending());
	assert!(cache.peek(&location).is_pending());
	assert_eq!(cache.len(), 1);

	tokio::time::sleep(Duration::from_millis(20)).await;

	let settled = cache.peek(&location);
	assert!(settled.is_settled());
	assert_eq!(settled.value().map(|v| v["stage"].clone()), Some(json!("prod")));

	// A handle taken while pending yields the same value after settlement.
	let Resolution::Pending(pending) = first else {
		panic!("first request must be pending");
	};
	let late = pending.await.unwrap();
	assert!(Arc::ptr_eq(&late, settled.value().unwrap()));
	assert!(cache.request(&location).is_settled());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_one_fetch() {
	let (cache, calls) = delayed_cache(Duration::from_millis(20), prod);
	let location = Location::new("https://config.example.com/env.json");

	let mut handles = Vec::new();
	for _ in 0..32 {
		let cache = Arc::clone(&cache);
		let location = location.clone();
		handles.push(tokio::spawn(async move { cache.load(&location).await }));
	}

	let mut values = Vec::new();
	for handle in handles {
		values.push(handle.await.unwrap().unwrap());
	}

	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert!(values.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
	assert_eq!(cache.locations(), vec![location]);
}

#[tokio::test(start_paused = true)]
async fn test_locations_are_independent() {
	let (cache, calls) = delayed_cache(Duration::from_millis(5), prod);

	cache.load(&Location::new("/a.json")).await.unwrap();
	cache.load(&Location::new("/b.json")).await.unwrap();
	cache.load(&Location::new("/a.json")).await.unwrap();

	assert_eq!(calls.load(Ordering::SeqCst), 2);
	assert_eq!(cache.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_initiator_still_settles() {
	let (cache, calls) = delayed_cache(Duration::from_millis(10), prod);
	let location = Location::new("/env.json");

	drop(cache.request(&location));

	tokio::time::sleep(Duration::from_millis(50)).await;

	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert!(cache.peek(&location).value().is_some());
}

#[test]
fn test_new_outside_runtime_is_rejected() {
	let result: Result<ResourceCache<Value>, _> =
		ResourceCache::new(fetch_fn(|_location: Location| async {
			Ok::<_, FetchError>(json!({}))
		}));
	assert!(matches!(result, Err(CacheError::NoRuntime)));
}

#[test]
fn test_tri_state_settles_when_polled_off_runtime() {
	let runtime = tokio::runtime::Builder::new_multi_thread()
		.worker_threads(1)
		.enable_all()
		.build()
		.unwrap();

	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let fetcher = fetch_fn(move |_location: Location| {
		let counter = Arc::clone(&counter);
		async move {
			counter.fetch_add(1, Ordering::SeqCst);
			tokio::time::sleep(Duration::from_millis(10)).await;
			Ok::<_, FetchError>(json!({ "stage": "dev" }))
		}
	});
	let cache: ResourceCache<Value> = ResourceCache::with_handle(Arc::new(fetcher), runtime.handle().clone());
	let location = Location::new("/env.json");

	// This thread never enters the runtime; polling alone must get the fetch settled.
	let mut state = cache.poll(&location);
	for _ in 0..200 {
		if !state.is_pending() {
			break;
		}
		std::thread::sleep(Duration::from_millis(5));
		state = cache.poll(&location);
	}

	let (value, pending, error) = state.into_parts();
	assert!(!pending);
	assert!(error.is_none());
	assert_eq!(value.unwrap()["stage"], "dev");
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_suspending_caller_waits_while_in_flight() {
	let (cache, calls) = delayed_cache(Duration::from_millis(10), prod);
	let location = Location::new("/env.json");

	// t = 0ms: the first poll issues the fetch and has nothing to return.
	let mut wait = Box::pin(cache.load(&location));
	assert!(wait.as_mut().now_or_never().is_none());

	// t = 5ms: still in flight, still waiting.
	tokio::time::sleep(Duration::from_millis(5)).await;
	assert!(wait.as_mut().now_or_never().is_none());
	assert_eq!(calls.load(Ordering::SeqCst), 1);

	// t = 15ms: the same future yields the value.
	tokio::time::sleep(Duration::from_millis(10)).await;
	let value = wait.await.unwrap();
	assert_eq!(*value, json!({ "stage": "prod" }));
	assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[cfg(feature = "events")]
#[tokio::test(start_paused = true)]
async fn test_events_follow_resolution() {
	use envlink::CacheEvent;

	let (cache, _calls) = delayed_cache(Duration::from_millis(10), timeout);
	let mut events = cache.subscribe();
	let location = Location::new("/env.json");

	assert!(cache.poll(&location).is_pending());

	match events.recv().await.unwrap() {
		CacheEvent::Issued { location: issued } => assert_eq!(issued, location),
		other => panic!("expected Issued, got {other:?}"),
	}
	match events.recv().await.unwrap() {
		CacheEvent::Failed { location: failed, error } => {
			assert_eq!(failed, location);
			assert!(matches!(*error, FetchError::Timeout { .. }));
		}
		other => panic!("expected Failed, got {other:?}"),
	}

	// Settled locations emit nothing further.
	assert!(cache.poll(&location).error().is_some());
	assert!(events.try_recv().is_err());
}
