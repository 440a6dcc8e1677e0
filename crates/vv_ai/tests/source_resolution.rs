use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use vv_ai::resolve::{resolve_all, UrlResolver};
use vv_core::error::AppError;

const GATEWAY: &str = "https://vertexaisearch.cloud.google.com/grounding-api-redirect/";
const LOOKUP: Duration = Duration::from_millis(200);

/// Simulates a slow redirect lookup and records how many run at once.
struct SlowResolver {
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl UrlResolver for SlowResolver {
    fn resolve(&self, url: &str) -> Result<String, AppError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        thread::sleep(LOOKUP);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let id = url.rsplit('/').next().unwrap_or_default();
        Ok(format!("https://final.example/{id}"))
    }
}

#[test]
fn redirect_lookups_overlap_regardless_of_cpu_count() {
    let resolver = SlowResolver {
        in_flight: AtomicUsize::new(0),
        max_in_flight: AtomicUsize::new(0),
    };
    let urls: Vec<String> = (0..5).map(|i| format!("{GATEWAY}{i}")).collect();

    let started = Instant::now();
    let out = resolve_all(&resolver, urls);
    let elapsed = started.elapsed();

    let expected: Vec<String> = (0..5).map(|i| format!("https://final.example/{i}")).collect();
    assert_eq!(out, expected);
    assert!(
        resolver.max_in_flight.load(Ordering::SeqCst) >= 2,
        "lookups ran one at a time"
    );
    assert!(elapsed < LOOKUP * 5, "took {elapsed:?}");
}

#[test]
fn empty_candidate_list_resolves_to_nothing() {
    let resolver = SlowResolver {
        in_flight: AtomicUsize::new(0),
        max_in_flight: AtomicUsize::new(0),
    };
    assert!(resolve_all(&resolver, Vec::new()).is_empty());
    assert_eq!(resolver.max_in_flight.load(Ordering::SeqCst), 0);
}
