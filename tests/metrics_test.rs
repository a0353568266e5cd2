//! Tests for metrics integration.
//!
//! Uses `metrics_util::debugging::DebuggingRecorder` to capture and
//! assert on emitted metrics without needing a real exporter.

use std::time::Duration;

use metrics_util::MetricKind;
use metrics_util::debugging::{DebugValue, DebuggingRecorder};

use larder::cache::{ListCache, fingerprint};
use larder::telemetry;
use larder::types::RecipeSummary;

type SnapshotVec = Vec<(
    metrics_util::CompositeKey,
    Option<metrics::Unit>,
    Option<metrics::SharedString>,
    DebugValue,
)>;

/// Sum all counter values matching a given metric name.
fn counter_total(snapshot: &SnapshotVec, name: &str) -> u64 {
    snapshot
        .iter()
        .filter(|(key, _, _, _)| key.kind() == MetricKind::Counter && key.key().name() == name)
        .map(|(_, _, _, value)| match value {
            DebugValue::Counter(v) => *v,
            _ => 0,
        })
        .sum()
}

fn summary(id: u64, title: &str) -> RecipeSummary {
    RecipeSummary {
        id,
        title: title.into(),
        image: None,
        used_ingredient_count: 0,
        missed_ingredient_count: 0,
        ready_in_minutes: None,
        servings: None,
        source_url: None,
    }
}

/// Runs async code within a local recorder scope on the multi-thread
/// runtime. `block_in_place` keeps the sync `with_local_recorder`
/// closure on the current thread while `block_on` drives the async work.
#[tokio::test(flavor = "multi_thread", worker_threads = 1)]
async fn list_cache_records_miss_and_hit_counters() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async {
                let dir = tempfile::tempdir().unwrap();
                let cache = ListCache::new(
                    dir.path().join("store.json"),
                    Duration::from_secs(3600),
                );
                let key = fingerprint(&["egg".to_string()], None, 10);

                assert!(cache.get(&key).await.is_none());
                cache.put(&key, vec![summary(1, "Omelette")]).await;
                assert!(cache.get(&key).await.is_some());
            })
        })
    });

    let snapshot = snapshotter.snapshot().into_vec();
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_MISSES_TOTAL), 1);
    assert_eq!(counter_total(&snapshot, telemetry::CACHE_HITS_TOTAL), 1);
}

#[tokio::test]
async fn metrics_are_noop_without_recorder() {
    // Verify no panics when no recorder is installed.
    let dir = tempfile::tempdir().unwrap();
    let cache = ListCache::new(dir.path().join("store.json"), Duration::from_secs(60));
    let key = fingerprint(&["egg".to_string()], None, 10);
    assert!(cache.get(&key).await.is_none());
}
