//! Concurrent dedup: many creators, one stored group.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::{Arc, Barrier};
use std::thread;

use metricstore_core::LabelSet;
use metricstore_registry::{MetricGroup, Registry};

#[test]
fn threads_race_on_same_identity() {
    const THREADS: usize = 16;
    let reg = Arc::new(Registry::new());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let reg = Arc::clone(&reg);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // alternate insertion order; identity must not care
                let labels = if i % 2 == 0 {
                    LabelSet::new().with("cluster", "backend").with("host", "a")
                } else {
                    LabelSet::new().with("host", "a").with("cluster", "backend")
                };
                barrier.wait();
                let g = reg.get_or_create("upstream", labels).unwrap();
                g.counter("requests").inc(1);
                g
            })
        })
        .collect();

    let groups: Vec<Arc<MetricGroup>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(reg.len(), 1);
    assert!(groups.iter().all(|g| Arc::ptr_eq(g, &groups[0])));
    assert_eq!(groups[0].counter("requests").count(), THREADS as i64);
}

#[test]
fn concurrent_instrument_creation_on_one_group() {
    const THREADS: usize = 8;
    const PER_THREAD: i64 = 1000;
    let reg = Registry::new();
    let g = reg.get_or_create("server", LabelSet::new()).unwrap();

    thread::scope(|s| {
        for _ in 0..THREADS {
            let g = &g;
            s.spawn(move || {
                for _ in 0..PER_THREAD {
                    g.counter("hits").inc(1);
                    g.histogram("latency").update(5);
                }
            });
        }
    });

    assert_eq!(g.counter("hits").count(), THREADS as i64 * PER_THREAD);
    assert_eq!(g.histogram("latency").count(), THREADS as u64 * PER_THREAD as u64);
    assert_eq!(g.histogram("latency").sample_len(), 100);
    assert_eq!(g.len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn tasks_share_groups() {
    let reg = Arc::new(Registry::new());

    let mut tasks = Vec::new();
    for i in 0..64 {
        let reg = Arc::clone(&reg);
        tasks.push(tokio::spawn(async move {
            let host = format!("h{}", i % 4);
            let g = reg
                .get_or_create("upstream", LabelSet::from([("host", host.as_str())]))
                .unwrap();
            g.counter("requests").inc(1);
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }

    let groups = reg.enumerate();
    assert_eq!(groups.len(), 4);
    let total: i64 = groups.iter().map(|g| g.counter("requests").count()).sum();
    assert_eq!(total, 64);
    assert!(groups.iter().all(|g| g.counter("requests").count() == 16));
}

#[test]
fn enumerate_while_creating() {
    let reg = Registry::new();

    thread::scope(|s| {
        s.spawn(|| {
            for i in 0..500 {
                let id = i.to_string();
                reg.get_or_create("t", LabelSet::from([("i", id.as_str())]))
                    .unwrap();
            }
        });
        s.spawn(|| {
            let mut last = 0;
            for _ in 0..200 {
                let n = reg.enumerate().len();
                assert!(n >= last);
                last = n;
            }
        });
    });

    assert_eq!(reg.len(), 500);
}
