use sheaf::{BatchCollector, BatchConfig, testing::RecordingSink, timer::TokioTimer};
use std::{collections::HashSet, sync::Arc, thread, time::Duration};

mod common;

// Producers on plain threads, timer callbacks on tokio workers: every payload
// must come out exactly once.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_timer_and_size_releases_race_without_loss() {
    common::init_tracing();

    let sink: RecordingSink<u64> = RecordingSink::new();
    let collector = Arc::new(BatchCollector::new(
        BatchConfig::new(5, 1).unwrap(),
        sink.clone(),
        TokioTimer::current().unwrap(),
    ));

    let producers: Vec<_> = (0..4u64)
        .map(|p| {
            let collector = Arc::clone(&collector);
            thread::spawn(move || {
                for i in 0..200u64 {
                    collector.accept(p * 1_000 + i).unwrap();
                    if i % 17 == 0 {
                        thread::sleep(Duration::from_micros(300));
                    }
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    // Let the last window's timer fire.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let batches = sink.batches();
    assert!(batches.iter().all(|b| !b.is_empty() && b.len() <= 5));

    let released: Vec<u64> = batches.into_iter().flatten().collect();
    assert_eq!(released.len(), 800);
    let unique: HashSet<u64> = released.iter().copied().collect();
    assert_eq!(unique.len(), 800);
    assert!(collector.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_racing_timer_never_double_releases() {
    for _ in 0..50 {
        let sink: RecordingSink<u32> = RecordingSink::new();
        let collector = BatchCollector::new(
            BatchConfig::millis(1).unwrap(),
            sink.clone(),
            TokioTimer::current().unwrap(),
        );

        collector.accept(1).unwrap();
        tokio::time::sleep(Duration::from_micros(900)).await;
        collector.shutdown();
        tokio::time::sleep(Duration::from_millis(3)).await;

        // Either the timer won and released once, or teardown won and nothing was released.
        assert!(sink.count() <= 1);
        if let Some(batch) = sink.batches().first() {
            assert_eq!(batch, &vec![1]);
        }
    }
}
