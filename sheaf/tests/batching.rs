use sheaf::CollectorState;
use std::time::Duration;
use tokio::time::sleep;

mod common;
use common::{manual_collector, reading, tokio_collector};

#[tokio::test(start_paused = true)]
async fn test_size_only_abandons_trailing_message() {
    let (collector, sink) = tokio_collector(2, 0);

    collector.accept("msg").unwrap();
    assert_eq!(sink.count(), 0);
    collector.accept("msg").unwrap();
    assert_eq!(sink.count(), 1);
    collector.accept("msg").unwrap();
    assert_eq!(sink.count(), 1);
    collector.accept("msg").unwrap();
    assert_eq!(sink.count(), 2);
    collector.accept("lost in the ether").unwrap();

    sleep(Duration::from_millis(10)).await;
    assert_eq!(sink.count(), 2);

    drop(collector);
    assert_eq!(sink.count(), 2);
    assert_eq!(sink.batches(), vec![vec!["msg", "msg"], vec!["msg", "msg"]]);
}

#[tokio::test(start_paused = true)]
async fn test_size_or_timeout() {
    let (collector, sink) = tokio_collector(2, 10);

    collector.accept("msg").unwrap();
    assert_eq!(sink.count(), 0);
    collector.accept("msg").unwrap();
    assert_eq!(sink.count(), 1);
    collector.accept("msg").unwrap();
    assert_eq!(sink.count(), 1);

    sleep(Duration::from_millis(11)).await;
    let batches = sink.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 2);
    assert_eq!(batches[1].len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_only_windows_are_independent() {
    let (collector, sink) = tokio_collector(0, 10);

    for _ in 0..5 {
        collector.accept("msg").unwrap();
    }
    assert_eq!(sink.count(), 0);

    sleep(Duration::from_millis(50)).await;
    assert_eq!(sink.count(), 1);

    sleep(Duration::from_millis(50)).await;
    assert_eq!(sink.count(), 1);
    for _ in 0..3 {
        collector.accept("msg").unwrap();
    }

    sleep(Duration::from_millis(50)).await;
    let batches = sink.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 5);
    assert_eq!(batches[1].len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_window_is_measured_from_first_message() {
    let (collector, sink) = tokio_collector(0, 10);

    collector.accept(1).unwrap();
    sleep(Duration::from_millis(8)).await;
    collector.accept(2).unwrap();

    // An inactivity timeout would wait until 18ms.
    sleep(Duration::from_millis(3)).await;
    assert_eq!(sink.batches(), vec![vec![1, 2]]);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_cancels_pending_timer() {
    let (collector, sink) = tokio_collector(0, 10);

    collector.accept(1).unwrap();
    assert!(collector.has_pending_timer());
    collector.shutdown();
    collector.shutdown();

    sleep(Duration::from_millis(20)).await;
    assert_eq!(sink.count(), 0);
}

#[test]
fn test_exact_batch_size_releases_once_in_order() {
    for n in 2..=8usize {
        let (collector, sink, timer) = manual_collector::<usize>(n, 0);

        for i in 0..n {
            assert_eq!(sink.count(), 0, "released early for n={n}");
            collector.accept(i).unwrap();
        }
        assert_eq!(sink.batches(), vec![(0..n).collect::<Vec<_>>()]);
        assert_eq!(collector.state(), CollectorState::Idle);

        collector.accept(n).unwrap();
        assert_eq!(collector.len(), 1);
        assert_eq!(sink.count(), 1);
        assert_eq!(timer.pending(), 0);
    }
}

#[test]
fn test_batch_size_one_releases_every_message() {
    let (collector, sink, timer) = manual_collector::<usize>(1, 0);

    collector.accept(0).unwrap();
    collector.accept(1).unwrap();

    assert_eq!(sink.batches(), vec![vec![0], vec![1]]);
    assert_eq!(collector.state(), CollectorState::Idle);
    assert_eq!(timer.pending(), 0);
}

#[test]
fn test_timeout_window_collects_everything_in_order() {
    for count in [1usize, 2, 7, 50] {
        let (collector, sink, timer) = manual_collector(0, 25);

        for i in 0..count {
            collector.accept(reading(i as u32, i as i64 * 10)).unwrap();
        }
        timer.advance(Duration::from_millis(24));
        assert_eq!(sink.count(), 0);

        timer.advance(Duration::from_millis(2));
        let batches = sink.batches();
        assert_eq!(batches.len(), 1);
        let sensors: Vec<u32> = batches[0].iter().map(|r| r.sensor).collect();
        assert_eq!(sensors, (0..count as u32).collect::<Vec<_>>());
    }
}

#[test]
fn test_state_machine_transitions() {
    let (collector, _sink, timer) = manual_collector(3, 10);
    assert_eq!(collector.state(), CollectorState::Idle);
    assert!(!collector.has_pending_timer());

    collector.accept(1).unwrap();
    assert_eq!(collector.state(), CollectorState::Collecting);
    assert!(collector.has_pending_timer());

    collector.accept(2).unwrap();
    assert_eq!(collector.state(), CollectorState::Collecting);

    timer.advance(Duration::from_millis(10));
    assert_eq!(collector.state(), CollectorState::Idle);
    assert!(!collector.has_pending_timer());
}
