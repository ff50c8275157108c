//! Parallel bookings must never double-book a slot

use slotboard_core::application::BookingRequest;
use slotboard_core::domain::taken_times;
use slotboard_core::error::AppError;
use slotboard_integration_tests::TestApp;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_manual_same_slot_single_winner() {
    let app = Arc::new(TestApp::with_window("09:00", "10:00", 15).await);

    let mut set = JoinSet::new();
    for i in 0..50 {
        let app = app.clone();
        set.spawn(async move {
            app.queue
                .book(BookingRequest::manual(format!("guest-{i}"), "09:30"))
                .await
        });
    }

    let mut won = 0;
    let mut conflicts = 0;
    while let Some(result) = set.join_next().await {
        match result.unwrap() {
            Ok(_) => won += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(won, 1);
    assert_eq!(conflicts, 49);
    assert_eq!(app.queue_repo.len().await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_auto_fills_distinct_slots() {
    let app = Arc::new(TestApp::with_window("09:00", "12:00", 10).await);

    let mut set = JoinSet::new();
    for i in 0..30 {
        let app = app.clone();
        set.spawn(async move { app.queue.book(BookingRequest::auto(format!("g{i}"))).await });
    }

    let mut times = HashSet::new();
    let mut rejected = 0;
    while let Some(result) = set.join_next().await {
        match result.unwrap() {
            Ok(outcome) => assert!(times.insert(outcome.item.slot.time)),
            Err(AppError::Conflict(_)) => rejected += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    // 18 slots in the window; the rest are turned away
    assert_eq!(times.len(), 18);
    assert_eq!(rejected, 12);

    let entries = app.queue_repo.snapshot().await.unwrap();
    assert_eq!(taken_times(&entries).len(), entries.len());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reads_during_bookings_see_consistent_queue() {
    let app = Arc::new(TestApp::with_window("08:00", "18:00", 5).await);

    let mut set = JoinSet::new();
    for i in 0..40 {
        let booker = app.clone();
        set.spawn(async move {
            booker.queue.book(BookingRequest::auto(format!("g{i}"))).await.map(|_| ())
        });
        let reader = app.clone();
        set.spawn(async move {
            let listed = reader.queue.list().await?;
            let minutes: Vec<_> = listed.iter().map(|e| e.slot_minutes).collect();
            let mut sorted = minutes.clone();
            sorted.sort();
            assert_eq!(minutes, sorted);
            Ok::<(), AppError>(())
        });
    }

    while let Some(result) = set.join_next().await {
        result.unwrap().unwrap();
    }
    assert_eq!(app.queue_repo.len().await.unwrap(), 40);
}
