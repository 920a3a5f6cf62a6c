use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fsw_app::dispatch;
use proptest::prelude::*;

#[test]
fn runs_every_unit_once() {
    let values: Vec<f64> = (0..16).map(|i| i as f64).collect();
    let counter = AtomicUsize::new(0);

    dispatch(&values, 4, |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), values.len());
}

#[test]
fn in_flight_units_never_exceed_limit() {
    let limit = 2;
    let values: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let current = AtomicUsize::new(0);
    let max_seen = AtomicUsize::new(0);
    let completed = AtomicUsize::new(0);

    dispatch(&values, limit, |_| {
        let now = current.fetch_add(1, Ordering::SeqCst) + 1;
        max_seen.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(25));
        current.fetch_sub(1, Ordering::SeqCst);
        completed.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(completed.load(Ordering::SeqCst), values.len());
    assert!(max_seen.load(Ordering::SeqCst) <= limit);
    assert!(max_seen.load(Ordering::SeqCst) >= 1);
}

#[test]
fn returns_only_after_every_unit_finished() {
    let values: Vec<f64> = (0..6).map(|i| i as f64).collect();
    let completed = AtomicUsize::new(0);

    dispatch(&values, 3, |_| {
        std::thread::sleep(Duration::from_millis(10));
        completed.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    // Nothing is still in flight once dispatch returns.
    assert_eq!(completed.load(Ordering::SeqCst), values.len());
}

#[test]
fn limit_larger_than_input_is_fine() {
    let values = vec![1.0, 2.0];
    let counter = AtomicUsize::new(0);

    dispatch(&values, 16, |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn unit_count_matches_input_for_any_concurrency(len in 0usize..24, limit in 1usize..6) {
        let values: Vec<f64> = (0..len).map(|i| i as f64).collect();
        let counter = AtomicUsize::new(0);

        dispatch(&values, limit, |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        prop_assert_eq!(counter.load(Ordering::SeqCst), len);
    }
}
