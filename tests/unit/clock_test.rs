//! Tests for clocks

use procsim::util::{now_ms, Clock, VirtualClock};

#[tokio::test]
async fn test_virtual_clock_accumulates() {
    let clock = VirtualClock::new();
    clock.advance(500).await.unwrap();
    clock.advance(200).await.unwrap();
    assert_eq!(clock.elapsed_ms(), 700);
}

#[tokio::test]
async fn test_boxed_clock_delegates() {
    let handle = VirtualClock::new();
    let boxed: Box<dyn Clock> = Box::new(handle.clone());
    boxed.advance(42).await.unwrap();
    assert_eq!(handle.elapsed_ms(), 42);
}

#[test]
fn test_now_ms_is_after_2020() {
    assert!(now_ms() > 1_577_836_800_000);
}
