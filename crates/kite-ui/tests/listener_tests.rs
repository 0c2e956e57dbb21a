//! Listener registry behaviour through the window.

use std::time::Duration;

use crossbeam_channel::{bounded, unbounded};
use kite_render::Font;
use kite_ui::{Event, EventType, Window, WindowConfig};

const WAIT: Duration = Duration::from_secs(5);
const QUIET: Duration = Duration::from_millis(100);

fn window() -> Window {
    Window::new(WindowConfig::new(100, 100, "listeners"), Font::default()).unwrap()
}

#[test]
fn test_two_listeners_each_get_one_copy() {
    let mut window = window();
    let (tx_a, rx_a) = unbounded();
    let (tx_b, rx_b) = unbounded();
    window.add_event_listener(EventType::ButtonDown, tx_a);
    window.add_event_listener(EventType::ButtonDown, tx_b);

    let event = Event::button_down(10.0, 20.0);
    window.emit_event(&event);

    assert_eq!(rx_a.recv_timeout(WAIT).unwrap(), event);
    assert_eq!(rx_b.recv_timeout(WAIT).unwrap(), event);
    assert!(rx_a.recv_timeout(QUIET).is_err());
    assert!(rx_b.recv_timeout(QUIET).is_err());
}

#[test]
fn test_removed_listener_gets_nothing() {
    let mut window = window();
    let (kept_tx, kept_rx) = unbounded();
    let (removed_tx, removed_rx) = unbounded();
    window.add_event_listener(EventType::Custom, kept_tx);
    window.add_event_listener(EventType::Custom, removed_tx.clone());

    assert!(window.remove_event_listener(EventType::Custom, &removed_tx));
    window.emit_event(&Event::custom("save", "save requested"));

    assert!(kept_rx.recv_timeout(WAIT).is_ok());
    assert!(removed_rx.recv_timeout(QUIET).is_err());
}

#[test]
fn test_remove_unknown_listener() {
    let mut window = window();
    let (tx, _rx) = unbounded();
    assert!(!window.remove_event_listener(EventType::Keyboard, &tx));
}

#[test]
fn test_slow_listener_does_not_block_emit() {
    let mut window = window();
    let (slow_tx, slow_rx) = bounded(1);
    let (fast_tx, fast_rx) = unbounded();
    window.add_event_listener(EventType::Custom, slow_tx);
    window.add_event_listener(EventType::Custom, fast_tx);

    let started = std::time::Instant::now();
    for i in 0..5 {
        window.emit_event(&Event::custom(format!("e{}", i), "burst"));
    }
    assert!(started.elapsed() < Duration::from_millis(500));

    for _ in 0..5 {
        assert!(fast_rx.recv_timeout(WAIT).is_ok());
    }
    std::thread::sleep(Duration::from_millis(300));
    // Only one event fits; the newer ones were dropped.
    assert_eq!(slow_rx.try_iter().count(), 1);
}

#[test]
fn test_stuck_listeners_leave_healthy_one_unaffected() {
    let mut window = window();
    let (stuck_a, _held_a) = bounded(0);
    let (stuck_b, _held_b) = bounded(0);
    let (healthy_tx, healthy_rx) = unbounded();
    window.add_event_listener(EventType::Custom, stuck_a);
    window.add_event_listener(EventType::Custom, stuck_b);
    window.add_event_listener(EventType::Custom, healthy_tx);

    let started = std::time::Instant::now();
    for i in 0..10 {
        window.emit_event(&Event::custom(format!("e{}", i), "burst"));
    }
    for _ in 0..10 {
        assert!(healthy_rx.recv_timeout(WAIT).is_ok());
    }
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[test]
fn test_custom_events_through_handle_event_go_to_listeners() {
    let mut window = window();
    let (tx, rx) = unbounded();
    window.add_event_listener(EventType::Custom, tx);

    window.handle_event(&Event::custom("ping", "ping")).unwrap();
    assert_eq!(
        rx.recv_timeout(WAIT).unwrap().description(),
        "ping"
    );
}
