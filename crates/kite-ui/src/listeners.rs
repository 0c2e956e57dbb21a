//! Publish/subscribe registry for application-level events.
//!
//! Each delivery is its own task on a small pool. A delivery never waits: a
//! subscriber whose channel is full loses the new copy, and every other
//! subscriber is served as usual.

use crossbeam_channel::{Sender, TrySendError};
use kite_core::alloc::HashMap;
use kite_core::task_pool::TaskPool;

use crate::error::{UiError, UiResult};
use crate::event::{Event, EventType};

pub struct ListenerRegistry {
    listeners: HashMap<EventType, Vec<Sender<Event>>>,
    pool: TaskPool,
}

impl ListenerRegistry {
    pub fn new(threads: usize) -> UiResult<Self> {
        let pool = TaskPool::new(threads).map_err(UiError::TaskPool)?;
        Ok(Self {
            listeners: HashMap::default(),
            pool,
        })
    }

    pub fn add(&mut self, event_type: EventType, sender: Sender<Event>) {
        self.listeners.entry(event_type).or_default().push(sender);
    }

    /// Unsubscribe the channel `sender` feeds. Returns whether it was registered.
    pub fn remove(&mut self, event_type: EventType, sender: &Sender<Event>) -> bool {
        let Some(senders) = self.listeners.get_mut(&event_type) else {
            return false;
        };
        let Some(index) = senders.iter().position(|s| s.same_channel(sender)) else {
            return false;
        };
        senders.remove(index);
        true
    }

    pub fn listener_count(&self, event_type: EventType) -> usize {
        self.listeners.get(&event_type).map_or(0, Vec::len)
    }

    /// Send a copy of `event` to every listener registered for its type.
    ///
    /// A listener whose channel is full drops the new copy with a warning.
    pub fn emit(&self, event: &Event) {
        let Some(senders) = self.listeners.get(&event.event_type()) else {
            return;
        };

        for sender in senders {
            let sender = sender.clone();
            let event = event.clone();
            self.pool.spawn_detached(async move {
                match sender.try_send(event) {
                    Ok(()) => {}
                    Err(TrySendError::Full(event)) => {
                        tracing::warn!("Listener channel full, dropped {}", event.description());
                    }
                    Err(TrySendError::Disconnected(event)) => {
                        tracing::debug!("Listener gone, dropped {}", event.description());
                    }
                }
            });
        }
    }
}

impl Drop for ListenerRegistry {
    fn drop(&mut self) {
        self.pool.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{bounded, unbounded};
    use std::time::{Duration, Instant};

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_each_listener_gets_one_copy() {
        let mut registry = ListenerRegistry::new(2).unwrap();
        let (tx_a, rx_a) = unbounded();
        let (tx_b, rx_b) = unbounded();
        registry.add(EventType::ButtonDown, tx_a);
        registry.add(EventType::ButtonDown, tx_b);

        let event = Event::button_down(1.0, 2.0);
        registry.emit(&event);

        assert_eq!(rx_a.recv_timeout(WAIT).unwrap(), event);
        assert_eq!(rx_b.recv_timeout(WAIT).unwrap(), event);
        assert!(rx_a.recv_timeout(Duration::from_millis(50)).is_err());
        assert!(rx_b.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_other_types_not_delivered() {
        let mut registry = ListenerRegistry::new(1).unwrap();
        let (tx, rx) = unbounded();
        registry.add(EventType::Keyboard, tx);

        registry.emit(&Event::button_down(0.0, 0.0));
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_remove_by_channel() {
        let mut registry = ListenerRegistry::new(1).unwrap();
        let (tx, _rx) = unbounded();
        registry.add(EventType::Custom, tx.clone());
        assert_eq!(registry.listener_count(EventType::Custom), 1);

        assert!(registry.remove(EventType::Custom, &tx));
        assert!(!registry.remove(EventType::Custom, &tx));
        assert_eq!(registry.listener_count(EventType::Custom), 0);
    }

    #[test]
    fn test_full_listener_drops_newest() {
        let mut registry = ListenerRegistry::new(1).unwrap();
        let (tx, rx) = bounded(1);
        registry.add(EventType::Custom, tx);

        registry.emit(&Event::custom("a", "first"));
        registry.emit(&Event::custom("b", "second"));
        std::thread::sleep(Duration::from_millis(200));

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_stuck_listeners_do_not_delay_others() {
        let mut registry = ListenerRegistry::new(2).unwrap();
        let (stuck_a, _rx_a) = bounded(0);
        let (stuck_b, _rx_b) = bounded(0);
        let (tx, rx) = unbounded();
        registry.add(EventType::Custom, stuck_a);
        registry.add(EventType::Custom, stuck_b);
        registry.add(EventType::Custom, tx);

        let started = Instant::now();
        registry.emit(&Event::custom("tick", "tick"));
        assert!(rx.recv_timeout(WAIT).is_ok());
        assert!(started.elapsed() < Duration::from_millis(500));
    }

    #[test]
    fn test_drop_stops_delivery_threads() {
        let mut registry = ListenerRegistry::new(2).unwrap();
        let (tx, rx) = unbounded();
        registry.add(EventType::Custom, tx);
        registry.emit(&Event::custom("last", "last"));
        assert!(rx.recv_timeout(WAIT).is_ok());

        // Joins the workers; returning at all is the check.
        drop(registry);
    }
}
