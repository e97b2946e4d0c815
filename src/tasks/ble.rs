// GestureLink — BLE Publish Task (consumer)
//
// Forwards high-confidence classifications to a connected central. The
// radio is polled every pass; connection transitions are observed, never
// driven. On a fresh connection the novelty tracking resets so the central
// immediately receives the current result instead of waiting for the next
// commit. Stricter confidence gate than the LED (a remote consumer should
// not see borderline predictions flicker past).

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::ble::WirelessLink;
use crate::config::*;
use crate::ei;
use crate::store::{ResultStore, NO_PREDICTION};

#[derive(Default)]
struct LinkState {
    last_published: u32,
    was_connected: bool,
}

/// One poll/publish pass. Factored out of the loop so the gating and
/// lifecycle behavior is testable against a mock link.
fn service_link(link: &mut impl WirelessLink, store: &ResultStore, state: &mut LinkState) {
    link.poll();

    let connected = link.connected();
    if connected && !state.was_connected {
        log::info!("Central connected");
        // Force re-evaluation of whatever result is current right now.
        state.last_published = 0;
    }
    if !connected && state.was_connected {
        log::info!("Central disconnected");
        link.advertise();
    }
    state.was_connected = connected;

    if !connected {
        return;
    }

    let snap = store.snapshot();
    if snap.version == state.last_published {
        return;
    }
    state.last_published = snap.version;

    // version 0 means nothing has ever been committed.
    if snap.version != 0 && snap.index != NO_PREDICTION && snap.confidence >= BLE_CONFIDENCE_THRESHOLD
    {
        let label = ei::category_name(snap.index);
        link.publish(label, snap.confidence);
        log::debug!("Published {} ({:.3}) v{}", label, snap.confidence, snap.version);
    }
}

pub fn ble_task(mut link: impl WirelessLink, store: Arc<ResultStore>) {
    log::info!("BLE task started");

    let poll_interval = Duration::from_millis(BLE_POLL_INTERVAL_MS);
    let mut state = LinkState::default();

    loop {
        service_link(&mut link, &store, &mut state);
        thread::sleep(poll_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockLink {
        connected: bool,
        published: Vec<(String, f32)>,
        advertise_calls: usize,
        poll_calls: usize,
    }

    impl MockLink {
        fn new() -> Self {
            Self { connected: false, published: Vec::new(), advertise_calls: 0, poll_calls: 0 }
        }
    }

    impl WirelessLink for MockLink {
        fn advertise(&mut self) {
            self.advertise_calls += 1;
        }

        fn poll(&mut self) {
            self.poll_calls += 1;
        }

        fn connected(&self) -> bool {
            self.connected
        }

        fn publish(&mut self, label: &str, confidence: f32) {
            self.published.push((label.to_string(), confidence));
        }
    }

    #[test]
    fn never_publishes_while_disconnected() {
        let store = ResultStore::new();
        store.commit(1, 0.99);

        let mut link = MockLink::new();
        let mut state = LinkState::default();
        for _ in 0..5 {
            service_link(&mut link, &store, &mut state);
        }
        assert!(link.published.is_empty());
        assert_eq!(link.poll_calls, 5);
    }

    #[test]
    fn connection_forces_publication_of_the_current_result() {
        let store = ResultStore::new();
        store.commit(2, 0.8); // committed before the central ever connects

        let mut link = MockLink::new();
        let mut state = LinkState::default();
        service_link(&mut link, &store, &mut state); // disconnected pass
        assert!(link.published.is_empty());

        link.connected = true;
        service_link(&mut link, &store, &mut state);
        assert_eq!(link.published, vec![("down".to_string(), 0.8)]);
    }

    #[test]
    fn same_version_is_published_at_most_once() {
        let store = ResultStore::new();
        store.commit(4, 0.9);

        let mut link = MockLink::new();
        link.connected = true;
        let mut state = LinkState::default();
        service_link(&mut link, &store, &mut state);
        service_link(&mut link, &store, &mut state);
        assert_eq!(link.published.len(), 1);

        // A new commit (even of the same category) is a new version.
        store.commit(4, 0.9);
        service_link(&mut link, &store, &mut state);
        assert_eq!(link.published.len(), 2);
    }

    #[test]
    fn gate_is_inclusive_and_filters_the_sentinel() {
        let store = ResultStore::new();
        let mut link = MockLink::new();
        link.connected = true;
        let mut state = LinkState::default();

        store.commit(1, BLE_CONFIDENCE_THRESHOLD);
        service_link(&mut link, &store, &mut state);
        assert_eq!(link.published.len(), 1);

        store.commit(1, BLE_CONFIDENCE_THRESHOLD - f32::EPSILON);
        service_link(&mut link, &store, &mut state);
        assert_eq!(link.published.len(), 1);

        store.commit(NO_PREDICTION, 0.99);
        service_link(&mut link, &store, &mut state);
        assert_eq!(link.published.len(), 1);
    }

    #[test]
    fn nothing_is_published_before_the_first_commit() {
        let store = ResultStore::new();
        let mut link = MockLink::new();
        link.connected = true;
        let mut state = LinkState::default();
        service_link(&mut link, &store, &mut state);
        assert!(link.published.is_empty());
    }

    #[test]
    fn reconnect_readvertises_and_resets_novelty() {
        let store = ResultStore::new();
        store.commit(0, 0.7);

        let mut link = MockLink::new();
        link.connected = true;
        let mut state = LinkState::default();
        service_link(&mut link, &store, &mut state);
        assert_eq!(link.published.len(), 1);

        link.connected = false;
        service_link(&mut link, &store, &mut state);
        assert_eq!(link.advertise_calls, 1);

        // Same stored version, but the new connection republishes it.
        link.connected = true;
        service_link(&mut link, &store, &mut state);
        assert_eq!(link.published.len(), 2);
    }
}
