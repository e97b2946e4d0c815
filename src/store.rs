// GestureLink — Shared Classification Result Store
//
// The single piece of mutable state shared between the inference task and
// the consumer tasks. One mutex-guarded cell; every access copies the whole
// triple under one lock acquisition, so consumers never observe a torn
// index/confidence pair. The lock is never held across a blocking call.

use std::sync::Mutex;

/// Sentinel category index for "no confident result".
pub const NO_PREDICTION: i32 = -1;

/// Snapshot of the most recent classification.
///
/// `version` starts at 0 ("nothing committed yet") and bumps by exactly one
/// on every commit — including commits that do not change the category. It
/// is a liveness signal, not a change signal; consumers track their own
/// last-seen version and apply their own confidence gates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub index: i32,
    pub confidence: f32,
    pub version: u32,
}

impl Classification {
    const fn empty() -> Self {
        Self { index: NO_PREDICTION, confidence: 0.0, version: 0 }
    }
}

/// Versioned result cell. Single writer (the inference task), any number of
/// read-only observers.
pub struct ResultStore {
    inner: Mutex<Classification>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self { inner: Mutex::new(Classification::empty()) }
    }

    /// Replace the stored result and bump the version. Called once per
    /// inference cycle, unconditionally. The version wraps at `u32::MAX`;
    /// consumers compare with `!=`, so the wrap is harmless.
    pub fn commit(&self, index: i32, confidence: f32) {
        let mut result = self.inner.lock().unwrap();
        result.index = index;
        result.confidence = confidence;
        result.version = result.version.wrapping_add(1);
    }

    /// Atomic copy of the current result.
    pub fn snapshot(&self) -> Classification {
        *self.inner.lock().unwrap()
    }

    /// Reset to the no-prediction sentinel without touching the version.
    /// Used by the indicator task to suppress re-triggering on a result it
    /// has already acted on. A concurrent `commit` may overwrite this at any
    /// time (last writer wins).
    pub fn clear(&self) {
        let mut result = self.inner.lock().unwrap();
        result.index = NO_PREDICTION;
        result.confidence = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_empty_with_version_zero() {
        let store = ResultStore::new();
        let snap = store.snapshot();
        assert_eq!(snap.index, NO_PREDICTION);
        assert_eq!(snap.confidence, 0.0);
        assert_eq!(snap.version, 0);
    }

    #[test]
    fn commit_bumps_version_by_exactly_one() {
        let store = ResultStore::new();
        for expected in 1..=10u32 {
            store.commit(2, 0.9);
            assert_eq!(store.snapshot().version, expected);
        }
    }

    #[test]
    fn commit_is_unconditional_even_when_unchanged() {
        let store = ResultStore::new();
        store.commit(1, 0.7);
        store.commit(1, 0.7);
        assert_eq!(store.snapshot().version, 2);
    }

    #[test]
    fn clear_resets_fields_but_keeps_version() {
        let store = ResultStore::new();
        store.commit(3, 0.8);
        store.clear();
        let snap = store.snapshot();
        assert_eq!(snap.index, NO_PREDICTION);
        assert_eq!(snap.confidence, 0.0);
        assert_eq!(snap.version, 1);

        // The next commit still advances the version from where it was.
        store.commit(0, 0.5);
        assert_eq!(store.snapshot().version, 2);
    }

    #[test]
    fn snapshot_never_tears_under_a_concurrent_writer() {
        let store = Arc::new(ResultStore::new());

        // The producer commits pairs that are a pure function of the version
        // it is about to create, so any torn read is detectable.
        let producer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 1..=1000u32 {
                    store.commit((i % 5) as i32, (i % 100) as f32 / 100.0);
                }
            })
        };

        let mut last_version = 0u32;
        while last_version < 1000 {
            let snap = store.snapshot();
            assert!(snap.version >= last_version, "version went backwards");
            if snap.version > 0 {
                assert_eq!(snap.index, (snap.version % 5) as i32);
                assert_eq!(snap.confidence, (snap.version % 100) as f32 / 100.0);
            }
            last_version = snap.version;
        }
        producer.join().unwrap();
    }
}
