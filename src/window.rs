// GestureLink — Sliding Sample Window
//
// Fixed-capacity ring of feature values fed to the classifier each cycle.
// The window is filled once at task start (blocking collection), then kept
// current by shifting out the oldest `STEP` values and appending `STEP`
// fresh ones. All data movement is in place; nothing allocates.

use std::thread;
use std::time::Duration;

use crate::events::Sample;

/// Polling capability of the accelerometer.
///
/// `Ok(None)` means no fresh reading is available yet — the caller retries
/// after a short sleep. `Err` means the source itself is broken (e.g. the
/// I2C transaction failed), which is fatal during the initial fill.
pub trait SampleSource {
    fn try_read(&mut self) -> anyhow::Result<Option<Sample>>;
}

/// Blocking collection of `out.len()` feature values (whole x/y/z triples,
/// in arrival order). Sleeps `poll` between "not ready" polls so the task
/// never busy-spins. A source that never becomes ready stalls the caller
/// indefinitely; that is intentional (see the inference task).
pub fn collect_samples(
    source: &mut impl SampleSource,
    out: &mut [f32],
    poll: Duration,
) -> anyhow::Result<()> {
    debug_assert!(out.len() % 3 == 0, "collection must cover whole triples");

    let mut collected = 0;
    while collected < out.len() {
        if let Some(sample) = source.try_read()? {
            out[collected] = sample.x;
            out[collected + 1] = sample.y;
            out[collected + 2] = sample.z;
            collected += 3;
        } else {
            thread::sleep(poll);
        }
    }
    Ok(())
}

/// Sliding window of `N` feature values advancing `STEP` values per cycle.
///
/// Both `N` and `STEP` must be multiples of 3 (axis values are never
/// reordered or split across cycles) and `STEP` must be smaller than `N`.
pub struct SlidingWindow<const N: usize, const STEP: usize> {
    buf: [f32; N],
}

impl<const N: usize, const STEP: usize> SlidingWindow<N, STEP> {
    pub fn new() -> Self {
        assert!(STEP > 0 && STEP < N, "step must be in 1..N");
        assert!(N % 3 == 0 && STEP % 3 == 0, "window and step must hold whole triples");
        Self { buf: [0.0; N] }
    }

    /// One-time blocking fill of the entire window from `source`.
    pub fn fill(&mut self, source: &mut impl SampleSource, poll: Duration) -> anyhow::Result<()> {
        collect_samples(source, &mut self.buf, poll)
    }

    /// Shift the window left by `STEP` (discarding the oldest values) and
    /// append `new_values` at the tail. O(N) copy, no allocation.
    pub fn slide(&mut self, new_values: &[f32; STEP]) {
        self.buf.copy_within(STEP.., 0);
        self.buf[N - STEP..].copy_from_slice(new_values);
    }

    pub fn as_array(&self) -> &[f32; N] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedSource {
        samples: Vec<Sample>,
        next: usize,
        ready_every_other: bool,
        polls: usize,
    }

    impl ScriptedSource {
        fn new(samples: Vec<Sample>) -> Self {
            Self { samples, next: 0, ready_every_other: false, polls: 0 }
        }
    }

    impl SampleSource for ScriptedSource {
        fn try_read(&mut self) -> anyhow::Result<Option<Sample>> {
            self.polls += 1;
            if self.ready_every_other && self.polls % 2 == 1 {
                return Ok(None);
            }
            match self.samples.get(self.next) {
                Some(&s) => {
                    self.next += 1;
                    Ok(Some(s))
                }
                None => anyhow::bail!("source exhausted"),
            }
        }
    }

    fn triples(n: usize) -> Vec<Sample> {
        (0..n)
            .map(|i| {
                let base = (i * 3) as f32;
                Sample { x: base, y: base + 1.0, z: base + 2.0 }
            })
            .collect()
    }

    #[test]
    fn fill_collects_whole_triples_in_arrival_order() {
        let mut window: SlidingWindow<12, 6> = SlidingWindow::new();
        let mut source = ScriptedSource::new(triples(4));
        window.fill(&mut source, Duration::ZERO).unwrap();

        let expected: Vec<f32> = (0..12).map(|v| v as f32).collect();
        assert_eq!(window.as_array().as_slice(), expected.as_slice());
    }

    #[test]
    fn fill_retries_while_source_not_ready() {
        let mut window: SlidingWindow<6, 3> = SlidingWindow::new();
        let mut source = ScriptedSource::new(triples(2));
        source.ready_every_other = true;
        window.fill(&mut source, Duration::ZERO).unwrap();
        // Two samples needed four polls with every other one empty.
        assert_eq!(source.polls, 4);
    }

    #[test]
    fn fill_propagates_source_errors() {
        let mut window: SlidingWindow<12, 6> = SlidingWindow::new();
        let mut source = ScriptedSource::new(triples(1)); // too few samples
        assert!(window.fill(&mut source, Duration::ZERO).is_err());
    }

    #[test]
    fn slide_shifts_out_oldest_and_appends_in_order() {
        // frame_size=12, step=6, initial all-zero fill.
        let mut window: SlidingWindow<12, 6> = SlidingWindow::new();
        window.slide(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(
            window.as_array(),
            &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
    }

    #[test]
    fn slide_preserves_length_and_tail() {
        let mut window: SlidingWindow<9, 3> = SlidingWindow::new();
        for cycle in 0u32..5 {
            let base = cycle as f32 * 3.0;
            let step = [base, base + 1.0, base + 2.0];
            window.slide(&step);
            assert_eq!(window.as_array().len(), 9);
            assert_eq!(&window.as_array()[6..], &step);
        }
        // After five slides of three values the window holds cycles 2..5.
        assert_eq!(
            window.as_array(),
            &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0]
        );
    }

    #[test]
    #[should_panic]
    fn step_must_be_smaller_than_window() {
        let _: SlidingWindow<6, 6> = SlidingWindow::new();
    }

    #[test]
    #[should_panic]
    fn step_must_hold_whole_triples() {
        let _: SlidingWindow<12, 4> = SlidingWindow::new();
    }
}
