// GestureLink — Inference Task (producer)
//
// Sole writer of the result store. Two states:
//   FILLING — one-time blocking fill of the sliding window; a source failure
//             here is fatal and halts the task (an unusable sensor cannot be
//             made usable by looping).
//   RUNNING — forever: collect `SLIDING_WINDOW_STEP` fresh values, slide the
//             window, classify, commit the arg-max result. Classifier and
//             transient sensor faults skip the cycle; the previous committed
//             result stays visible to the consumers.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::*;
use crate::ei::Classifier;
use crate::store::{ResultStore, NO_PREDICTION};
use crate::window::{collect_samples, SampleSource, SlidingWindow};

type InferenceWindow = SlidingWindow<EI_DSP_INPUT_FRAME_SIZE, SLIDING_WINDOW_STEP>;

pub fn inference_task(
    mut source: impl SampleSource,
    mut classifier: impl Classifier,
    store: Arc<ResultStore>,
) {
    log::info!(
        "Inference task started — window {}, step {}",
        EI_DSP_INPUT_FRAME_SIZE,
        SLIDING_WINDOW_STEP
    );

    // Let the sensor settle before the first capture.
    thread::sleep(Duration::from_millis(STARTUP_SETTLE_MS));

    let poll = Duration::from_millis(SAMPLE_POLL_INTERVAL_MS);
    let retry = Duration::from_millis(SAMPLE_RETRY_DELAY_MS);

    // ---- FILLING ----------------------------------------------------------
    let mut window = InferenceWindow::new();
    log::info!("Filling initial window…");
    if let Err(e) = window.fill(&mut source, poll) {
        log::error!("Failed to fill initial window: {} — inference task halted", e);
        return;
    }
    log::info!("Initial window ready, starting continuous inference");

    // ---- RUNNING ----------------------------------------------------------
    let mut step = [0.0f32; SLIDING_WINDOW_STEP];
    loop {
        if let Err(e) = collect_samples(&mut source, &mut step, poll) {
            log::warn!("Sample collection failed: {}", e);
            thread::sleep(retry);
            continue;
        }

        window.slide(&step);

        let scores = match classifier.classify(window.as_array()) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("Inference failed: {}", e);
                thread::sleep(retry);
                continue;
            }
        };

        let (index, confidence) = best_category(&scores);
        store.commit(index, confidence);

        // Yield briefly so the consumer tasks get scheduled between cycles.
        thread::sleep(Duration::from_millis(INFERENCE_YIELD_MS));
    }
}

/// Arg-max over per-category scores. Scanned in index order with a strict
/// comparison, so the lowest index wins a tie; an all-zero score vector
/// leaves the no-prediction sentinel in place.
fn best_category(scores: &[f32]) -> (i32, f32) {
    let mut best_index = NO_PREDICTION;
    let mut best_score = 0.0f32;
    for (i, &score) in scores.iter().enumerate() {
        if score > best_score {
            best_score = score;
            best_index = i as i32;
        }
    }
    (best_index, best_score)
}
