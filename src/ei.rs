// GestureLink — Edge Impulse Inference Interface
//
// This module provides a safe Rust API for gesture classification.
//
// Architecture:
//   1. STUB mode (default) — a cheap motion heuristic stands in for the
//      model so the rest of the firmware can be developed and tested
//      without the C++ Edge Impulse SDK compiled in.
//   2. FFI mode — enable the `edge-impulse` feature to compile the SDK via
//      build.rs and link the real classifier.
//
// The inference task calls `classify(window)` with a 375-float buffer
// (125 samples × 3 axes) and receives back the raw per-label scores.
// Arg-max and confidence gating happen downstream, in the task and the
// consumers respectively.

use crate::config::*;

/// Labels matching the Edge Impulse model output order.
pub const LABELS: [&str; EI_LABEL_COUNT] = ["idle", "up", "down", "left", "right"];

/// Bounds-checked category-index → label lookup.
pub fn category_name(index: i32) -> &'static str {
    if index >= 0 && (index as usize) < EI_LABEL_COUNT {
        LABELS[index as usize]
    } else {
        "unknown"
    }
}

/// Classification capability: maps one full window to per-label scores.
/// Deterministic given identical input; may fail on an internal error, in
/// which case the caller skips the cycle and keeps the previous result.
pub trait Classifier {
    fn classify(
        &mut self,
        window: &[f32; EI_DSP_INPUT_FRAME_SIZE],
    ) -> anyhow::Result<[f32; EI_LABEL_COUNT]>;
}

/// The production classifier, dispatching to the stub or FFI back-end.
pub struct EdgeClassifier;

impl Classifier for EdgeClassifier {
    fn classify(
        &mut self,
        window: &[f32; EI_DSP_INPUT_FRAME_SIZE],
    ) -> anyhow::Result<[f32; EI_LABEL_COUNT]> {
        #[cfg(not(feature = "edge-impulse"))]
        {
            Ok(stub_inference(window))
        }

        #[cfg(feature = "edge-impulse")]
        {
            ffi_inference(window)
        }
    }
}

// ---------------------------------------------------------------------------
// Stub back-end — development / testing without the C++ SDK
// ---------------------------------------------------------------------------
#[cfg(not(feature = "edge-impulse"))]
fn stub_inference(window: &[f32; EI_DSP_INPUT_FRAME_SIZE]) -> [f32; EI_LABEL_COUNT] {
    // Heuristic: gravity sits in the window as a per-axis DC offset (a node
    // at rest reads ~1 g on one axis), so all motion cues come from the
    // deviations around the per-axis means. The largest signed deviation on
    // the horizontal/vertical axis picks the direction; a window whose
    // deviations stay small is at rest. Lets the LED and BLE pipelines run
    // end-to-end before the model lands.
    let samples = (EI_DSP_INPUT_FRAME_SIZE / 3) as f32;
    let mut mean = [0.0f32; 3];
    for triple in window.chunks_exact(3) {
        mean[0] += triple[0];
        mean[1] += triple[1];
        mean[2] += triple[2];
    }
    for m in &mut mean {
        *m /= samples;
    }

    // Signed peak deviation per steering axis.
    let mut peak_x = 0.0f32;
    let mut peak_z = 0.0f32;
    for triple in window.chunks_exact(3) {
        let dx = triple[0] - mean[0];
        let dz = triple[2] - mean[2];
        if dx.abs() > peak_x.abs() {
            peak_x = dx;
        }
        if dz.abs() > peak_z.abs() {
            peak_z = dz;
        }
    }

    // [idle, up, down, left, right]
    let preds = if peak_x.abs().max(peak_z.abs()) < 0.4 {
        [0.90, 0.03, 0.03, 0.02, 0.02]
    } else if peak_z.abs() >= peak_x.abs() {
        if peak_z >= 0.0 {
            [0.05, 0.85, 0.04, 0.03, 0.03]
        } else {
            [0.05, 0.04, 0.85, 0.03, 0.03]
        }
    } else if peak_x < 0.0 {
        [0.05, 0.03, 0.04, 0.85, 0.03]
    } else {
        [0.05, 0.03, 0.04, 0.03, 0.85]
    };

    log::debug!(
        "STUB inference — peak x {:.2}, peak z {:.2}, preds {:?}",
        peak_x,
        peak_z,
        preds
    );
    preds
}

// ---------------------------------------------------------------------------
// Real FFI back-end — calls the C++ Edge Impulse compiled library
// ---------------------------------------------------------------------------
#[cfg(feature = "edge-impulse")]
mod ffi {
    use std::ffi::c_char;

    #[repr(C)]
    pub struct EiSignal {
        pub get_data: Option<unsafe extern "C" fn(usize, usize, *mut f32) -> i32>,
        pub total_length: usize,
    }

    #[repr(C)]
    pub struct EiClassification {
        pub label: *const c_char,
        pub value: f32,
    }

    // The full struct has more fields; we only access `classification`.
    #[repr(C)]
    pub struct EiImpulseResult {
        pub classification: [EiClassification; super::EI_LABEL_COUNT],
        pub anomaly: f32,
    }

    extern "C" {
        pub fn run_classifier(
            signal: *mut EiSignal,
            result: *mut EiImpulseResult,
            debug: bool,
        ) -> i32;
    }
}

#[cfg(feature = "edge-impulse")]
fn ffi_inference(
    window: &[f32; EI_DSP_INPUT_FRAME_SIZE],
) -> anyhow::Result<[f32; EI_LABEL_COUNT]> {
    use std::ffi::CStr;

    // Signal callback reads directly from the window slice.
    // SAFETY: single-threaded access — only the inference task calls this.
    static mut SIGNAL_BUF: *const f32 = std::ptr::null();
    static mut SIGNAL_LEN: usize = 0;

    unsafe extern "C" fn get_data(offset: usize, length: usize, out: *mut f32) -> i32 {
        unsafe {
            if SIGNAL_BUF.is_null() || offset + length > SIGNAL_LEN {
                return -1;
            }
            core::ptr::copy_nonoverlapping(SIGNAL_BUF.add(offset), out, length);
        }
        0
    }

    unsafe {
        SIGNAL_BUF = window.as_ptr();
        SIGNAL_LEN = window.len();

        let mut signal = ffi::EiSignal {
            get_data: Some(get_data),
            total_length: window.len(),
        };

        let mut result: ffi::EiImpulseResult = core::mem::zeroed();

        let err = ffi::run_classifier(&mut signal, &mut result, false);
        SIGNAL_BUF = std::ptr::null();
        if err != 0 {
            anyhow::bail!("Edge Impulse classifier error: {}", err);
        }

        let mut preds = [0.0f32; EI_LABEL_COUNT];
        for i in 0..EI_LABEL_COUNT {
            preds[i] = result.classification[i].value;
            let label = CStr::from_ptr(result.classification[i].label);
            log::debug!("{}: {:.4}", label.to_str().unwrap_or("?"), preds[i]);
        }
        Ok(preds)
    }
}
