// GestureLink — LED Indicator Task (consumer)
//
// Polls the result store and drives the RGB LED:
//   directional gesture — flash its color for GESTURE_LIGHT_DURATION_MS,
//   then turn off and clear the store so a stale window cannot re-trigger
//   the same flash (debounce policy; the BLE task tracks versions on its
//   own and is unaffected by the clear);
//   idle — steady red;
//   anything else (low confidence, sentinel, out-of-range index) — off.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::*;
use crate::drivers::led::Indicator;
use crate::ei;
use crate::events::GestureClass;
use crate::store::{Classification, ResultStore, NO_PREDICTION};

/// Logical (r, g, b) channel states.
pub type Color = (bool, bool, bool);

pub const COLOR_OFF: Color = (false, false, false);
pub const COLOR_RED: Color = (true, false, false);
pub const COLOR_GREEN: Color = (false, true, false);
pub const COLOR_BLUE: Color = (false, false, true);
pub const COLOR_YELLOW: Color = (true, true, false);
pub const COLOR_PURPLE: Color = (true, false, true);

/// What the indicator should do after one snapshot of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LedCommand {
    /// Version already seen — leave the LED alone.
    Ignore,
    /// Hold `Color` for the gesture display duration, then turn off.
    Flash(Color),
    /// Show `Color` until the next new result.
    Solid(Color),
    Off,
}

fn color_for(gesture: GestureClass) -> Color {
    match gesture {
        GestureClass::Up => COLOR_GREEN,
        GestureClass::Down => COLOR_YELLOW,
        GestureClass::Left => COLOR_BLUE,
        GestureClass::Right => COLOR_PURPLE,
        GestureClass::Idle => COLOR_RED,
    }
}

/// Pure per-snapshot decision. Updates `last_seen` on any new version so a
/// result is acted on at most once, then applies the confidence gate.
fn next_command(snap: &Classification, last_seen: &mut u32) -> LedCommand {
    if snap.version == *last_seen {
        return LedCommand::Ignore;
    }
    *last_seen = snap.version;

    if snap.confidence < LED_CONFIDENCE_THRESHOLD || snap.index == NO_PREDICTION {
        return LedCommand::Off;
    }

    match GestureClass::from_label(ei::category_name(snap.index)) {
        Some(gesture) if gesture.is_directional() => LedCommand::Flash(color_for(gesture)),
        Some(gesture) => LedCommand::Solid(color_for(gesture)),
        // Out-of-range index — never trust it, show nothing.
        None => LedCommand::Off,
    }
}

pub fn led_task(mut led: impl Indicator, store: Arc<ResultStore>) {
    log::info!("LED task started");

    let poll_interval = Duration::from_millis(LED_POLL_INTERVAL_MS);
    let hold = Duration::from_millis(GESTURE_LIGHT_DURATION_MS);
    let mut last_seen: u32 = 0;

    loop {
        let snap = store.snapshot();
        match next_command(&snap, &mut last_seen) {
            LedCommand::Ignore => {}
            LedCommand::Flash((r, g, b)) => {
                led.set_color(r, g, b);
                thread::sleep(hold);
                led.set_color(false, false, false);
                // Debounce: drop the acted-on result so it cannot flash again.
                store.clear();
            }
            LedCommand::Solid((r, g, b)) => led.set_color(r, g, b),
            LedCommand::Off => led.set_color(false, false, false),
        }

        thread::sleep(poll_interval);
    }
}
