//! Input normalization helpers for hosts without native gestures.

use std::time::{Duration, Instant};

/// Pixel deltas per wheel notch on platforms that report pixels.
pub const PIXELS_PER_NOTCH: f64 = 120.0;

/// Max pointer travel between the two presses of a double-click.
pub const DOUBLE_CLICK_SLOP_PX: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WheelDelta {
    Lines(f32),
    Pixels(f64),
}

impl WheelDelta {
    pub fn notches(self) -> f32 {
        match self {
            WheelDelta::Lines(y) => y,
            WheelDelta::Pixels(y) => (y / PIXELS_PER_NOTCH) as f32,
        }
    }
}

/// Turns press timestamps into double-click events.
#[derive(Clone, Debug)]
pub struct DoubleClickDetector {
    window: Duration,
    last: Option<(Instant, [f32; 2])>,
}

impl DoubleClickDetector {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// Record a press. Returns true when it completes a double-click; the
    /// detector then resets so a third press starts a new pair.
    pub fn press(&mut self, now: Instant, pos: [f32; 2]) -> bool {
        if let Some((t, p)) = self.last
            && now.saturating_duration_since(t) <= self.window
            && (pos[0] - p[0]).hypot(pos[1] - p[1]) <= DOUBLE_CLICK_SLOP_PX
        {
            self.last = None;
            return true;
        }
        self.last = Some((now, pos));
        false
    }

    /// Forget the pending press, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
