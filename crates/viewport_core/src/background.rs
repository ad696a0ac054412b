//! Animated background: a frame list that advances on a wall-clock cadence.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct BackgroundAnimation<T> {
    frames: Vec<T>,
    index: usize,
    last_swap: Option<Instant>,
    delay: Duration,
}

impl<T> BackgroundAnimation<T> {
    pub fn new(delay: Duration) -> Self {
        Self { frames: Vec::new(), index: 0, last_swap: None, delay }
    }

    /// Replace the frames; the previous ones are dropped.
    pub fn set_frames(&mut self, frames: Vec<T>, now: Instant) {
        self.frames = frames;
        self.index = 0;
        self.last_swap = Some(now);
    }

    pub fn clear(&mut self) {
        self.frames.clear();
        self.index = 0;
        self.last_swap = None;
    }

    /// Advance once if more than `delay` elapsed since the last swap.
    /// Returns true when the visible frame changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        let Some(last) = self.last_swap else {
            self.last_swap = Some(now);
            return false;
        };
        if now.saturating_duration_since(last) <= self.delay {
            return false;
        }
        self.last_swap = Some(now);
        if self.frames.len() == 1 {
            return false;
        }
        self.index = (self.index + 1) % self.frames.len();
        true
    }

    pub fn current(&self) -> Option<&T> {
        self.frames.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
