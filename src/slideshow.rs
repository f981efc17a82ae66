//! Hero slideshow timing.
//!
//! The hero carousel cycles through today's images on a fixed interval.
//! There is no background timer here: the host calls [`HeroSlideshow::tick`]
//! from its own event loop with the current instant, and the slideshow
//! decides whether a slide is due. Tearing the hero down calls
//! [`HeroSlideshow::stop`], after which ticks never advance, so a late
//! callback cannot touch a slideshow that is gone.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct HeroSlideshow {
    len: usize,
    current: usize,
    interval: Duration,
    next_due: Option<Instant>,
}

impl HeroSlideshow {
    pub fn new(len: usize, interval: Duration) -> Self {
        Self {
            len,
            current: 0,
            interval,
            next_due: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedule the first advance one interval from `now`.
    ///
    /// An interval too long to represent as an `Instant` never fires.
    pub fn start(&mut self, now: Instant) {
        if self.len > 1 {
            self.next_due = now.checked_add(self.interval);
        }
    }

    /// Cancel the pending advance.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Advance if the deadline has passed. Returns whether the slide changed.
    ///
    /// A host that was suspended for several intervals advances once, not
    /// once per missed interval; the next deadline is measured from `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.current = (self.current + 1) % self.len;
                self.next_due = now.checked_add(self.interval);
                true
            }
            _ => false,
        }
    }

    /// Manual navigation; restarts the countdown if running.
    pub fn go_to(&mut self, index: usize, now: Instant) {
        if self.len == 0 {
            return;
        }
        self.current = index % self.len;
        if self.next_due.is_some() {
            self.next_due = now.checked_add(self.interval);
        }
    }

    pub fn next(&mut self, now: Instant) {
        self.go_to(self.current + 1, now);
    }

    pub fn prev(&mut self, now: Instant) {
        if self.len > 0 {
            self.go_to(self.current + self.len - 1, now);
        }
    }
}
