//! Soft drop hold tracking for terminal environments.
//!
//! The down key means "fast gravity while held". Terminals with the keyboard
//! enhancement protocol report releases; others only report presses (and
//! auto-repeat presses), so the latch lets go after a short timeout without a
//! fresh press.

use crossterm::event::{KeyCode, KeyEventKind};

use crate::map::is_soft_drop_key;
use crate::types::SOFT_DROP_GRACE_MS;

/// Tracks whether the soft drop key is currently held.
#[derive(Debug, Clone)]
pub struct SoftDropLatch {
    held: bool,
    last_press_ms: u64,
    grace_ms: u64,
    release_events: bool,
}

impl SoftDropLatch {
    pub fn new() -> Self {
        Self {
            held: false,
            last_press_ms: 0,
            grace_ms: SOFT_DROP_GRACE_MS,
            release_events: false,
        }
    }

    /// Rely on key release events instead of the timeout.
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn with_grace_ms(mut self, grace_ms: u64) -> Self {
        self.grace_ms = grace_ms;
        self
    }

    pub fn held(&self) -> bool {
        self.held
    }

    /// Feed a key event; returns true when it concerned the soft drop key.
    pub fn handle_key(&mut self, code: KeyCode, kind: KeyEventKind, now_ms: u64) -> bool {
        if !is_soft_drop_key(code) {
            return false;
        }
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.held = true;
                self.last_press_ms = now_ms;
            }
            KeyEventKind::Release => {
                self.held = false;
            }
        }
        true
    }

    /// Advance the clock; returns whether the key still counts as held.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if self.held
            && !self.release_events
            && now_ms.saturating_sub(self.last_press_ms) > self.grace_ms
        {
            self.held = false;
        }
        self.held
    }

    pub fn reset(&mut self) {
        self.held = false;
    }
}

impl Default for SoftDropLatch {
    fn default() -> Self {
        Self::new()
    }
}
