//! Caret blink contract
//!
//! A caret is either solid or blinking. Every move makes it solid again and
//! issues a [`BlinkTimer`]; the host waits out the timer's delay and hands it
//! back through [`Blink::fire`]. A timer superseded by a later move is stale
//! and does nothing, which is how rescheduling cancels earlier timers.

use std::time::Duration;

/// Idle time before a caret that stopped moving starts blinking
pub const DEFAULT_BLINK_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlinkPhase {
    #[default]
    Solid,
    Blinking,
}

/// A pending request to start blinking, valid until the next reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkTimer {
    generation: u64,
    delay: Duration,
}

impl BlinkTimer {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blink {
    phase: BlinkPhase,
    generation: u64,
    delay: Duration,
}

impl Blink {
    pub fn new(delay: Duration) -> Self {
        Self {
            phase: BlinkPhase::Solid,
            generation: 0,
            delay,
        }
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Make the caret solid and supersede any outstanding timer
    pub fn reset(&mut self) -> BlinkTimer {
        self.phase = BlinkPhase::Solid;
        self.generation += 1;
        self.timer()
    }

    /// The timer for the current generation
    pub fn timer(&self) -> BlinkTimer {
        BlinkTimer {
            generation: self.generation,
            delay: self.delay,
        }
    }

    /// Start blinking if `timer` is still current. Returns whether it was.
    pub fn fire(&mut self, timer: BlinkTimer) -> bool {
        if timer.generation != self.generation {
            return false;
        }
        self.phase = BlinkPhase::Blinking;
        true
    }
}

impl Default for Blink {
    fn default() -> Self {
        Self::new(DEFAULT_BLINK_DELAY)
    }
}
