//! Clocks consumed by the engines.
//!
//! An engine only ever asks "how many milliseconds do I have left?". Hosts
//! decide what stands behind that number: a running chess clock, a fixed
//! budget, or something scripted in tests.

use std::time::{Duration, Instant};

/// Reports the time left to the side that is thinking.
pub trait Clock {
    fn remaining_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn remaining_ms(&self) -> u64 {
        (**self).remaining_ms()
    }
}

/// A clock that always reports the same amount of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl FixedClock {
    pub const UNLIMITED: FixedClock = FixedClock(u64::MAX);
}

impl Clock for FixedClock {
    fn remaining_ms(&self) -> u64 {
        self.0
    }
}

/// One side's chess clock.
///
/// Time only runs between [`GameClock::start_turn`] and
/// [`GameClock::end_turn`]. The increment is credited when a turn ends on
/// time.
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Time left at the start of the current turn
    remaining: Duration,
    increment: Duration,
    /// Set while the owner is thinking
    turn_started: Option<Instant>,
}

impl GameClock {
    pub fn new(initial: Duration) -> Self {
        Self::with_increment(initial, Duration::ZERO)
    }

    pub fn with_increment(initial: Duration, increment: Duration) -> Self {
        Self {
            remaining: initial,
            increment,
            turn_started: None,
        }
    }

    /// Start counting down. Has no effect if the clock is already running.
    pub fn start_turn(&mut self) {
        if self.turn_started.is_none() {
            self.turn_started = Some(Instant::now());
        }
    }

    /// Stop the clock and return the time spent on this turn.
    pub fn end_turn(&mut self) -> Duration {
        let Some(started) = self.turn_started.take() else {
            return Duration::ZERO;
        };
        let spent = started.elapsed();
        if spent >= self.remaining {
            self.remaining = Duration::ZERO;
        } else {
            self.remaining = self.remaining - spent + self.increment;
        }
        spent
    }

    pub fn is_running(&self) -> bool {
        self.turn_started.is_some()
    }

    /// Time left, including the part of the current turn already spent.
    pub fn remaining(&self) -> Duration {
        match self.turn_started {
            Some(started) => self.remaining.saturating_sub(started.elapsed()),
            None => self.remaining,
        }
    }

    pub fn is_flagged(&self) -> bool {
        self.remaining().is_zero()
    }
}

impl Clock for GameClock {
    fn remaining_ms(&self) -> u64 {
        u64::try_from(self.remaining().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
