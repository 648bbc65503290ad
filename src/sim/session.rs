//! Session state machine
//!
//! `Active` counts down one second per timer tick and accepts score.
//! Reaching zero moves to `Ended` exactly once: the timer is cancelled, the
//! best score is settled with the store, and score is frozen.

use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use crate::consts::TIMER_INTERVAL;
use crate::highscores::HighScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Active,
    /// Terminal; a new session needs a new `GameState`
    Ended,
}

/// Fixed-interval countdown source owned by the session.
///
/// Hosts with their own one-second scheduler can ignore `advance` and call
/// the session's `tick_second` directly; either way, cancelling stops it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTimer {
    interval: f32,
    elapsed: f32,
    cancelled: bool,
}

impl SessionTimer {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            cancelled: false,
        }
    }

    /// Accumulate frame time and return how many ticks are due
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.cancelled {
            return 0;
        }
        self.elapsed += dt;
        let mut due = 0;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            due += 1;
        }
        due
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.elapsed = 0.0;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(TIMER_INTERVAL)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub score: u32,
    /// Whole seconds remaining
    pub time_left: u32,
    pub phase: SessionPhase,
    /// Best score known to this session
    pub high_score: u32,
    pub timer: SessionTimer,
}

impl SessionState {
    pub fn new(duration_secs: u32, high_score: u32) -> Self {
        Self {
            score: 0,
            time_left: duration_secs,
            phase: SessionPhase::Active,
            high_score,
            timer: SessionTimer::default(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    /// Add to the score while active; returns the new score
    pub fn add_score(&mut self, reward: u32, events: &mut Vec<GameEvent>) -> Option<u32> {
        if !self.is_active() {
            return None;
        }
        self.score = self.score.saturating_add(reward);
        events.push(GameEvent::ScoreChanged(self.score));
        Some(self.score)
    }

    /// One timer tick. Returns true if this tick ended the session.
    pub fn tick_second<S: HighScoreStore + ?Sized>(
        &mut self,
        store: &mut S,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if !self.is_active() || self.timer.is_cancelled() {
            return false;
        }
        self.time_left = self.time_left.saturating_sub(1);
        events.push(GameEvent::TimeChanged(self.time_left));

        if self.time_left == 0 {
            self.end(store, events);
            return true;
        }
        false
    }

    fn end<S: HighScoreStore + ?Sized>(&mut self, store: &mut S, events: &mut Vec<GameEvent>) {
        self.timer.cancel();
        self.phase = SessionPhase::Ended;

        let stored = store.load();
        if self.score > stored {
            store.save(self.score);
            log::info!("New high score: {} (was {})", self.score, stored);
            self.high_score = self.score;
        } else {
            self.high_score = self.high_score.max(stored);
        }

        log::info!(
            "Session ended: score {}, high score {}",
            self.score,
            self.high_score
        );
        events.push(GameEvent::SessionEnded {
            final_score: self.score,
            high_score: self.high_score,
        });
    }
}
