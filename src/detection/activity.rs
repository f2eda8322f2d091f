/// Minute-level activity scores and the trailing classification window
use std::collections::VecDeque;

use crate::detection::epoch::max_value;

/// Epochs reduced into one activity score (one minute)
pub const EPOCHS_PER_MINUTE: usize = 6;
/// Activity scores consumed by one classification
pub const WINDOW_LEN: usize = 7;
/// Neutral startup score so the first minutes still classify
pub const SEED_ACTIVITY: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct ActivityWindow {
    epochs: Vec<f64>,
    scores: VecDeque<f64>,
}

impl ActivityWindow {
    /// Start with six seeded scores; the first real minute completes the window
    pub fn new() -> Self {
        let mut scores = VecDeque::with_capacity(WINDOW_LEN);
        scores.extend(std::iter::repeat(SEED_ACTIVITY).take(WINDOW_LEN - 1));

        ActivityWindow {
            epochs: Vec::with_capacity(EPOCHS_PER_MINUTE),
            scores,
        }
    }

    /// Buffer an epoch; on the sixth, append and return the minute's score
    pub fn push(&mut self, epoch: f64) -> Option<f64> {
        self.epochs.push(epoch);
        if self.epochs.len() < EPOCHS_PER_MINUTE {
            return None;
        }

        let score = max_value(&self.epochs);
        self.epochs.clear();

        // Never grow past the window, even if the previous one was not consumed
        if self.scores.len() == WINDOW_LEN {
            self.scores.pop_front();
        }
        self.scores.push_back(score);
        Some(score)
    }

    /// The full window ordered oldest to newest, or None while it is short
    pub fn window(&self) -> Option<[f64; WINDOW_LEN]> {
        if self.scores.len() < WINDOW_LEN {
            return None;
        }

        let mut window = [0.0; WINDOW_LEN];
        for (slot, score) in window.iter_mut().zip(self.scores.iter()) {
            *slot = *score;
        }
        Some(window)
    }

    /// Evict the oldest score after a classification consumed the window
    pub fn slide(&mut self) {
        if self.scores.len() == WINDOW_LEN {
            self.scores.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }
}

impl Default for ActivityWindow {
    fn default() -> Self {
        Self::new()
    }
}
