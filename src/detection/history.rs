use std::collections::VecDeque;

use crate::models::SleepState;

/// About 24 hours at one classification per minute
pub const HISTORY_CAPACITY: usize = 1440;

/// Bounded raw and rescored classification history
///
/// Both sequences are capped and drop their oldest entry once full. A sleep
/// report is due on the first recorded value and on every change of the
/// rescored value afterwards.
#[derive(Debug, Clone)]
pub struct SleepHistory {
    raw: VecDeque<SleepState>,
    rescored: VecDeque<SleepState>,
    capacity: usize,
}

impl SleepHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        SleepHistory {
            raw: VecDeque::with_capacity(capacity),
            rescored: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Raw classifications, oldest first
    pub fn raw(&self) -> &VecDeque<SleepState> {
        &self.raw
    }

    pub fn rescored(&self) -> &VecDeque<SleepState> {
        &self.rescored
    }

    pub fn len(&self) -> usize {
        self.rescored.len()
    }

    /// Append one minute and return the rescored state if it must be reported
    pub fn record(&mut self, raw: SleepState, rescored: SleepState) -> Option<SleepState> {
        let changed = self.rescored.back() != Some(&rescored);

        push_capped(&mut self.raw, raw, self.capacity);
        push_capped(&mut self.rescored, rescored, self.capacity);

        changed.then_some(rescored)
    }
}

impl Default for SleepHistory {
    fn default() -> Self {
        Self::new()
    }
}

fn push_capped(buffer: &mut VecDeque<SleepState>, value: SleepState, capacity: usize) {
    if buffer.len() == capacity {
        buffer.pop_front();
    }
    buffer.push_back(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SleepState::{Asleep, Awake, Unoccupied};

    #[test]
    fn reports_first_value_and_changes_only() {
        let mut history = SleepHistory::new();

        assert_eq!(history.record(Awake, Awake), Some(Awake));
        assert_eq!(history.record(Asleep, Awake), None);
        assert_eq!(history.record(Asleep, Asleep), Some(Asleep));
        assert_eq!(history.record(Asleep, Asleep), None);
        assert_eq!(history.record(Unoccupied, Unoccupied), Some(Unoccupied));
        assert_eq!(history.len(), 5);
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut history = SleepHistory::new();
        history.record(Unoccupied, Unoccupied);
        for _ in 0..HISTORY_CAPACITY {
            history.record(Asleep, Awake);
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.raw().len(), HISTORY_CAPACITY);
        assert!(history.raw().iter().all(|s| *s == Asleep));
        assert!(history.rescored().iter().all(|s| *s == Awake));
    }

    #[test]
    fn edge_trigger_survives_eviction() {
        let mut history = SleepHistory::with_capacity(2);
        assert!(history.record(Awake, Awake).is_some());
        for _ in 0..5 {
            assert_eq!(history.record(Awake, Awake), None);
        }
        assert_eq!(history.record(Asleep, Asleep), Some(Asleep));
        assert_eq!(history.rescored().iter().copied().collect::<Vec<_>>(), vec![Awake, Asleep]);
    }
}
