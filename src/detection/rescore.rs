/// Rescoring of raw classifications to suppress false "asleep" minutes
///
/// Actigraphy undercounts wakefulness when a subject lies still for a short
/// while inside an awake period (reading, watching TV). After a long enough
/// run of awake minutes, a following asleep minute is rescored as awake.
///
/// Each rule is a run of consecutive awake minutes that must end `gap`
/// minutes before the current one. Rules are tried in order and the first
/// match wins:
///
/// | Rule | Run | Gap | History needed |
/// |------|-----|-----|----------------|
/// | 4-minute wake | 4 | 0 | 4 |
/// | 10-minute wake | 10 | 1 | 11 |
/// | 10-minute wake | 10 | 2 | 12 |
/// | 15-minute wake | 15 | 4 | 19 |
///
/// A rule whose span is longer than the available history does not fire.
use std::collections::VecDeque;

use crate::models::SleepState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AwakeBout {
    /// Consecutive awake minutes required
    pub run: usize,
    /// Most recent history minutes skipped before the run ends
    pub gap: usize,
}

impl AwakeBout {
    const fn new(run: usize, gap: usize) -> Self {
        AwakeBout { run, gap }
    }

    pub fn span(&self) -> usize {
        self.run + self.gap
    }

    /// Whether the history (oldest first, current minute excluded) ends with this bout
    pub fn matches(&self, history: &VecDeque<SleepState>) -> bool {
        let len = history.len();
        if len < self.span() {
            return false;
        }

        let end = len - self.gap;
        history
            .range(end - self.run..end)
            .all(|state| *state == SleepState::Awake)
    }
}

pub const RESCORE_RULES: [AwakeBout; 4] = [
    AwakeBout::new(4, 0),
    AwakeBout::new(10, 1),
    AwakeBout::new(10, 2),
    AwakeBout::new(15, 4),
];

/// Rescore the current raw classification against the prior raw history
pub fn rescore(raw_history: &VecDeque<SleepState>, newest_raw: SleepState) -> SleepState {
    if newest_raw != SleepState::Asleep {
        return newest_raw;
    }

    if RESCORE_RULES.iter().any(|rule| rule.matches(raw_history)) {
        SleepState::Awake
    } else {
        SleepState::Asleep
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SleepState::{Asleep, Awake, Unoccupied};

    fn history(states: &[SleepState]) -> VecDeque<SleepState> {
        states.iter().copied().collect()
    }

    fn repeat(state: SleepState, n: usize) -> Vec<SleepState> {
        vec![state; n]
    }

    #[test]
    fn awake_and_unoccupied_pass_through() {
        let histories = [
            history(&[]),
            history(&repeat(Asleep, 30)),
            history(&repeat(Awake, 30)),
        ];
        for h in &histories {
            assert_eq!(rescore(h, Awake), Awake);
            assert_eq!(rescore(h, Unoccupied), Unoccupied);
        }
    }

    #[test]
    fn four_minute_rule() {
        let mut states = repeat(Asleep, 6);
        states.extend(repeat(Awake, 4));
        assert_eq!(rescore(&history(&states), Asleep), Awake);

        // Three awake minutes are not enough
        let mut short = repeat(Asleep, 7);
        short.extend(repeat(Awake, 3));
        assert_eq!(rescore(&history(&short), Asleep), Asleep);
    }

    #[test]
    fn four_minute_rule_with_exact_history() {
        assert_eq!(rescore(&history(&repeat(Awake, 4)), Asleep), Awake);
        assert_eq!(rescore(&history(&repeat(Awake, 3)), Asleep), Asleep);
    }

    #[test]
    fn ten_minute_rule_one_minute_gap() {
        let mut states = repeat(Asleep, 2);
        states.extend(repeat(Awake, 10));
        states.push(Asleep);
        assert_eq!(rescore(&history(&states), Asleep), Awake);
    }

    #[test]
    fn ten_minute_rule_two_minute_gap() {
        let mut states = repeat(Awake, 10);
        states.extend([Asleep, Asleep]);
        assert_eq!(rescore(&history(&states), Asleep), Awake);

        // Nine awake minutes before the gap do not qualify
        let mut short = vec![Asleep];
        short.extend(repeat(Awake, 9));
        short.extend([Asleep, Asleep]);
        assert_eq!(rescore(&history(&short), Asleep), Asleep);
    }

    #[test]
    fn fifteen_minute_rule_four_minute_gap() {
        let mut states = repeat(Asleep, 3);
        states.extend(repeat(Awake, 15));
        states.extend(repeat(Asleep, 4));
        assert_eq!(rescore(&history(&states), Asleep), Awake);

        let mut short = repeat(Asleep, 4);
        short.extend(repeat(Awake, 14));
        short.extend(repeat(Asleep, 4));
        assert_eq!(rescore(&history(&short), Asleep), Asleep);
    }

    #[test]
    fn fifteen_minute_rule_needs_full_span() {
        // 15 awake then 3 asleep: only 18 entries, and no other rule matches
        let mut states = repeat(Awake, 15);
        states.extend(repeat(Asleep, 3));
        assert_eq!(rescore(&history(&states), Asleep), Asleep);
    }

    #[test]
    fn no_match_stays_asleep() {
        assert_eq!(rescore(&history(&repeat(Asleep, 20)), Asleep), Asleep);
        assert_eq!(rescore(&history(&[]), Asleep), Asleep);
    }

    #[test]
    fn unoccupied_minutes_break_a_bout() {
        let mut states = repeat(Awake, 3);
        states.push(Unoccupied);
        states.extend(repeat(Awake, 3));
        assert_eq!(rescore(&history(&states), Asleep), Asleep);
    }

    #[test]
    fn rule_spans() {
        let spans: Vec<usize> = RESCORE_RULES.iter().map(AwakeBout::span).collect();
        assert_eq!(spans, vec![4, 11, 12, 19]);
    }
}
