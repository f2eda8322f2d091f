/// Cole-Kripke actigraphy scoring
///
/// Scores the last seven minutes of activity, oldest first, with fixed
/// weights. A score of 1.0 or more means awake. The heaviest weighted minute
/// (two minutes before the current one) also serves as the presence check:
/// a full minute of zero movement there means nobody is in bed.
use crate::detection::activity::WINDOW_LEN;
use crate::models::SleepState;

// Weights for minutes t-6 .. t
const WEIGHTS: [f64; WINDOW_LEN] = [404.0, 598.0, 326.0, 441.0, 1408.0, 508.0, 350.0];
const SCALE: f64 = 0.00001;
const AWAKE_THRESHOLD: f64 = 1.0;
// Index of the 1408 weight
const PRESENCE_INDEX: usize = 4;

pub fn cole_kripke_score(window: &[f64; WINDOW_LEN]) -> f64 {
    SCALE
        * WEIGHTS
            .iter()
            .zip(window.iter())
            .map(|(w, a)| w * a)
            .sum::<f64>()
}

pub fn classify(window: &[f64; WINDOW_LEN]) -> SleepState {
    if window[PRESENCE_INDEX] == 0.0 {
        return SleepState::Unoccupied;
    }

    if cole_kripke_score(window) >= AWAKE_THRESHOLD {
        SleepState::Awake
    } else {
        SleepState::Asleep
    }
}
