/// Per-second presence tracking with edge-triggered notification
use log::debug;

use crate::models::{Occupancy, PresenceCode, Sample};

/// Tracks whether a subject is present, starting unoccupied
#[derive(Debug, Clone)]
pub struct OccupancyDetector {
    state: Occupancy,
}

impl OccupancyDetector {
    pub fn new() -> Self {
        OccupancyDetector {
            state: Occupancy::Unoccupied,
        }
    }

    pub fn state(&self) -> Occupancy {
        self.state
    }

    /// Check one sample and return the new state if it flipped
    ///
    /// A sensor presence code takes precedence over the magnitude. Without a
    /// code, any non-zero magnitude counts as presence.
    pub fn update(&mut self, sample: &Sample) -> Option<Occupancy> {
        let present = match sample.presence {
            Some(PresenceCode::Present) => true,
            Some(PresenceCode::Absent) => false,
            None => sample.magnitude != 0.0,
        };

        let next = if present {
            Occupancy::Occupied
        } else {
            Occupancy::Unoccupied
        };

        if next == self.state {
            return None;
        }

        debug!("Occupancy changed: {:?} -> {:?}", self.state, next);
        self.state = next;
        Some(next)
    }
}

impl Default for OccupancyDetector {
    fn default() -> Self {
        Self::new()
    }
}
