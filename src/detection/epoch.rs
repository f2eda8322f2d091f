use crate::models::Sample;

/// Number of per-second samples reduced into one epoch
pub const SAMPLES_PER_EPOCH: usize = 10;

/// Reduces every 10 consecutive samples to their maximum magnitude
#[derive(Debug, Clone, Default)]
pub struct EpochAggregator {
    buffer: Vec<f64>,
}

impl EpochAggregator {
    pub fn new() -> Self {
        EpochAggregator {
            buffer: Vec::with_capacity(SAMPLES_PER_EPOCH),
        }
    }

    pub fn push(&mut self, sample: &Sample) -> Option<f64> {
        self.buffer.push(sample.magnitude);
        if self.buffer.len() < SAMPLES_PER_EPOCH {
            return None;
        }

        let epoch = max_value(&self.buffer);
        self.buffer.clear();
        Some(epoch)
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

/// Maximum of a non-empty slice of readings
pub(crate) fn max_value(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_max_on_tenth_sample() {
        let mut aggregator = EpochAggregator::new();
        let readings = [0.0, 1.5, 7.25, 3.0, 0.0, 2.0, 6.0, 0.5, 1.0, 4.0];

        for (i, &m) in readings.iter().enumerate() {
            let out = aggregator.push(&Sample::new(m));
            if i < 9 {
                assert_eq!(out, None);
            } else {
                assert_eq!(out, Some(7.25));
            }
        }
        assert_eq!(aggregator.pending(), 0);
    }

    #[test]
    fn buffer_restarts_after_emission() {
        let mut aggregator = EpochAggregator::new();
        for _ in 0..SAMPLES_PER_EPOCH {
            aggregator.push(&Sample::new(9.0));
        }
        for _ in 0..SAMPLES_PER_EPOCH - 1 {
            assert_eq!(aggregator.push(&Sample::new(1.0)), None);
        }
        assert_eq!(aggregator.push(&Sample::new(0.0)), Some(1.0));
    }
}
