/// Sample-driven sleep and occupancy pipeline
///
/// Every sample drives the occupancy check. Every 10th sample closes an
/// epoch, and every 6th epoch closes a minute, which runs the classifier,
/// the rescorer and the history in that order before the call returns.
/// There is no timer: if the source stalls, every cadence shifts with it.
use log::{debug, info, warn};

use crate::detection::{
    classify, rescore, ActivityWindow, EpochAggregator, OccupancyDetector, SleepHistory,
};
use crate::models::{MinuteRecord, ReportEvent, Sample};
use crate::reporting::ReportSink;
use crate::sensor::{SampleSource, SourceError};

/// Everything produced by one sample
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub occupancy: Option<ReportEvent>,
    pub minute: Option<MinuteRecord>,
    pub sleep: Option<ReportEvent>,
}

impl TickOutput {
    pub fn events(&self) -> impl Iterator<Item = &ReportEvent> {
        self.occupancy.iter().chain(self.sleep.iter())
    }
}

/// Pipeline state, owned by the run loop
#[derive(Debug, Clone, Default)]
pub struct SleepPipeline {
    occupancy: OccupancyDetector,
    epochs: EpochAggregator,
    activity: ActivityWindow,
    history: SleepHistory,
    samples: u64,
    minutes: u64,
}

impl SleepPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &SleepHistory {
        &self.history
    }

    pub fn occupancy(&self) -> &OccupancyDetector {
        &self.occupancy
    }

    pub fn samples_seen(&self) -> u64 {
        self.samples
    }

    /// Feed one sample through every stage whose cadence it completes
    pub fn ingest(&mut self, sample: &Sample) -> TickOutput {
        self.samples += 1;

        let mut output = TickOutput {
            occupancy: self.occupancy.update(sample).map(ReportEvent::occupancy),
            ..TickOutput::default()
        };

        let Some(epoch) = self.epochs.push(sample) else {
            return output;
        };
        debug!("Epoch at sample {}: {:.2}", self.samples, epoch);

        let Some(activity) = self.activity.push(epoch) else {
            return output;
        };
        debug!("Activity score: {:.2}", activity);

        let Some(window) = self.activity.window() else {
            return output;
        };
        let raw = classify(&window);
        self.activity.slide();

        let rescored = rescore(self.history.raw(), raw);
        output.sleep = self.history.record(raw, rescored).map(ReportEvent::sleep);

        self.minutes += 1;
        output.minute = Some(MinuteRecord {
            minute: self.minutes,
            activity,
            raw,
            rescored,
        });

        output
    }
}

/// Drive the pipeline until the source fails or runs dry
///
/// Returns the terminal source condition. Sink failures are logged and
/// never interrupt the loop.
pub async fn run_monitor<S, R>(
    source: &mut S,
    pipeline: &mut SleepPipeline,
    sink: &mut R,
) -> SourceError
where
    S: SampleSource,
    R: ReportSink,
{
    info!("Starting sleep monitor");

    loop {
        let sample = match source.next_sample().await {
            Ok(sample) => sample,
            Err(e) => return e,
        };

        let output = pipeline.ingest(&sample);

        if let Some(record) = &output.minute {
            info!(
                "Minute {}: activity {:.2}, raw {}, rescored {}",
                record.minute, record.activity, record.raw, record.rescored
            );
        }

        for event in output.events() {
            if let Err(e) = sink.report(event) {
                warn!("Failed to report {} change: {}", event.kind.as_str(), e);
            }
        }
    }
}
