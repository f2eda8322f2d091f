/// Delivery of edge-triggered reports to the outside world
use log::{error, info};
use thiserror::Error;

use crate::models::{ReportEvent, ReportKind};
use crate::reporting::connection::{parse_database_url, DatabaseTarget};
use crate::reporting::operations::store_report_event;
use crate::utils::format_datetime;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("no async runtime available to deliver the report")]
    NoRuntime,
    #[error("report delivery failed: {0}")]
    Delivery(String),
}

/// Receives reports on state changes only
///
/// Delivery is fire-and-forget: implementations must return promptly and
/// must not retry on the caller's time.
pub trait ReportSink {
    fn report(&mut self, event: &ReportEvent) -> Result<(), SinkError>;
}

/// Writes reports to the log; used when no database is configured
#[derive(Debug, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn report(&mut self, event: &ReportEvent) -> Result<(), SinkError> {
        let label = match event.kind {
            ReportKind::Occupancy => "Occupancy Report",
            ReportKind::Sleep => "Sleep Report",
        };
        info!(
            "{}: {} at {}",
            label,
            event.value,
            format_datetime(&event.time)
        );
        Ok(())
    }
}

/// Stores reports in PostgreSQL from background tasks
#[derive(Debug, Clone)]
pub struct PostgresSink {
    monitor: String,
    target: DatabaseTarget,
}

impl PostgresSink {
    pub fn new(monitor: &str, database_url: &str) -> Result<Self, SinkError> {
        let target = parse_database_url(database_url).map_err(SinkError::Delivery)?;
        Ok(PostgresSink {
            monitor: monitor.to_string(),
            target,
        })
    }
}

impl ReportSink for PostgresSink {
    fn report(&mut self, event: &ReportEvent) -> Result<(), SinkError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| SinkError::NoRuntime)?;

        let monitor = self.monitor.clone();
        let target = self.target.clone();
        let event = event.clone();
        handle.spawn(async move {
            match store_report_event(&monitor, &event, &target).await {
                Ok(()) => info!(
                    "Stored {} report {} for {}",
                    event.kind.as_str(),
                    event.value,
                    monitor
                ),
                Err(e) => error!(
                    "Failed to store {} report for {}: {}",
                    event.kind.as_str(),
                    monitor,
                    e
                ),
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Occupancy, SleepState};

    const URL: &str = "postgres://db.invalid/sleep?sslrootcert=/nonexistent/ca.pem";

    #[test]
    fn log_sink_accepts_all_reports() {
        let mut sink = LogSink;
        assert!(sink.report(&ReportEvent::sleep(SleepState::Asleep)).is_ok());
        assert!(sink
            .report(&ReportEvent::occupancy(Occupancy::Occupied))
            .is_ok());
    }

    #[test]
    fn postgres_sink_requires_sslrootcert() {
        let result = PostgresSink::new("bedroom", "postgres://db.invalid/sleep");
        assert!(matches!(result, Err(SinkError::Delivery(_))));
    }

    #[test]
    fn postgres_sink_outside_runtime_fails() {
        let mut sink = PostgresSink::new("bedroom", URL).unwrap();
        let result = sink.report(&ReportEvent::sleep(SleepState::Awake));
        assert!(matches!(result, Err(SinkError::NoRuntime)));
    }

    #[tokio::test]
    async fn postgres_sink_does_not_block_caller() {
        let mut sink = PostgresSink::new("bedroom", URL).unwrap();
        // The delivery task fails on the missing certificate in the background
        assert!(sink.report(&ReportEvent::sleep(SleepState::Awake)).is_ok());
    }
}
