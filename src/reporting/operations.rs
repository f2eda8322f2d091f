/// Database operations for storing report events
use crate::models::ReportEvent;
use crate::reporting::connection::{execute_with_retry, DatabaseTarget};

/// Store one occupancy or sleep report in the monitor_reports table
///
/// # Arguments
/// * `monitor` - Name identifying this monitor
/// * `event` - Edge-triggered report to store
/// * `target` - Parsed PostgreSQL connection target
///
/// # Returns
/// Result indicating success or failure after all retries
pub async fn store_report_event(
    monitor: &str,
    event: &ReportEvent,
    target: &DatabaseTarget,
) -> Result<(), String> {
    // Clone data for move into async closure
    let monitor = monitor.to_string();
    let event = event.clone();

    execute_with_retry(target, move |client| {
        let monitor = monitor.clone();
        let event = event.clone();
        async move {
            client
                .execute(
                    "INSERT INTO monitor_reports(monitor, kind, value, time)
                     VALUES ($1, $2, $3, $4)",
                    &[&monitor, &event.kind.as_str(), &event.value, &event.time],
                )
                .await
        }
    })
    .await
}
