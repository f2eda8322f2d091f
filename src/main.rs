mod config;
mod detection;
mod models;
mod pipeline;
mod reporting;
mod sensor;
mod utils;

use log::{error, info, warn};

use config::MonitorConfig;
use pipeline::{run_monitor, SleepPipeline};
use reporting::{LogSink, PostgresSink, ReportSink};
use sensor::{LineSampleSource, SampleSource, SourceError};
use utils::history_csv;

/// Run the pipeline against Ctrl+C and return the terminal source error, if any
async fn monitor<S, R>(
    source: &mut S,
    pipeline: &mut SleepPipeline,
    sink: &mut R,
) -> Option<SourceError>
where
    S: SampleSource,
    R: ReportSink,
{
    // Handle Ctrl+C gracefully
    let (tx, mut rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(());
            }
            Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
        }
    });

    // A minute cycle runs synchronously, so cancellation only lands between samples
    tokio::select! {
        reason = run_monitor(source, pipeline, sink) => Some(reason),
        _ = &mut rx => {
            info!("Program terminated by user. Exiting gracefully.");
            None
        }
    }
}

async fn export_history(pipeline: &SleepPipeline, path: &str) {
    match tokio::fs::write(path, history_csv(pipeline.history())).await {
        Ok(()) => info!(
            "Wrote {} minutes of sleep history to {}",
            pipeline.history().len(),
            path
        ),
        Err(e) => error!("Failed to write sleep history to {}: {}", path, e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match MonitorConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let mut source = match LineSampleSource::open(&config.sample_source).await {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to open sample source {}: {}", config.sample_source, e);
            return Err(e.into());
        }
    };

    let mut pipeline = SleepPipeline::new();

    let outcome = match &config.database_url {
        Some(database_url) => {
            let mut sink = PostgresSink::new(&config.monitor_name, database_url)?;
            info!("Reporting to PostgreSQL as {}", config.monitor_name);
            monitor(&mut source, &mut pipeline, &mut sink).await
        }
        None => {
            warn!("DATABASE_URL not set, reports will only be logged");
            monitor(&mut source, &mut pipeline, &mut LogSink).await
        }
    };

    if let Some(path) = &config.history_path {
        export_history(&pipeline, path).await;
    }

    info!(
        "Processed {} samples, {} minutes classified, last occupancy {:?}",
        pipeline.samples_seen(),
        pipeline.history().len(),
        pipeline.occupancy().state()
    );

    match outcome {
        Some(SourceError::Exhausted) => {
            info!("End of sample input");
            Ok(())
        }
        Some(e) => {
            error!("Fatal error: {}", e);
            Err(e.into())
        }
        None => Ok(()),
    }
}
