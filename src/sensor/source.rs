/// Sample acquisition from the radar's serial output or a recorded capture
use log::{debug, info};
use std::path::Path;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::models::{PresenceCode, Sample};

/// Terminal conditions of a sample source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("sample source exhausted")]
    Exhausted,
    #[error("sample source I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed sample on line {line}: '{content}'")]
    Malformed { line: usize, content: String },
}

/// Produces one sample per second for the pipeline
///
/// Errors are terminal. Implementations must not fabricate samples.
#[allow(async_fn_in_trait)]
pub trait SampleSource {
    async fn next_sample(&mut self) -> Result<Sample, SourceError>;
}

/// Parse a `magnitude[,sensor_state]` line
///
/// Returns None if the magnitude is not a finite, non-negative number or the
/// sensor state is not an integer.
pub fn parse_sample_line(line: &str) -> Option<Sample> {
    let mut fields = line.split(',').map(str::trim);

    let magnitude: f64 = fields.next()?.parse().ok()?;
    if !magnitude.is_finite() || magnitude < 0.0 {
        return None;
    }

    let presence = match fields.next() {
        Some(state) if !state.is_empty() => PresenceCode::from_sensor_state(state.parse().ok()?),
        _ => None,
    };

    Some(Sample {
        magnitude,
        presence,
    })
}

/// Line-oriented reader: one sample per line, optional header row
pub struct LineSampleSource<R> {
    reader: R,
    line_number: usize,
    header_checked: bool,
}

impl LineSampleSource<BufReader<File>> {
    /// Open a serial character device or a recorded CSV capture
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).await?;
        info!("Reading samples from {}", path.display());
        Ok(LineSampleSource::new(BufReader::new(file)))
    }
}

impl<R: AsyncBufRead + Unpin> LineSampleSource<R> {
    pub fn new(reader: R) -> Self {
        LineSampleSource {
            reader,
            line_number: 0,
            header_checked: false,
        }
    }
}

impl<R: AsyncBufRead + Unpin> SampleSource for LineSampleSource<R> {
    async fn next_sample(&mut self) -> Result<Sample, SourceError> {
        let mut line = String::new();

        loop {
            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                return Err(SourceError::Exhausted);
            }
            self.line_number += 1;

            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }

            match parse_sample_line(content) {
                Some(sample) => {
                    self.header_checked = true;
                    return Ok(sample);
                }
                None if !self.header_checked => {
                    // Recorded captures start with a column header
                    debug!("Skipping header line: '{}'", content);
                    self.header_checked = true;
                }
                None => {
                    return Err(SourceError::Malformed {
                        line: self.line_number,
                        content: content.to_string(),
                    })
                }
            }
        }
    }
}
