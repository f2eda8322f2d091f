pub mod source;

pub use source::{LineSampleSource, SampleSource, SourceError};
