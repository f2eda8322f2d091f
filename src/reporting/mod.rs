pub mod connection;
pub mod operations;
pub mod sink;

pub use sink::{LogSink, PostgresSink, ReportSink, SinkError};
