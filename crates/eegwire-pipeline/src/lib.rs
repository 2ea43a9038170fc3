//! Chunk-to-sample streaming for EEG radio links.
//!
//! [`StreamPipeline`] is what a notification callback talks to: hand it
//! each raw chunk with [`push`](StreamPipeline::push) and get back the
//! decoded samples that chunk completed, in stream order. Malformed input
//! never errors; it only moves the counters in [`StreamStats`].

pub mod history;
pub mod pipeline;
pub mod sink;
pub mod stats;

pub use history::{SampleHistory, DEFAULT_HISTORY_DEPTH};
pub use pipeline::{PipelineConfig, StreamPipeline};
pub use sink::SampleSink;
pub use stats::StreamStats;
