//! Streaming frame assembly and decoding for wireless EEG acquisition devices.
//!
//! eegwire takes the raw notification payloads a headset pushes over its
//! radio link and turns them into numbered eight-channel samples, surviving
//! misaligned chunks, dropped bytes and corrupt frames along the way.
//!
//! # Crate Structure
//!
//! - [`frame`] - Wire layout, frame assembly and resynchronization
//! - [`decode`] - 24-bit channel decoding and microvolt scaling
//! - [`pipeline`] - Chunk-to-sample pipeline, statistics and sample sinks

/// Re-export frame types.
pub mod frame {
    pub use eegwire_frame::*;
}

/// Re-export decode types.
pub mod decode {
    pub use eegwire_decode::*;
}

/// Re-export pipeline types.
pub mod pipeline {
    pub use eegwire_pipeline::*;
}

pub use eegwire_decode::DecodedSample;
pub use eegwire_pipeline::{StreamPipeline, StreamStats};
