//! Marker-delimited frame assembly for chunked EEG radio streams.
//!
//! The acquisition device emits fixed 33-byte frames:
//! - A start marker (0xA0) and an end marker (0xC0)
//! - One opaque status byte
//! - Eight signed 24-bit big-endian channel samples
//! - Six opaque auxiliary bytes
//!
//! The radio link delivers those frames in notification chunks whose
//! boundaries have nothing to do with frame boundaries. [`FrameAssembler`]
//! turns that chunk stream back into validated [`Frame`]s.

pub mod assembler;
#[cfg(feature = "async")]
pub mod codec;
pub mod error;
pub mod frame;
pub mod reader;

pub use assembler::{AssemblerConfig, AssemblerCounters, FrameAssembler};
#[cfg(feature = "async")]
pub use codec::FrameCodec;
pub use error::{FrameError, Result};
pub use frame::{
    encode_frame, Frame, AUX_LEN, AUX_OFFSET, BYTES_PER_CHANNEL, CHANNEL_COUNT, CHANNEL_OFFSET,
    END_MARKER, FRAME_SIZE, SAMPLE_MAX, SAMPLE_MIN, SAMPLE_RATE_HZ, START_MARKER, STATUS_OFFSET,
};
pub use reader::FrameReader;
