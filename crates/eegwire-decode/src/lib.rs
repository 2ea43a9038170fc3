//! Decoding of validated EEG frames into channel samples.
//!
//! [`PacketDecoder`] turns each [`Frame`](eegwire_frame::Frame) into a
//! [`DecodedSample`]: eight sign-extended 24-bit readings tagged with a
//! decoder-assigned sequence number. [`ScaleConfig`] converts raw counts to
//! microvolts for display.

pub mod decoder;
pub mod error;
pub mod sample;
pub mod scale;

pub use decoder::{read_i24_be, DecoderConfig, PacketDecoder};
pub use error::{DecodeError, Result};
pub use sample::DecodedSample;
pub use scale::{ScaleConfig, DEFAULT_GAIN, DEFAULT_VREF_VOLTS, SUPPORTED_GAINS};
