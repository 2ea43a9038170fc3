use eegwire_frame::{Frame, BYTES_PER_CHANNEL, CHANNEL_COUNT};
use tracing::trace;

use crate::sample::DecodedSample;

/// Read a big-endian two's-complement 24-bit field.
///
/// The field is loaded into the top three bytes of an `i32` and shifted
/// back down, so the arithmetic shift does the sign extension.
pub fn read_i24_be(field: [u8; BYTES_PER_CHANNEL]) -> i32 {
    i32::from_be_bytes([field[0], field[1], field[2], 0]) >> 8
}

/// Configuration for [`PacketDecoder`].
#[derive(Debug, Clone, Default)]
pub struct DecoderConfig {
    /// Copy the six auxiliary bytes into each sample. Default: false.
    pub keep_aux: bool,
}

/// Decodes validated frames and numbers them.
#[derive(Debug, Default)]
pub struct PacketDecoder {
    config: DecoderConfig,
    next_sequence: u64,
}

impl PacketDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            config,
            next_sequence: 0,
        }
    }

    /// Decode one frame.
    ///
    /// Never fails: a [`Frame`] can only exist once its length and markers
    /// have been checked. Each call takes the next sequence number.
    pub fn decode(&mut self, frame: &Frame) -> DecodedSample {
        let channels: [i32; CHANNEL_COUNT] =
            std::array::from_fn(|index| read_i24_be(frame.channel_field(index)));

        let sequence = self.next_sequence;
        self.next_sequence += 1;
        trace!(sequence, status = frame.status(), "decoded frame");

        DecodedSample {
            sequence,
            status: frame.status(),
            channels,
            aux: self.config.keep_aux.then(|| frame.aux()),
        }
    }

    /// Number of frames decoded so far.
    pub fn decoded(&self) -> u64 {
        self.next_sequence
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}
