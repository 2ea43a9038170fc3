use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Total wire size of one frame.
pub const FRAME_SIZE: usize = 33;

/// First byte of every frame.
pub const START_MARKER: u8 = 0xA0;

/// Last byte of every valid frame.
pub const END_MARKER: u8 = 0xC0;

/// Offset of the opaque status byte.
pub const STATUS_OFFSET: usize = 1;

/// Offset of the first channel field.
pub const CHANNEL_OFFSET: usize = 2;

/// Number of channel fields per frame.
pub const CHANNEL_COUNT: usize = 8;

/// Width of one channel field (signed 24-bit big-endian).
pub const BYTES_PER_CHANNEL: usize = 3;

/// Offset of the auxiliary motion bytes.
pub const AUX_OFFSET: usize = CHANNEL_OFFSET + CHANNEL_COUNT * BYTES_PER_CHANNEL;

/// Length of the auxiliary motion bytes.
pub const AUX_LEN: usize = 6;

/// Largest value a channel field can carry.
pub const SAMPLE_MAX: i32 = 0x7F_FFFF;

/// Smallest value a channel field can carry.
pub const SAMPLE_MIN: i32 = -0x80_0000;

/// Nominal device output rate, one frame per sample period.
pub const SAMPLE_RATE_HZ: u32 = 250;

/// A validated 33-byte frame.
///
/// Holding a `Frame` guarantees the length and both markers have been checked,
/// so readers of the channel fields never need to re-validate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// Wrap a candidate that the assembler has already checked.
    pub(crate) fn from_validated(bytes: Bytes) -> Self {
        debug_assert_eq!(bytes.len(), FRAME_SIZE);
        debug_assert_eq!(bytes[0], START_MARKER);
        debug_assert_eq!(bytes[FRAME_SIZE - 1], END_MARKER);
        Self { bytes }
    }

    /// Validate a raw byte run as a frame.
    ///
    /// Unlike the streaming assembler this does not search for a start
    /// marker: byte 0 must be 0xA0 and byte 32 must be 0xC0.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        if raw.len() != FRAME_SIZE {
            return Err(FrameError::InvalidLength { len: raw.len() });
        }
        if raw[0] != START_MARKER {
            return Err(FrameError::MissingStartMarker);
        }
        check_end_marker(raw)?;
        Ok(Self {
            bytes: Bytes::copy_from_slice(raw),
        })
    }

    /// The opaque status byte (offset 1).
    pub fn status(&self) -> u8 {
        self.bytes[STATUS_OFFSET]
    }

    /// The raw 3-byte field of channel `index` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `index >= CHANNEL_COUNT`.
    pub fn channel_field(&self, index: usize) -> [u8; BYTES_PER_CHANNEL] {
        assert!(index < CHANNEL_COUNT, "channel index {index} out of range");
        let offset = CHANNEL_OFFSET + index * BYTES_PER_CHANNEL;
        [
            self.bytes[offset],
            self.bytes[offset + 1],
            self.bytes[offset + 2],
        ]
    }

    /// The auxiliary motion bytes, uninterpreted.
    pub fn aux(&self) -> [u8; AUX_LEN] {
        let mut aux = [0u8; AUX_LEN];
        aux.copy_from_slice(&self.bytes[AUX_OFFSET..AUX_OFFSET + AUX_LEN]);
        aux
    }

    /// The full 33 wire bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the frame and return its wire bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = FrameError;

    fn try_from(raw: &[u8]) -> Result<Self> {
        Self::parse(raw)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

pub(crate) fn check_end_marker(candidate: &[u8]) -> Result<()> {
    let found = candidate[FRAME_SIZE - 1];
    if found == END_MARKER {
        Ok(())
    } else {
        Err(FrameError::InvalidEndMarker { found })
    }
}

/// Encode one frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌────────┬────────┬──────────────────────┬────────────┬────────┐
/// │ 0xA0   │ status │ 8 × i24 big-endian   │ aux (6B)   │ 0xC0   │
/// │ (1B)   │ (1B)   │ (24B)                │            │ (1B)   │
/// └────────┴────────┴──────────────────────┴────────────┴────────┘
/// ```
///
/// Nothing is written if any channel value falls outside the signed
/// 24-bit range.
pub fn encode_frame(
    status: u8,
    channels: &[i32; CHANNEL_COUNT],
    aux: &[u8; AUX_LEN],
    dst: &mut BytesMut,
) -> Result<()> {
    for (channel, &value) in channels.iter().enumerate() {
        if !(SAMPLE_MIN..=SAMPLE_MAX).contains(&value) {
            return Err(FrameError::SampleOutOfRange { channel, value });
        }
    }

    dst.reserve(FRAME_SIZE);
    dst.put_u8(START_MARKER);
    dst.put_u8(status);
    for &value in channels {
        // Two's complement: the low three bytes of the i32 are the i24.
        dst.put_slice(&value.to_be_bytes()[1..]);
    }
    dst.put_slice(aux);
    dst.put_u8(END_MARKER);
    Ok(())
}
