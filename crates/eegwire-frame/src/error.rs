/// Errors that can occur while locating, validating or encoding frames.
///
/// The first three variants describe conditions in the incoming byte stream.
/// [`FrameAssembler`](crate::FrameAssembler) resolves them internally and only
/// counts them; they surface as errors from [`Frame::parse`](crate::Frame::parse).
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// No start marker (0xA0) where a frame must begin.
    #[error("missing frame start marker (expected 0xA0)")]
    MissingStartMarker,

    /// A start marker exists but the frame is not complete yet.
    #[error("incomplete frame ({available} of {needed} bytes)")]
    IncompleteFrame { available: usize, needed: usize },

    /// A full-length candidate whose last byte is not the end marker.
    #[error("invalid frame end marker 0x{found:02X} (expected 0xC0)")]
    InvalidEndMarker { found: u8 },

    /// A byte run handed to [`Frame::parse`](crate::Frame::parse) has the wrong length.
    #[error("invalid frame length ({len} bytes, expected 33)")]
    InvalidLength { len: usize },

    /// A channel value does not fit in a signed 24-bit field.
    #[error("channel {channel} sample {value} out of 24-bit range")]
    SampleOutOfRange { channel: usize, value: i32 },

    /// An I/O error occurred while reading chunks.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The byte source reached EOF before another complete frame arrived.
    #[error("stream closed (no further complete frame)")]
    ConnectionClosed,
}

pub type Result<T> = std::result::Result<T, FrameError>;
