use serde::Serialize;

/// Per-pipeline counters, refreshed on every push.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    /// Total bytes pushed.
    pub bytes_ingested: u64,
    /// Frames that passed marker validation.
    pub frames_validated: u64,
    /// Full-length candidates dropped for a bad end marker.
    pub frames_rejected: u64,
    /// Accumulator flushes caused by a missing start marker.
    pub buffer_flushes: u64,
    /// Garbage bytes dropped outside of rejected candidates.
    pub bytes_discarded: u64,
    /// Samples handed to consumers.
    pub samples_decoded: u64,
    /// Bytes waiting in the accumulator.
    pub buffered_bytes: usize,
}
