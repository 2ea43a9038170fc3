use bytes::{Buf, BytesMut};
use tracing::{debug, trace};

use crate::error::{FrameError, Result};
use crate::frame::{check_end_marker, Frame, FRAME_SIZE, START_MARKER, STATUS_OFFSET};

const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Configuration for [`FrameAssembler`].
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// Initial accumulator capacity in bytes. Default: 1 KiB.
    pub initial_capacity: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// Running totals kept by an assembler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblerCounters {
    /// Bytes handed to `ingest`.
    pub bytes_ingested: u64,
    /// Candidates that passed the end-marker check.
    pub frames_validated: u64,
    /// Candidates dropped for a bad end marker.
    pub frames_rejected: u64,
    /// Times the accumulator was cleared for lack of any start marker.
    pub buffer_flushes: u64,
    /// Bytes dropped as garbage, either before a start marker or by a flush.
    /// Rejected candidates are not included.
    pub bytes_discarded: u64,
}

/// Outcome of one extraction step over the accumulator.
pub(crate) enum Step {
    Frame(Frame),
    Rejected,
    Flushed,
    NeedMore,
}

/// Find the start of the next candidate.
///
/// Returns `MissingStartMarker` when no 0xA0 exists anywhere in `buf`, and
/// `IncompleteFrame` when one exists but fewer than 33 bytes follow it.
pub(crate) fn locate(buf: &[u8]) -> Result<usize> {
    let start = buf
        .iter()
        .position(|&b| b == START_MARKER)
        .ok_or(FrameError::MissingStartMarker)?;
    let available = buf.len() - start;
    if available < FRAME_SIZE {
        return Err(FrameError::IncompleteFrame {
            available,
            needed: FRAME_SIZE,
        });
    }
    Ok(start)
}

/// Run one extraction step, consuming whatever the step resolves.
///
/// A rejected candidate is consumed whole; bytes inside it are never
/// re-scanned for another start marker.
pub(crate) fn next_step(buf: &mut BytesMut, counters: &mut AssemblerCounters) -> Step {
    if buf.len() < FRAME_SIZE {
        return Step::NeedMore;
    }

    match locate(buf) {
        Ok(start) => {
            if start > 0 {
                debug!(discarded = start, "dropping bytes before start marker");
                counters.bytes_discarded += start as u64;
            }
            buf.advance(start);
            let candidate = buf.split_to(FRAME_SIZE).freeze();

            match check_end_marker(&candidate) {
                Ok(()) => {
                    counters.frames_validated += 1;
                    trace!(status = candidate[STATUS_OFFSET], "frame extracted");
                    Step::Frame(Frame::from_validated(candidate))
                }
                Err(err) => {
                    counters.frames_rejected += 1;
                    debug!(offset = start, error = %err, "rejecting candidate");
                    Step::Rejected
                }
            }
        }
        Err(FrameError::IncompleteFrame { available, needed }) => {
            trace!(available, needed, "waiting for rest of frame");
            Step::NeedMore
        }
        Err(err) => {
            let discarded = buf.len();
            debug!(discarded, error = %err, "flushing accumulator");
            buf.clear();
            counters.buffer_flushes += 1;
            counters.bytes_discarded += discarded as u64;
            Step::Flushed
        }
    }
}

/// Rebuilds validated frames from arbitrarily chunked input.
///
/// Feed every notification payload to [`ingest`](Self::ingest) in arrival
/// order. Partial frames are held until the rest arrives; garbage and
/// corrupt candidates are dropped and counted, never returned.
///
/// Work per call is linear in the chunk length plus the frames produced.
/// The assembler is not internally synchronized: serialize calls per instance.
#[derive(Debug)]
pub struct FrameAssembler {
    buf: BytesMut,
    counters: AssemblerCounters,
}

impl FrameAssembler {
    /// Create an assembler with default configuration.
    pub fn new() -> Self {
        Self::with_config(AssemblerConfig::default())
    }

    /// Create an assembler with explicit configuration.
    pub fn with_config(config: AssemblerConfig) -> Self {
        Self {
            buf: BytesMut::with_capacity(config.initial_capacity),
            counters: AssemblerCounters::default(),
        }
    }

    /// Append `chunk` and return every frame it completes, in stream order.
    pub fn ingest(&mut self, chunk: &[u8]) -> Vec<Frame> {
        let mut frames = Vec::new();
        self.ingest_into(chunk, &mut frames);
        frames
    }

    /// Like [`ingest`](Self::ingest) but appends to `out`.
    ///
    /// Returns the number of frames appended.
    pub fn ingest_into(&mut self, chunk: &[u8], out: &mut Vec<Frame>) -> usize {
        if chunk.is_empty() {
            return 0;
        }
        self.counters.bytes_ingested += chunk.len() as u64;
        self.buf.extend_from_slice(chunk);

        let before = out.len();
        loop {
            match next_step(&mut self.buf, &mut self.counters) {
                Step::Frame(frame) => out.push(frame),
                Step::Rejected => continue,
                Step::Flushed | Step::NeedMore => break,
            }
        }
        out.len() - before
    }

    /// Bytes currently held in the accumulator.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Snapshot of the running totals.
    pub fn counters(&self) -> AssemblerCounters {
        self.counters
    }

    /// Drop everything buffered. Counters are kept.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}
