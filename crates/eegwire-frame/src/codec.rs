//! `tokio_util` codec for async byte sources.

use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::debug;

use crate::assembler::{next_step, AssemblerCounters, Step};
use crate::error::{FrameError, Result};
use crate::frame::Frame;

/// Frame decoder for use with `tokio_util::codec::FramedRead`.
///
/// Applies exactly the extraction rules of
/// [`FrameAssembler`](crate::FrameAssembler), with `FramedRead` owning the
/// accumulator. `bytes_ingested` stays zero here since reads bypass the codec.
#[derive(Debug, Default)]
pub struct FrameCodec {
    counters: AssemblerCounters,
}

impl FrameCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the running totals.
    pub fn counters(&self) -> AssemblerCounters {
        self.counters
    }
}

impl Decoder for FrameCodec {
    type Item = Frame;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        loop {
            match next_step(src, &mut self.counters) {
                Step::Frame(frame) => return Ok(Some(frame)),
                Step::Rejected => continue,
                Step::Flushed | Step::NeedMore => return Ok(None),
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if !src.is_empty() {
            debug!(discarded = src.len(), "dropping incomplete tail at end of stream");
            self.counters.bytes_discarded += src.len() as u64;
            src.clear();
        }
        Ok(None)
    }
}
