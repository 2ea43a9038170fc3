use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use crate::assembler::{AssemblerConfig, FrameAssembler};
use crate::error::{FrameError, Result};
use crate::frame::Frame;

/// Typical BLE notification payload size.
pub const DEFAULT_CHUNK_SIZE: usize = 20;

/// Reads validated frames from any `Read` byte source.
///
/// Bytes are pulled in chunks of `chunk_size` and pushed through a
/// [`FrameAssembler`], so a capture file replays the way the radio
/// delivered it. Callers always get complete, validated frames.
pub struct FrameReader<T> {
    inner: T,
    assembler: FrameAssembler,
    pending: VecDeque<Frame>,
    chunk: Vec<u8>,
}

impl<T: Read> FrameReader<T> {
    /// Create a reader with the default chunk size.
    pub fn new(inner: T) -> Self {
        Self::with_chunk_size(inner, DEFAULT_CHUNK_SIZE)
    }

    /// Create a reader that pulls at most `chunk_size` bytes per read.
    ///
    /// A `chunk_size` of zero is treated as one.
    pub fn with_chunk_size(inner: T, chunk_size: usize) -> Self {
        Self::with_config(inner, chunk_size, AssemblerConfig::default())
    }

    /// Create a reader with explicit assembler configuration.
    pub fn with_config(inner: T, chunk_size: usize, config: AssemblerConfig) -> Self {
        Self {
            inner,
            assembler: FrameAssembler::with_config(config),
            pending: VecDeque::new(),
            chunk: vec![0u8; chunk_size.max(1)],
        }
    }

    /// Read the next validated frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` once EOF is reached and
    /// no complete frame remains. A trailing partial frame is left buffered.
    pub fn read_frame(&mut self) -> Result<Frame> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                return Ok(frame);
            }

            let read = match self.inner.read(&mut self.chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            let frames = self.assembler.ingest(&self.chunk[..read]);
            self.pending.extend(frames);
        }
    }

    /// The assembler driving this reader, for its counters.
    pub fn assembler(&self) -> &FrameAssembler {
        &self.assembler
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Consume the reader and return the inner source.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read> Iterator for FrameReader<T> {
    type Item = Result<Frame>;

    /// Yields frames until EOF. I/O errors are yielded as items and do not
    /// end iteration.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_frame() {
            Ok(frame) => Some(Ok(frame)),
            Err(FrameError::ConnectionClosed) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
