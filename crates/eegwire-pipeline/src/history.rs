use std::collections::VecDeque;

use eegwire_decode::DecodedSample;
use eegwire_frame::CHANNEL_COUNT;

use crate::sink::SampleSink;

/// Samples kept per channel by default.
pub const DEFAULT_HISTORY_DEPTH: usize = 800;

/// Bounded per-channel history for scrolling waveform displays.
///
/// Holds the newest `depth` samples; older ones fall off the front.
#[derive(Debug, Clone)]
pub struct SampleHistory {
    depth: usize,
    rows: VecDeque<[i32; CHANNEL_COUNT]>,
    latest_sequence: Option<u64>,
}

impl SampleHistory {
    /// A `depth` of zero is treated as one.
    pub fn new(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            depth,
            rows: VecDeque::with_capacity(depth),
            latest_sequence: None,
        }
    }

    pub fn push(&mut self, sample: &DecodedSample) {
        if self.rows.len() == self.depth {
            self.rows.pop_front();
        }
        self.rows.push_back(sample.channels);
        self.latest_sequence = Some(sample.sequence);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sequence number of the newest sample.
    pub fn latest_sequence(&self) -> Option<u64> {
        self.latest_sequence
    }

    /// Values of channel `index`, oldest first.
    pub fn channel(&self, index: usize) -> Option<Vec<i32>> {
        if index >= CHANNEL_COUNT {
            return None;
        }
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Minimum and maximum of the newest `last_n` values on channel `index`.
    pub fn window_range(&self, index: usize, last_n: usize) -> Option<(i32, i32)> {
        if index >= CHANNEL_COUNT || last_n == 0 {
            return None;
        }
        let skip = self.rows.len().saturating_sub(last_n);
        self.rows
            .iter()
            .skip(skip)
            .map(|row| row[index])
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            })
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.latest_sequence = None;
    }
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_DEPTH)
    }
}

impl SampleSink for SampleHistory {
    fn accept(&mut self, sample: DecodedSample) {
        self.push(&sample);
    }
}
