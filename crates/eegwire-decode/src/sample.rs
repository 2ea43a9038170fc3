use eegwire_frame::{AUX_LEN, CHANNEL_COUNT};
use serde::Serialize;

use crate::scale::ScaleConfig;

/// One decoded frame: eight channel readings in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedSample {
    /// Decoder-assigned counter, starting at 0 and gap-free per decoder.
    pub sequence: u64,
    /// The frame's status byte, passed through uninterpreted.
    pub status: u8,
    /// Raw signed 24-bit readings, channel 1 first.
    pub channels: [i32; CHANNEL_COUNT],
    /// Auxiliary motion bytes, present only when the decoder keeps them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux: Option<[u8; AUX_LEN]>,
}

impl DecodedSample {
    /// Reading of channel `index` (0-based).
    pub fn channel(&self, index: usize) -> Option<i32> {
        self.channels.get(index).copied()
    }

    /// All channels converted to microvolts.
    pub fn microvolts(&self, scale: &ScaleConfig) -> [f64; CHANNEL_COUNT] {
        self.channels.map(|raw| scale.to_microvolts(raw))
    }
}
