use crate::error::{DecodeError, Result};

/// Reference voltage of the ADC front end.
pub const DEFAULT_VREF_VOLTS: f64 = 4.5;

/// Programmable gain used for EEG.
pub const DEFAULT_GAIN: u8 = 24;

/// Gains the front end can be programmed to.
pub const SUPPORTED_GAINS: [u8; 7] = [1, 2, 4, 6, 8, 12, 24];

/// 2^23: counts spanning one side of the signed 24-bit range.
const FULL_SCALE_COUNTS: f64 = 8_388_608.0;

/// Conversion from raw channel counts to microvolts.
///
/// One count is `vref / 2^23 / gain` volts, about 0.0224 µV at the
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    vref_volts: f64,
    gain: u8,
}

impl ScaleConfig {
    pub fn new(vref_volts: f64, gain: u8) -> Result<Self> {
        if !vref_volts.is_finite() || vref_volts <= 0.0 {
            return Err(DecodeError::InvalidReference(vref_volts));
        }
        if !SUPPORTED_GAINS.contains(&gain) {
            return Err(DecodeError::InvalidGain(gain));
        }
        Ok(Self { vref_volts, gain })
    }

    /// Same reference voltage, different gain.
    pub fn with_gain(self, gain: u8) -> Result<Self> {
        Self::new(self.vref_volts, gain)
    }

    pub fn vref_volts(&self) -> f64 {
        self.vref_volts
    }

    pub fn gain(&self) -> u8 {
        self.gain
    }

    /// Microvolts per raw count.
    pub fn lsb_microvolts(&self) -> f64 {
        self.vref_volts / FULL_SCALE_COUNTS / f64::from(self.gain) * 1_000_000.0
    }

    pub fn to_microvolts(&self, raw: i32) -> f64 {
        f64::from(raw) * self.lsb_microvolts()
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            vref_volts: DEFAULT_VREF_VOLTS,
            gain: DEFAULT_GAIN,
        }
    }
}
