/// Errors from building decode-side configuration.
///
/// Decoding itself never fails; see [`PacketDecoder::decode`](crate::PacketDecoder::decode).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// The amplifier gain is not one the front end supports.
    #[error("unsupported gain {0} (expected one of 1, 2, 4, 6, 8, 12, 24)")]
    InvalidGain(u8),

    /// The reference voltage is not a positive finite number.
    #[error("invalid reference voltage {0} V")]
    InvalidReference(f64),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
