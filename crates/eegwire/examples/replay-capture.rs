//! Replay a synthetic capture through the blocking frame reader.
//!
//! Run with: `cargo run -p eegwire --example replay-capture`

use std::io::Cursor;

use bytes::BytesMut;
use eegwire::decode::{PacketDecoder, ScaleConfig};
use eegwire::frame::{encode_frame, FrameError, FrameReader, AUX_LEN, CHANNEL_COUNT};

fn capture(frames: u32) -> Result<BytesMut, FrameError> {
    let mut buf = BytesMut::new();
    for i in 0..frames as i32 {
        // A stray byte between frames, as seen on a noisy link.
        if i % 4 == 3 {
            buf.extend_from_slice(&[0x42]);
        }
        let channels: [i32; CHANNEL_COUNT] = std::array::from_fn(|k| (k as i32 + 1) * i * 100);
        encode_frame(i as u8, &channels, &[0u8; AUX_LEN], &mut buf)?;
    }
    Ok(buf)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let raw = capture(10)?;
    let scale = ScaleConfig::default();
    let mut decoder = PacketDecoder::new();

    // Twenty bytes per read mirrors a single BLE notification.
    let reader = FrameReader::with_chunk_size(Cursor::new(raw.freeze()), 20);
    for frame in reader {
        let sample = decoder.decode(&frame?);
        let uv = sample.microvolts(&scale);
        println!(
            "#{:<3} status=0x{:02X} ch1={:>9.3} uV ch8={:>9.3} uV",
            sample.sequence, sample.status, uv[0], uv[7]
        );
    }

    println!("decoded {} samples", decoder.decoded());
    Ok(())
}
