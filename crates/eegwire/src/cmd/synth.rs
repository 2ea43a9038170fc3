use std::io::Write;

use bytes::BytesMut;
use eegwire_frame::{encode_frame, AUX_LEN, CHANNEL_COUNT, FRAME_SIZE};
use tracing::info;

use crate::cmd::SynthArgs;
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};
use crate::output::open_raw_output;

/// Junk inserted between frames. Contains no start marker.
const JUNK: [u8; 5] = [0x00, 0x13, 0x37, 0xFF, 0xC0];

pub fn run(args: SynthArgs) -> CliResult<i32> {
    let mut out = open_raw_output(&args.output)?;
    let written = write_capture(&args, &mut out)?;
    out.flush().map_err(|err| io_error("write failed", err))?;

    info!(
        output = %args.output.display(),
        frames = args.frames,
        bytes = written,
        "synthetic capture written"
    );
    Ok(SUCCESS)
}

fn hits(every: Option<u64>, index: u64) -> bool {
    every.is_some_and(|k| (index + 1) % k == 0)
}

/// Encode and write frames one at a time. Returns the bytes written.
fn write_capture(args: &SynthArgs, out: &mut dyn Write) -> CliResult<u64> {
    let mut buf = BytesMut::with_capacity(FRAME_SIZE + JUNK.len());
    let mut written = 0u64;

    for i in 0..args.frames {
        buf.clear();
        if hits(args.garbage_every, i) {
            buf.extend_from_slice(&JUNK);
        }

        let channels = ramp(i);
        let aux = [0u8; AUX_LEN];
        encode_frame((i % 256) as u8, &channels, &aux, &mut buf)
            .map_err(|err| frame_error("encode failed", err))?;

        if hits(args.corrupt_every, i) {
            let last = buf.len() - 1;
            buf[last] = 0x00;
        }

        out.write_all(&buf)
            .map_err(|err| io_error("write failed", err))?;
        written += buf.len() as u64;
    }

    Ok(written)
}

fn ramp(index: u64) -> [i32; CHANNEL_COUNT] {
    std::array::from_fn(|k| {
        let value = (index.wrapping_mul(k as u64 + 1).wrapping_mul(1000) % 0x80_0000) as i32;
        if k % 2 == 1 {
            -value
        } else {
            value
        }
    })
}
