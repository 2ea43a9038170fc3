use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use eegwire_decode::{DecodedSample, DecoderConfig, ScaleConfig};
use eegwire_pipeline::{PipelineConfig, StreamPipeline};
use tracing::info;

use crate::cmd::ReplayArgs;
use crate::exit::{decode_error, CliError, CliResult, SUCCESS};
use crate::input::{open_input, read_chunk};
use crate::output::{OutputFormat, SampleWriter};

pub fn run(args: ReplayArgs, format: OutputFormat) -> CliResult<i32> {
    let scale = if args.microvolts {
        Some(
            ScaleConfig::default()
                .with_gain(args.gain)
                .map_err(|err| decode_error("invalid scale", err))?,
        )
    } else {
        None
    };

    let mut source = open_input(&args.input)?;
    let mut pipeline = StreamPipeline::with_config(PipelineConfig {
        decoder: DecoderConfig { keep_aux: args.aux },
        ..PipelineConfig::default()
    });

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    let mut writer = SampleWriter::new(format, scale);
    let mut chunk = vec![0u8; args.chunk_size as usize];
    let mut samples: Vec<DecodedSample> = Vec::new();
    let mut printed = 0usize;

    'stream: while running.load(Ordering::SeqCst) {
        let n = read_chunk(source.as_mut(), &mut chunk)?;
        if n == 0 {
            break;
        }

        samples.clear();
        pipeline.push_into(&chunk[..n], &mut samples);
        for sample in &samples {
            writer.write(sample);
            printed = printed.saturating_add(1);

            if let Some(count) = args.count {
                if printed >= count {
                    break 'stream;
                }
            }
        }
    }

    writer.finish();

    let stats = pipeline.stats();
    info!(
        input = %args.input.display(),
        bytes = stats.bytes_ingested,
        frames = stats.frames_validated,
        rejected = stats.frames_rejected,
        flushes = stats.buffer_flushes,
        "replay finished"
    );

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}
