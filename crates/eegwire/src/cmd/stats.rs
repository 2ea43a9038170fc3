use eegwire_pipeline::{SampleHistory, StreamPipeline};
use tracing::debug;

use crate::cmd::StatsArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::input::{open_input, read_chunk};
use crate::output::{print_stats, OutputFormat};

pub fn run(args: StatsArgs, format: OutputFormat) -> CliResult<i32> {
    let mut source = open_input(&args.input)?;
    let mut pipeline = StreamPipeline::new();
    let mut history = SampleHistory::default();
    let mut chunk = vec![0u8; args.chunk_size as usize];

    loop {
        let n = read_chunk(source.as_mut(), &mut chunk)?;
        if n == 0 {
            break;
        }
        pipeline.push_into(&chunk[..n], &mut history);
    }

    debug!(
        retained = history.len(),
        latest = ?history.latest_sequence(),
        ch1_range = ?history.window_range(0, history.depth()),
        "history after replay"
    );

    print_stats(&pipeline.stats(), format);
    Ok(SUCCESS)
}
