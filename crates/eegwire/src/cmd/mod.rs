use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod replay;
pub mod stats;
pub mod synth;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a raw capture through the pipeline and print decoded samples.
    Replay(ReplayArgs),
    /// Replay a raw capture and print only the stream statistics.
    Stats(StatsArgs),
    /// Write a synthetic raw capture.
    Synth(SynthArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Replay(args) => replay::run(args, format),
        Command::Stats(args) => stats::run(args, format),
        Command::Synth(args) => synth::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Capture file to read, or `-` for stdin.
    pub input: PathBuf,
    /// Bytes per pushed chunk (a BLE notification is typically 20).
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=65536))]
    pub chunk_size: u32,
    /// Exit after printing N samples.
    #[arg(long)]
    pub count: Option<usize>,
    /// Print channel values in microvolts instead of raw counts.
    #[arg(long)]
    pub microvolts: bool,
    /// Amplifier gain used for microvolt conversion.
    #[arg(long, default_value_t = eegwire_decode::DEFAULT_GAIN, requires = "microvolts")]
    pub gain: u8,
    /// Include the six auxiliary bytes of each frame.
    #[arg(long)]
    pub aux: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Capture file to read, or `-` for stdin.
    pub input: PathBuf,
    /// Bytes per pushed chunk.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(1..=65536))]
    pub chunk_size: u32,
}

#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Output file, or `-` for stdout.
    pub output: PathBuf,
    /// Number of frames to generate.
    #[arg(long, default_value_t = 250)]
    pub frames: u64,
    /// Insert junk bytes before every K-th frame.
    #[arg(long, value_name = "K", value_parser = clap::value_parser!(u64).range(1..))]
    pub garbage_every: Option<u64>,
    /// Break the end marker of every K-th frame.
    #[arg(long, value_name = "K", value_parser = clap::value_parser!(u64).range(1..))]
    pub corrupt_every: Option<u64>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
