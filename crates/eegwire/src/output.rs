use std::fs::File;
use std::io::{BufWriter, IsTerminal, Write};
use std::path::Path;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use eegwire_decode::{DecodedSample, ScaleConfig};
use eegwire_frame::CHANNEL_COUNT;
use eegwire_pipeline::StreamStats;
use serde::Serialize;

use crate::exit::{io_error, CliResult};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Csv,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum ChannelValues {
    Counts([i32; CHANNEL_COUNT]),
    Microvolts([f64; CHANNEL_COUNT]),
}

#[derive(Serialize)]
struct SampleOutput<'a> {
    sequence: u64,
    status: u8,
    unit: &'static str,
    channels: ChannelValues,
    #[serde(skip_serializing_if = "Option::is_none")]
    aux: Option<&'a [u8]>,
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    kind: &'static str,
    #[serde(flatten)]
    stats: &'a StreamStats,
}

/// Streams decoded samples to stdout in the chosen format.
///
/// Table output is collected and rendered once in [`finish`](Self::finish).
pub struct SampleWriter {
    format: OutputFormat,
    scale: Option<ScaleConfig>,
    table: Option<Table>,
    wrote_header: bool,
}

impl SampleWriter {
    pub fn new(format: OutputFormat, scale: Option<ScaleConfig>) -> Self {
        let table = matches!(format, OutputFormat::Table).then(|| {
            let mut table = Table::new();
            let mut header = vec!["SEQ".to_string(), "STATUS".to_string()];
            header.extend((1..=CHANNEL_COUNT).map(|ch| format!("CH{ch}")));
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(header);
            table
        });
        Self {
            format,
            scale,
            table,
            wrote_header: false,
        }
    }

    fn unit(&self) -> &'static str {
        if self.scale.is_some() {
            "uV"
        } else {
            "counts"
        }
    }

    fn channel_strings(&self, sample: &DecodedSample) -> Vec<String> {
        match &self.scale {
            Some(scale) => sample
                .microvolts(scale)
                .iter()
                .map(|uv| format!("{uv:.3}"))
                .collect(),
            None => sample.channels.iter().map(i32::to_string).collect(),
        }
    }

    pub fn write(&mut self, sample: &DecodedSample) {
        match self.format {
            OutputFormat::Json => {
                let channels = match &self.scale {
                    Some(scale) => ChannelValues::Microvolts(sample.microvolts(scale)),
                    None => ChannelValues::Counts(sample.channels),
                };
                let out = SampleOutput {
                    sequence: sample.sequence,
                    status: sample.status,
                    unit: self.unit(),
                    channels,
                    aux: sample.aux.as_ref().map(|aux| aux.as_slice()),
                };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Table => {
                let mut row = vec![sample.sequence.to_string(), format!("0x{:02X}", sample.status)];
                row.extend(self.channel_strings(sample));
                if let Some(table) = self.table.as_mut() {
                    table.add_row(row);
                }
            }
            OutputFormat::Pretty => {
                println!(
                    "seq={} status=0x{:02X} {}=[{}]{}",
                    sample.sequence,
                    sample.status,
                    self.unit(),
                    self.channel_strings(sample).join(", "),
                    sample
                        .aux
                        .map(|aux| format!(" aux={}", hex(&aux)))
                        .unwrap_or_default()
                );
            }
            OutputFormat::Csv => {
                if !self.wrote_header {
                    let channels: Vec<String> =
                        (1..=CHANNEL_COUNT).map(|ch| format!("ch{ch}")).collect();
                    println!("sequence,status,{}", channels.join(","));
                    self.wrote_header = true;
                }
                println!(
                    "{},{},{}",
                    sample.sequence,
                    sample.status,
                    self.channel_strings(sample).join(",")
                );
            }
        }
    }

    pub fn finish(self) {
        if let Some(table) = self.table {
            println!("{table}");
        }
        let _ = std::io::stdout().flush();
    }
}

pub fn print_stats(stats: &StreamStats, format: OutputFormat) {
    let rows = [
        ("bytes_ingested", stats.bytes_ingested.to_string()),
        ("frames_validated", stats.frames_validated.to_string()),
        ("frames_rejected", stats.frames_rejected.to_string()),
        ("buffer_flushes", stats.buffer_flushes.to_string()),
        ("bytes_discarded", stats.bytes_discarded.to_string()),
        ("samples_decoded", stats.samples_decoded.to_string()),
        ("buffered_bytes", stats.buffered_bytes.to_string()),
    ];

    match format {
        OutputFormat::Json => {
            let out = StatsOutput {
                kind: "stream-stats",
                stats,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["COUNTER", "VALUE"]);
            for (name, value) in rows {
                table.add_row(vec![name.to_string(), value]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (name, value) in rows {
                println!("{name}={value}");
            }
        }
        OutputFormat::Csv => {
            println!("counter,value");
            for (name, value) in rows {
                println!("{name},{value}");
            }
        }
    }
}

/// Buffered sink for raw capture bytes; `-` means stdout.
pub fn open_raw_output(path: &Path) -> CliResult<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    }
    let file = File::create(path)
        .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
