use eegwire_decode::{DecodedSample, DecoderConfig, PacketDecoder};
use eegwire_frame::{AssemblerConfig, Frame, FrameAssembler};
use tracing::trace;

use crate::sink::SampleSink;
use crate::stats::StreamStats;

/// Configuration for [`StreamPipeline`].
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    pub assembler: AssemblerConfig,
    pub decoder: DecoderConfig,
}

/// Assembler and decoder for one device stream.
///
/// Drive it from a single producer; calls must be serialized per instance.
/// Separate instances share nothing and can run on separate threads.
#[derive(Debug)]
pub struct StreamPipeline {
    assembler: FrameAssembler,
    decoder: PacketDecoder,
    frames: Vec<Frame>,
    stats: StreamStats,
}

impl StreamPipeline {
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            assembler: FrameAssembler::with_config(config.assembler),
            decoder: PacketDecoder::with_config(config.decoder),
            frames: Vec::new(),
            stats: StreamStats::default(),
        }
    }

    /// Ingest one raw chunk and return the samples it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<DecodedSample> {
        let mut samples = Vec::new();
        self.push_into(chunk, &mut samples);
        samples
    }

    /// Ingest one raw chunk, delivering each completed sample to `sink`.
    ///
    /// Returns the number of samples delivered.
    pub fn push_into<S: SampleSink + ?Sized>(&mut self, chunk: &[u8], sink: &mut S) -> usize {
        self.frames.clear();
        let produced = self.assembler.ingest_into(chunk, &mut self.frames);

        for frame in self.frames.drain(..) {
            sink.accept(self.decoder.decode(&frame));
        }

        self.refresh_stats();
        trace!(chunk_len = chunk.len(), produced, "chunk pushed");
        produced
    }

    /// Snapshot of the stream counters.
    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    fn refresh_stats(&mut self) {
        let counters = self.assembler.counters();
        self.stats = StreamStats {
            bytes_ingested: counters.bytes_ingested,
            frames_validated: counters.frames_validated,
            frames_rejected: counters.frames_rejected,
            buffer_flushes: counters.buffer_flushes,
            bytes_discarded: counters.bytes_discarded,
            samples_decoded: self.decoder.decoded(),
            buffered_bytes: self.assembler.buffered(),
        };
    }
}

impl Default for StreamPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use bytes::BytesMut;
    use eegwire_frame::{encode_frame, AUX_LEN, CHANNEL_COUNT, FRAME_SIZE, START_MARKER};
    use proptest::prelude::*;

    use super::*;
    use crate::history::SampleHistory;

    fn frame_bytes(status: u8, channels: [i32; CHANNEL_COUNT]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        encode_frame(status, &channels, &[0; AUX_LEN], &mut buf).unwrap();
        buf.to_vec()
    }

    fn reference_frame() -> Vec<u8> {
        let mut raw = vec![0xA0, 0x01];
        for _ in 0..CHANNEL_COUNT {
            raw.extend_from_slice(&[0, 0, 1]);
        }
        raw.extend_from_slice(&[0; AUX_LEN]);
        raw.push(0xC0);
        raw
    }

    #[test]
    fn junk_then_reference_frame() {
        let mut wire = vec![0x00, 0x00];
        wire.extend(reference_frame());

        let mut pipeline = StreamPipeline::new();
        let samples = pipeline.push(&wire);

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].channels, [1; CHANNEL_COUNT]);
        assert_eq!(samples[0].sequence, 0);

        let stats = pipeline.stats();
        assert_eq!(stats.frames_validated, 1);
        assert_eq!(stats.frames_rejected, 0);
        assert_eq!(stats.samples_decoded, 1);
        assert_eq!(stats.bytes_ingested, 35);
        assert_eq!(stats.buffered_bytes, 0);
    }

    #[test]
    fn twenty_then_thirteen_bytes() {
        let wire = reference_frame();
        let mut pipeline = StreamPipeline::new();

        assert!(pipeline.push(&wire[..20]).is_empty());
        assert_eq!(pipeline.stats().buffered_bytes, 20);

        let samples = pipeline.push(&wire[20..]);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].channels, [1; CHANNEL_COUNT]);
    }

    #[test]
    fn back_to_back_frames_are_numbered_in_order() {
        const N: u64 = 25;
        let wire: Vec<u8> = (0..N)
            .flat_map(|i| frame_bytes(i as u8, [i as i32; CHANNEL_COUNT]))
            .collect();

        let mut pipeline = StreamPipeline::new();
        let samples = pipeline.push(&wire);

        assert_eq!(samples.len() as u64, N);
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.sequence, i as u64);
            assert_eq!(sample.channels, [i as i32; CHANNEL_COUNT]);
        }
    }

    #[test]
    fn leading_garbage_is_discarded_on_first_push() {
        let garbage: Vec<u8> = (0..50u8).map(|b| b.wrapping_mul(7)).collect();
        assert!(!garbage.contains(&START_MARKER));
        let mut wire = garbage.clone();
        wire.extend(reference_frame());

        let mut pipeline = StreamPipeline::new();
        let samples = pipeline.push(&wire);

        assert_eq!(samples.len(), 1);
        let stats = pipeline.stats();
        assert_eq!(stats.bytes_discarded, garbage.len() as u64);
        assert_eq!(stats.buffered_bytes, 0);
    }

    #[test]
    fn garbage_only_push_yields_nothing() {
        let mut pipeline = StreamPipeline::new();
        assert!(pipeline.push(&[0x42; 64]).is_empty());

        let stats = pipeline.stats();
        assert_eq!(stats.buffer_flushes, 1);
        assert_eq!(stats.bytes_discarded, 64);
        assert_eq!(stats.frames_rejected, 0);
        assert_eq!(stats.buffered_bytes, 0);
    }

    #[test]
    fn rejected_candidate_does_not_block_next_frame() {
        let mut corrupt = frame_bytes(1, [5; CHANNEL_COUNT]);
        corrupt[FRAME_SIZE - 1] = 0x00;

        let mut pipeline = StreamPipeline::new();
        assert!(pipeline.push(&corrupt).is_empty());

        let samples = pipeline.push(&frame_bytes(2, [6; CHANNEL_COUNT]));
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].sequence, 0);
        assert_eq!(samples[0].status, 2);

        let stats = pipeline.stats();
        assert_eq!(stats.frames_rejected, 1);
        assert_eq!(stats.frames_validated, 1);
    }

    #[test]
    fn push_into_history_and_channel() {
        let wire: Vec<u8> = (0..4)
            .flat_map(|i| frame_bytes(0, [i; CHANNEL_COUNT]))
            .collect();

        let mut pipeline = StreamPipeline::new();
        let mut history = SampleHistory::new(3);
        assert_eq!(pipeline.push_into(&wire, &mut history), 4);
        assert_eq!(history.channel(2), Some(vec![1, 2, 3]));
        assert_eq!(history.latest_sequence(), Some(3));

        let (mut tx, rx) = mpsc::channel::<DecodedSample>();
        pipeline.push_into(&frame_bytes(9, [9; CHANNEL_COUNT]), &mut tx);
        let sample = rx.try_recv().unwrap();
        assert_eq!((sample.sequence, sample.status), (4, 9));
    }

    #[test]
    fn keep_aux_reaches_samples() {
        let mut buf = BytesMut::new();
        encode_frame(0, &[0; CHANNEL_COUNT], &[1, 2, 3, 4, 5, 6], &mut buf).unwrap();

        let mut pipeline = StreamPipeline::with_config(PipelineConfig {
            decoder: DecoderConfig { keep_aux: true },
            ..PipelineConfig::default()
        });
        let samples = pipeline.push(&buf);
        assert_eq!(samples[0].aux, Some([1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn independent_pipelines_on_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<StreamPipeline>();

        let wire: Vec<u8> = (0..100)
            .flat_map(|i| frame_bytes(i as u8, [i; CHANNEL_COUNT]))
            .collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (1..=4usize)
                .map(|chunk| {
                    let wire = &wire;
                    scope.spawn(move || {
                        let mut pipeline = StreamPipeline::new();
                        let mut samples = Vec::new();
                        for piece in wire.chunks(chunk * 7) {
                            pipeline.push_into(piece, &mut samples);
                        }
                        samples
                    })
                })
                .collect();

            for handle in handles {
                let samples = handle.join().unwrap();
                assert_eq!(samples.len(), 100);
                assert_eq!(samples[99].sequence, 99);
            }
        });
    }

    fn arb_stream() -> impl Strategy<Value = Vec<u8>> {
        let segment = prop_oneof![
            3 => (any::<u8>(), proptest::array::uniform8(-0x80_0000i32..=0x7F_FFFF))
                .prop_map(|(status, channels)| frame_bytes(status, channels)),
            1 => proptest::collection::vec(any::<u8>(), 1..40),
            1 => (any::<u8>(), any::<u8>()).prop_map(|(status, end)| {
                let mut corrupt = frame_bytes(status, [0; CHANNEL_COUNT]);
                corrupt[FRAME_SIZE - 1] = if end == 0xC0 { 0x00 } else { end };
                corrupt
            }),
        ];
        proptest::collection::vec(segment, 0..16).prop_map(|segments| segments.concat())
    }

    proptest! {
        #[test]
        fn samples_independent_of_chunk_boundaries(
            stream in arb_stream(),
            cuts in proptest::collection::vec(1usize..64, 1..24),
        ) {
            let expected = StreamPipeline::new().push(&stream);

            let mut pipeline = StreamPipeline::new();
            let mut got = Vec::new();
            let mut rest = stream.as_slice();
            for &cut in cuts.iter().cycle() {
                if rest.is_empty() {
                    break;
                }
                let n = cut.min(rest.len());
                pipeline.push_into(&rest[..n], &mut got);
                rest = &rest[n..];
            }

            prop_assert_eq!(got, expected);
            prop_assert_eq!(pipeline.stats().bytes_ingested, stream.len() as u64);
        }

        #[test]
        fn well_formed_stream_decodes_every_frame(count in 0usize..40) {
            let wire: Vec<u8> = (0..count)
                .flat_map(|i| frame_bytes(i as u8, [i as i32; CHANNEL_COUNT]))
                .collect();

            let mut pipeline = StreamPipeline::new();
            let samples = pipeline.push(&wire);

            let sequences: Vec<u64> = samples.iter().map(|s| s.sequence).collect();
            prop_assert_eq!(sequences, (0..count as u64).collect::<Vec<_>>());
            prop_assert_eq!(pipeline.stats().frames_rejected, 0);
        }
    }
}
