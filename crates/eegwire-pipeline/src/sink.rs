use std::sync::mpsc::Sender;

use eegwire_decode::DecodedSample;
use tracing::trace;

/// Receives decoded samples in stream order.
pub trait SampleSink {
    fn accept(&mut self, sample: DecodedSample);
}

impl SampleSink for Vec<DecodedSample> {
    fn accept(&mut self, sample: DecodedSample) {
        self.push(sample);
    }
}

/// Samples pushed after the receiver hangs up are dropped.
impl SampleSink for Sender<DecodedSample> {
    fn accept(&mut self, sample: DecodedSample) {
        if let Err(err) = self.send(sample) {
            trace!(sequence = err.0.sequence, "sample receiver gone, dropping");
        }
    }
}

impl<S: SampleSink + ?Sized> SampleSink for &mut S {
    fn accept(&mut self, sample: DecodedSample) {
        (**self).accept(sample);
    }
}
