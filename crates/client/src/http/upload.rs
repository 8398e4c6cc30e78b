//! Upload progress reporting for multipart submissions
//!
//! A [`ProgressSink`] wraps exactly one upload. Byte ticks are reported as
//! integer percentages, never decreasing; a successful submission always
//! terminates the sequence at exactly 100, a failed one never emits 100.

use std::sync::{Arc, Mutex};

use bytes::Bytes;

/// Bytes handed to the transport per stream chunk
const CHUNK_SIZE: usize = 64 * 1024;

type Callback = Arc<dyn Fn(u8) + Send + Sync>;

#[derive(Default)]
struct ProgressState {
    last_emitted: Option<u8>,
}

/// Percentage callback wrapper for one multipart upload
#[derive(Clone)]
pub struct ProgressSink {
    callback: Callback,
    state: Arc<Mutex<ProgressState>>,
}

impl ProgressSink {
    pub fn new(callback: impl Fn(u8) + Send + Sync + 'static) -> Self {
        Self { callback: Arc::new(callback), state: Arc::new(Mutex::new(ProgressState::default())) }
    }

    /// Report a byte tick.
    ///
    /// Computes `floor(loaded * 100 / total)`. With an unknown or zero
    /// total no callback fires at all; the caller must treat the upload as
    /// indeterminate. Percentages lower than one already emitted are
    /// suppressed so the observed sequence never decreases. Ticks are
    /// capped at 99: every byte can be on the wire before the server
    /// rejects the request, and 100 is reserved for confirmed success.
    pub fn report(&self, loaded: u64, total: Option<u64>) {
        let Some(total) = total.filter(|total| *total > 0) else {
            return;
        };
        let percentage = ((loaded.min(total) * 100 / total) as u8).min(99);

        let mut state = self.state.lock().expect("progress mutex poisoned");
        if state.last_emitted.is_some_and(|last| percentage < last) {
            return;
        }
        state.last_emitted = Some(percentage);
        (self.callback)(percentage);
    }

    /// Emit the terminal 100.
    ///
    /// Called only after the transport confirms success, so a failed upload
    /// can never reach 100. The last tick rarely lands exactly on 100; this
    /// closes the gap.
    pub fn finish(&self) {
        let mut state = self.state.lock().expect("progress mutex poisoned");
        if state.last_emitted == Some(100) {
            return;
        }
        state.last_emitted = Some(100);
        (self.callback)(100);
    }
}

/// Wrap file bytes in a body stream that ticks the sink per chunk.
///
/// The total is always known here (the file is in memory), so percentage
/// callbacks fire for every chunk boundary.
pub(crate) fn progress_body(bytes: Vec<u8>, sink: Option<ProgressSink>) -> reqwest::Body {
    let total = bytes.len() as u64;
    let chunks: Vec<Bytes> =
        bytes.chunks(CHUNK_SIZE).map(Bytes::copy_from_slice).collect();

    let mut loaded = 0u64;
    let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
        loaded += chunk.len() as u64;
        if let Some(sink) = &sink {
            sink.report(loaded, Some(total));
        }
        Ok::<Bytes, std::io::Error>(chunk)
    }));

    reqwest::Body::wrap_stream(stream)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;

    fn recording_sink() -> (ProgressSink, Arc<StdMutex<Vec<u8>>>) {
        let seen = Arc::new(StdMutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let sink = ProgressSink::new(move |pct| seen_clone.lock().unwrap().push(pct));
        (sink, seen)
    }

    #[test]
    fn test_percentage_is_floored() {
        let (sink, seen) = recording_sink();
        sink.report(1, Some(3)); // 33.33 -> 33
        sink.report(2, Some(3)); // 66.66 -> 66
        assert_eq!(*seen.lock().unwrap(), vec![33, 66]);
    }

    #[test]
    fn test_unknown_total_emits_nothing() {
        let (sink, seen) = recording_sink();
        sink.report(512, None);
        sink.report(1024, Some(0));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sequence_never_decreases() {
        let (sink, seen) = recording_sink();
        sink.report(50, Some(100));
        sink.report(30, Some(100)); // out-of-order tick, suppressed
        sink.report(80, Some(100));
        assert_eq!(*seen.lock().unwrap(), vec![50, 80]);
    }

    #[test]
    fn test_finish_lands_on_exactly_100() {
        let (sink, seen) = recording_sink();
        sink.report(99, Some(100));
        sink.finish();
        assert_eq!(*seen.lock().unwrap(), vec![99, 100]);
    }

    #[test]
    fn test_finish_only_emits_once() {
        let (sink, seen) = recording_sink();
        sink.finish();
        sink.finish();
        assert_eq!(*seen.lock().unwrap(), vec![100]);
    }

    #[test]
    fn test_ticks_are_capped_below_100() {
        let (sink, seen) = recording_sink();
        sink.report(100, Some(100));
        sink.report(150, Some(100));
        assert_eq!(*seen.lock().unwrap(), vec![99]);
    }
}
