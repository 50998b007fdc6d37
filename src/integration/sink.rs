//! Destinations for per-pizza verdicts.

use std::io::{Stdout, Write};

use tracing::{info, warn};

use crate::inspection::Verdict;

/// Receives each verdict as it is produced.
pub trait VerdictSink {
    /// Report one pizza. Sinks swallow their own I/O failures.
    fn emit(&mut self, verdict: &Verdict);
}

/// Writes one line per pizza, e.g. `Bad: mush: 3, papri: 2, roni: 3`.
#[derive(Debug)]
pub struct ConsoleSink<W = Stdout> {
    out: W,
}

impl ConsoleSink {
    /// Sink printing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Sink writing to `out`, flushed after every line.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> VerdictSink for ConsoleSink<W> {
    fn emit(&mut self, verdict: &Verdict) {
        if let Err(err) = writeln!(self.out, "{verdict}").and_then(|_| self.out.flush()) {
            warn!(error = %err, "failed to write verdict");
        }
    }
}

/// Reports verdicts as `tracing` events.
#[derive(Debug, Default)]
pub struct LogSink;

impl VerdictSink for LogSink {
    fn emit(&mut self, verdict: &Verdict) {
        info!(
            classification = %verdict.classification,
            counts = ?verdict.counts.as_slice(),
            "{verdict}"
        );
    }
}

/// Keeps every verdict in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub verdicts: Vec<Verdict>,
}

impl VerdictSink for CollectingSink {
    fn emit(&mut self, verdict: &Verdict) {
        self.verdicts.push(verdict.clone());
    }
}

impl<S: VerdictSink + ?Sized> VerdictSink for &mut S {
    fn emit(&mut self, verdict: &Verdict) {
        (**self).emit(verdict);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::inspection::{CategorySet, CountVector};

    fn verdict(counts: [u32; 3]) -> Verdict {
        let categories = Arc::new(CategorySet::new(["mush", "papri", "roni"]).unwrap());
        Verdict::judge(CountVector::from(counts), &CountVector::from([3, 3, 3]), categories)
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_sink_writes_one_line_per_verdict() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.emit(&verdict([3, 3, 3]));
        sink.emit(&verdict([3, 2, 3]));

        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "Ok: mush: 3, papri: 3, roni: 3\nBad: mush: 3, papri: 2, roni: 3\n"
        );
    }

    #[test]
    fn test_log_sink_emits_event() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            LogSink.emit(&verdict([3, 3, 1]));
        });

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("Bad: mush: 3, papri: 3, roni: 1"), "{text}");
        assert!(text.contains("classification=Bad"), "{text}");
        assert!(text.contains("counts=[3, 3, 1]"), "{text}");
    }
}
