//! Test support utilities: log capture and delivery draining.

use std::io;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing_subscriber::fmt::MakeWriter;

use crate::common::messages::Delivery;

/// In-memory log sink shared with a test subscriber.
#[derive(Clone, Default)]
pub struct CapturedWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedWriter {
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for CapturedWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedWriter {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber and return what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let writer = CapturedWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, writer.contents())
}

/// Pull every queued delivery as `(recipient, text)` pairs.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Delivery>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    while let Ok(delivery) = rx.try_recv() {
        out.push((delivery.recipient, delivery.text));
    }
    out
}

/// Drain and sort by recipient, for assertions that ignore roster order.
pub fn drain_sorted(rx: &mut mpsc::UnboundedReceiver<Delivery>) -> Vec<(String, String)> {
    let mut out = drain(rx);
    out.sort();
    out
}
