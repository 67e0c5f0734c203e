// src/backend/logging.rs
// Routes `tracing` events from the ledger core into the canister log.

use std::io::{self, Write};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Buffers one formatted event and prints it to the canister log on flush or drop.
#[derive(Default)]
pub struct CanisterLog {
    buf: Vec<u8>,
}

impl Write for CanisterLog {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.buf.is_empty() {
            let line = String::from_utf8_lossy(&self.buf);
            ic_cdk::println!("{}", line.trim_end());
            self.buf.clear();
        }
        Ok(())
    }
}

impl Drop for CanisterLog {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Plain-text subscriber at INFO and above.
/// Timestamps are left out: wall-clock time is not available inside a canister.
pub fn subscriber<W>(make_writer: W) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(make_writer)
        .with_max_level(Level::INFO)
        .without_time()
        .finish()
}

/// Installs the canister log subscriber. Called from `init` and `post_upgrade`,
/// each of which starts a fresh wasm instance.
pub fn init_logging() {
    if tracing::subscriber::set_global_default(subscriber(CanisterLog::default)).is_err() {
        ic_cdk::println!("Logging subscriber already installed.");
    }
}
