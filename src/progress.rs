// src/progress.rs
/// Lightweight progress reporting used by long-running operations (list fetch, crawl).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items (if known).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One patent (or one results page) completed.
    fn item_done(&mut self, _id: &str) {}

    /// One item failed; the run carries on.
    fn item_failed(&mut self, _id: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Forwards everything to `tracing` at info/warn level.
#[derive(Debug, Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }

    fn log(&mut self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn item_done(&mut self, id: &str) {
        self.done += 1;
        if self.total > 0 {
            tracing::info!(done = self.done, total = self.total, "{id}");
        } else {
            tracing::info!(done = self.done, "{id}");
        }
    }

    fn item_failed(&mut self, id: &str, reason: &str) {
        self.done += 1;
        tracing::warn!(done = self.done, "{id} failed: {reason}");
    }
}
