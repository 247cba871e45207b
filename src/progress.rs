// src/progress.rs
use tracing::info;

/// Progress reporting for the annotation pass.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of records.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called once per annotated record.
    fn item_done(&mut self, _id: &str, _flagged: bool) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Logs a status line every `every` records.
pub struct LogProgress {
    every: usize,
    total: usize,
    done: usize,
    flagged: usize,
}

impl LogProgress {
    pub fn new(every: usize) -> Self {
        Self { every: every.max(1), total: 0, done: 0, flagged: 0 }
    }

    pub fn done(&self) -> usize { self.done }
    pub fn flagged(&self) -> usize { self.flagged }
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.flagged = 0;
    }

    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }

    fn item_done(&mut self, _id: &str, flagged: bool) {
        self.done += 1;
        if flagged { self.flagged += 1; }
        if self.done % self.every == 0 {
            let pct = if self.total == 0 { 100.0 } else { 100.0 * self.done as f64 / self.total as f64 };
            info!(
                "Checked {} inscriptions (ca. {pct:.2}%). Found {} migrants so far.",
                self.done, self.flagged
            );
        }
    }

    fn finish(&mut self) {
        info!("Checked {} inscriptions; {} flagged.", self.done, self.flagged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_items() {
        let mut p = LogProgress::new(0);
        p.begin(3);
        p.item_done("a", true);
        p.item_done("b", false);
        p.item_done("c", true);
        p.finish();
        assert_eq!((p.done(), p.flagged()), (3, 2));
    }
}
