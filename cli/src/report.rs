use grafana_folders::folder::{Folder, GENERAL};
use grafana_folders::reconcile::{BatchResult, Outcome, ReconcileObserver, Status};
use std::io::Write;
use std::sync::{Mutex, PoisonError};

/// Prints the progress of a run, one line per event.
pub struct ConsoleReporter<W> {
    out: Mutex<W>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    fn line(&self, message: std::fmt::Arguments<'_>) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{message}") {
            tracing::debug!("unable to write report: {err:?}");
        }
    }

    pub fn banner(&self) {
        self.line(format_args!(
            "WARNING: This will delete ALL folders in Grafana except '{GENERAL}'."
        ));
        self.line(format_args!(
            "Ensure you have a backup or can recreate them via Terraform."
        ));
    }

    pub fn summary(&self, result: &BatchResult) {
        let failed = result.failed().count();
        self.line(format_args!(
            "Deleted {} of {} folders, {} failed.",
            result.succeeded().count(),
            result.outcomes.len(),
            failed,
        ));
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> ReconcileObserver for ConsoleReporter<W> {
    fn on_discovered(&self, count: usize) {
        self.line(format_args!("Found {count} folders."));
    }

    fn on_skipped(&self, folder: &Folder) {
        self.line(format_args!(
            "Skipping folder: {} (uid: {})",
            folder.title, folder.uid
        ));
    }

    fn on_attempt(&self, folder: &Folder) {
        self.line(format_args!(
            "Deleting folder: {} (uid: {}) ...",
            folder.title, folder.uid
        ));
    }

    fn on_outcome(&self, outcome: &Outcome) {
        match outcome.status {
            Status::Succeeded => {
                self.line(format_args!("Successfully deleted {}", outcome.folder.title))
            }
            Status::Failed { ref detail, .. } => self.line(format_args!(
                "Failed to delete {} (uid: {}): {}",
                outcome.folder.title, outcome.folder.uid, detail
            )),
        }
    }
}
