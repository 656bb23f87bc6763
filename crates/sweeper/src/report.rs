//! Run-scoped reporting.
//!
//! The engine writes every decision through a [`Reporter`] handed to it for
//! one run; nothing reaches process-wide logger state unless an
//! implementation chooses to forward there. [`RunLog`] is the shipped
//! implementation: it tees each line to the `log` facade for the console and
//! buffers the formatted line so the finished log can be stored in the
//! archive directory.

use crate::error::Result;
use crate::service::{join, DirectoryService};
use chrono::{DateTime, NaiveDate, Utc};

/// Receives the audit lines of one run.
pub trait Reporter {
    fn info(&mut self, message: &str);
}

/// Buffering reporter whose contents are uploaded at run end.
pub struct RunLog {
    date: NaiveDate,
    lines: Vec<String>,
}

impl RunLog {
    /// A log for the run starting at `now`; the file name carries the UTC
    /// calendar date.
    pub fn new(now: DateTime<Utc>) -> Self {
        RunLog {
            date: now.date_naive(),
            lines: Vec::new(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.log", self.date)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contents(&self) -> String {
        let mut contents = self.lines.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        contents
    }

    /// Stores the aggregated log as `<archive>/<date>.log`.
    pub fn store<S: DirectoryService + ?Sized>(&self, service: &mut S, archive: &str) -> Result<()> {
        let path = join(archive, &self.file_name());
        service.store_file(&path, self.contents().as_bytes())
    }
}

impl Reporter for RunLog {
    fn info(&mut self, message: &str) {
        log::info!("{}", message);
        self.lines.push(format!(
            "{} INFO  {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            message
        ));
    }
}
