use std::{
    cell::RefCell,
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tracing::warn;

/// Line-oriented sink for catalog events.
///
/// Recording is fire-and-forget: implementations swallow their own failures
/// so the catalog never observes them.
pub trait EventLog {
    fn record(&self, line: &str);
}

impl<T: EventLog + ?Sized> EventLog for Box<T> {
    fn record(&self, line: &str) {
        (**self).record(line);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventLog;

impl EventLog for NoopEventLog {
    fn record(&self, _line: &str) {}
}

/// Appends timestamped lines to a file that stays open for the process lifetime.
#[derive(Debug)]
pub struct FileEventLog {
    path: PathBuf,
    file: File,
}

impl FileEventLog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!(
                    "failed to create parent directory '{}' for event log",
                    parent.display()
                )
            })?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open event log '{}'", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLog for FileEventLog {
    fn record(&self, line: &str) {
        let stamped = format!(
            "{} {line}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
        );
        if let Err(error) = (&self.file).write_all(stamped.as_bytes()) {
            warn!(path = %self.path.display(), %error, "failed to append event log line");
        }
    }
}

/// Keeps recorded lines in memory; clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryEventLog {
    lines: Rc<RefCell<Vec<String>>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl EventLog for MemoryEventLog {
    fn record(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}
