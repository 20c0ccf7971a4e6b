#![forbid(unsafe_code)]

use crate::error::Error;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

pub trait LogSink: Send {
    /// Append one line (a newline is added) and return the number of bytes
    /// written.
    fn append(&mut self, line: &str) -> Result<usize, Error>;
}

/// Appends to a file, creating it if needed. Existing content is kept.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: File,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| Error::LogWrite {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileSink {
    fn append(&mut self, line: &str) -> Result<usize, Error> {
        writeln!(self.file, "{line}")
            .and_then(|()| self.file.flush())
            .map_err(|source| Error::LogWrite {
                path: self.path.clone(),
                source,
            })?;
        Ok(line.len() + 1)
    }
}

/// Keeps lines in memory. Clones share the same buffer, so a handle kept
/// outside the monitor can read what was written.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl LogSink for MemorySink {
    fn append(&mut self, line: &str) -> Result<usize, Error> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_owned());
        Ok(line.len() + 1)
    }
}
