use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create session file '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write session file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Append-only file receiving every committed character.
///
/// Each append is flushed to the OS right away so a crash never loses more
/// than the keystroke in flight.
pub struct OutputSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    bytes_written: u64,
}

impl OutputSink {
    /// Create a fresh file at `path`. An existing file is never reused.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        let file = OpenOptions::new()
            .append(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| SinkError::Create {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), "session file created");
        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
            bytes_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    pub fn append(&mut self, ch: char) -> Result<(), SinkError> {
        let mut buf = [0u8; 4];
        let bytes = ch.encode_utf8(&mut buf).as_bytes();
        let result = match self.writer.as_mut() {
            Some(writer) => writer.write_all(bytes).and_then(|()| writer.flush()),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "session file already closed",
            )),
        };
        result.map_err(|source| self.write_error(source))?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    /// Flush and sync to disk. Calling it again is a no-op.
    pub fn close(&mut self) -> Result<(), SinkError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer
            .flush()
            .and_then(|()| writer.get_ref().sync_all())
            .map_err(|source| self.write_error(source))?;
        tracing::info!(
            path = %self.path.display(),
            bytes = self.bytes_written,
            "session file closed"
        );
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> SinkError {
        SinkError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Drop for OutputSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
