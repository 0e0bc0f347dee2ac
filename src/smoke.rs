//! The two-phase smoke procedure
//!
//! Write phase: open the target for truncating write, write the payload in
//! full, close. Read phase: reopen the target, stream it back in fixed-size
//! chunks until end-of-stream, close. Every failure is fatal; there are no
//! retries. Handles are closed exactly once, with the close return code
//! checked.

use crate::error::SmokeError;
use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::{AsRawFd, IntoRawFd, RawFd};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Size of the reusable line buffer; each read returns at most
/// `LINE_BUF_LEN - 1` payload bytes, like an fgets-style reader.
pub const LINE_BUF_LEN: usize = 64;

/// Configuration for one smoke run
#[derive(Debug, Clone)]
pub struct SmokeConfig {
    /// Target file written and read back
    pub path: PathBuf,
    /// Payload written during the write phase
    pub payload: Vec<u8>,
    /// Skip the write phase (read an existing file)
    pub skip_write: bool,
    /// Skip the read phase (write only)
    pub skip_read: bool,
}

/// Result of a completed write phase
#[derive(Debug, Clone, Copy)]
pub struct WriteSummary {
    /// Raw fd of the write handle (diagnostic only)
    pub fd: RawFd,
    pub bytes_written: u64,
}

/// Result of a completed read phase
#[derive(Debug, Clone, Copy)]
pub struct ReadSummary {
    /// Raw fd of the read handle (diagnostic only)
    pub fd: RawFd,
    pub bytes_read: u64,
    /// Number of non-empty reads it took to drain the stream
    pub chunks: u64,
}

/// Summaries for the phases that actually ran
#[derive(Debug, Clone, Copy, Default)]
pub struct SmokeReport {
    pub write: Option<WriteSummary>,
    pub read: Option<ReadSummary>,
}

/// Close a handle with the return code checked.
///
/// `Drop for File` swallows close errors, so the fd is taken out of the
/// `File` and closed explicitly. Taking ownership of the fd also makes a
/// second close impossible.
fn close_handle(file: File, path: &Path) -> Result<(), SmokeError> {
    let fd = file.into_raw_fd();
    // SAFETY: fd was just taken out of an owned File, so it is open and
    // nothing else will close it.
    let rc = unsafe { libc::close(fd) };
    if rc != 0 {
        return Err(SmokeError::Close {
            path: path.to_path_buf(),
            source: io::Error::last_os_error(),
        });
    }
    debug!(fd, "closed");
    Ok(())
}

/// Create or truncate `path` and write `payload` to it in full.
pub fn write_phase(path: &Path, payload: &[u8]) -> Result<WriteSummary, SmokeError> {
    let mut file = File::create(path).map_err(|source| SmokeError::OpenForWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let fd = file.as_raw_fd();
    debug!(fd, path = %path.display(), "opened for truncating write");

    file.write_all(payload)
        .and_then(|()| file.flush())
        .map_err(|source| SmokeError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    close_handle(file, path)?;

    debug!(bytes = payload.len(), "write phase complete");
    Ok(WriteSummary {
        fd,
        bytes_written: payload.len() as u64,
    })
}

/// Open `path` and stream its contents to `echo` in chunks of at most
/// `LINE_BUF_LEN - 1` bytes until end-of-stream.
///
/// An open failure here is reported generically, without the OS error, to
/// match the original harness.
pub fn read_phase(path: &Path, echo: &mut dyn Write) -> Result<ReadSummary, SmokeError> {
    let mut file = File::open(path).map_err(|_| SmokeError::OpenForRead {
        path: path.to_path_buf(),
    })?;
    let fd = file.as_raw_fd();
    debug!(fd, path = %path.display(), "opened for read");

    let mut buf = [0u8; LINE_BUF_LEN];
    let mut bytes_read = 0u64;
    let mut chunks = 0u64;
    loop {
        let n = match file.read(&mut buf[..LINE_BUF_LEN - 1]) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(SmokeError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        echo.write_all(&buf[..n])
            .map_err(|source| SmokeError::Echo {
                path: path.to_path_buf(),
                source,
            })?;
        bytes_read += n as u64;
        chunks += 1;
    }
    close_handle(file, path)?;

    debug!(bytes = bytes_read, chunks, "read phase complete");
    Ok(ReadSummary {
        fd,
        bytes_read,
        chunks,
    })
}

/// Run the configured phases in order, echoing read-phase output to `echo`.
pub fn run(config: &SmokeConfig, echo: &mut dyn Write) -> Result<SmokeReport, SmokeError> {
    let mut report = SmokeReport::default();
    if !config.skip_write {
        report.write = Some(write_phase(&config.path, &config.payload)?);
    }
    if !config.skip_read {
        report.read = Some(read_phase(&config.path, echo)?);
    }
    Ok(report)
}
