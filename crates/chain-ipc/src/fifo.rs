//! # FIFO Endpoints
//!
//! Creation and opening of the named pipes backing a channel.
//!
//! Both directions are opened in read-write mode. For FIFOs this sidesteps
//! two open-ordering hazards at once: opening the write end never fails for
//! want of a reader, and the read end never reports EOF just because the
//! peer has not opened (or has closed) its write end. Liveness is decided by
//! the protocol (EXIT + shutdown grace), not by pipe hangups.

use std::path::Path;

use tokio::net::unix::pipe;
use tracing::debug;

use crate::error::{IpcError, IpcResult};
use crate::framing::{LineReceiver, LineSender};

/// Creates the FIFO at `path` if needed.
///
/// An existing FIFO is reused (the previous run may have left it behind); an
/// existing non-FIFO is a fatal setup error.
pub fn ensure_fifo(path: &Path) -> IpcResult<()> {
    use std::os::unix::fs::FileTypeExt;

    match std::fs::metadata(path) {
        Ok(meta) => {
            if !meta.file_type().is_fifo() {
                return Err(IpcError::NotAFifo(path.to_path_buf()));
            }
            debug!(path = %path.display(), "Reusing existing FIFO");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            use nix::sys::stat::Mode;
            use nix::unistd::mkfifo;

            mkfifo(
                path,
                Mode::S_IRUSR | Mode::S_IWUSR | Mode::S_IRGRP | Mode::S_IWGRP,
            )
            .map_err(std::io::Error::other)?;
            debug!(path = %path.display(), "Created FIFO");
            Ok(())
        }
        Err(e) => Err(IpcError::Io(e)),
    }
}

/// Opens the write end of a FIFO as a line-framed sender.
///
/// Must be called from within a tokio runtime.
pub fn open_sender(path: &Path) -> IpcResult<LineSender> {
    let tx = pipe::OpenOptions::new()
        .read_write(true)
        .open_sender(path)?;
    debug!(path = %path.display(), "Opened FIFO sender");
    Ok(LineSender::new(tx))
}

/// Opens the read end of a FIFO as a line-framed receiver.
///
/// Must be called from within a tokio runtime.
pub fn open_receiver(path: &Path) -> IpcResult<LineReceiver> {
    let rx = pipe::OpenOptions::new()
        .read_write(true)
        .open_receiver(path)?;
    debug!(path = %path.display(), "Opened FIFO receiver");
    Ok(LineReceiver::new(rx))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_fifo_creates_and_reuses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cmd_Test.fifo");

        ensure_fifo(&path).unwrap();
        // Second call must accept the FIFO left behind.
        ensure_fifo(&path).unwrap();
    }

    #[test]
    fn ensure_fifo_rejects_regular_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imposter");
        std::fs::write(&path, "not a pipe").unwrap();

        match ensure_fifo(&path) {
            Err(IpcError::NotAFifo(p)) => assert_eq!(p, path),
            other => panic!("expected NotAFifo, got {other:?}"),
        }
    }
}
