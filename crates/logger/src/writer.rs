//! Background writer thread: file appends and size-based rotation

use crate::config::LoggerConfig;
use crate::error::{Error, Result};
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, TrySendError};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// How long the writer waits for work before re-checking the stop flag
const IDLE_POLL: Duration = Duration::from_secs(1);

/// Non-blocking enqueue with evict-oldest backpressure
///
/// On a full queue the single oldest pending line is popped and the new
/// line offered again. Producers never block and never see an error; under
/// sustained overflow the oldest pending lines are simply absent from the
/// file. A second failure (another producer refilled the slot, or the
/// writer is gone during shutdown) drops the new line instead.
pub(crate) fn enqueue(sender: &Sender<String>, receiver: &Receiver<String>, line: String) {
    if let Err(TrySendError::Full(line)) = sender.try_send(line) {
        let _ = receiver.try_recv();
        let _ = sender.try_send(line);
    }
}

/// Owns the open log file, its byte counter, and rotation
///
/// Exactly one writer runs per pipeline, on a dedicated thread, so file
/// access needs no lock: exclusivity is structural. I/O failures are
/// reported on the fallback channel and the loop keeps draining; the
/// pipeline degrades to console-only output rather than taking the host
/// down.
pub(crate) struct AsyncLogWriter {
    receiver: Receiver<String>,
    stop: Arc<AtomicBool>,
    config: LoggerConfig,
    file: Option<BufWriter<File>>,
    active_path: PathBuf,
    current_bytes: u64,
}

impl AsyncLogWriter {
    pub(crate) fn new(
        receiver: Receiver<String>,
        stop: Arc<AtomicBool>,
        config: LoggerConfig,
    ) -> Self {
        let active_path = config.log_dir.join(format!("{}.log", config.base_name));
        let mut writer = Self {
            receiver,
            stop,
            config,
            file: None,
            active_path,
            current_bytes: 0,
        };

        if let Err(err) = writer.create_log_dir().and_then(|()| writer.open_log_file()) {
            tracing::error!("failed to open log file, continuing console-only: {err}");
        }
        writer
    }

    fn create_log_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.config.log_dir).map_err(|source| Error::CreateDirectory {
            path: self.config.log_dir.clone(),
            source,
        })
    }

    fn open_log_file(&mut self) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.active_path)?;
        self.current_bytes = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.file = Some(BufWriter::new(file));
        Ok(())
    }

    /// Drain lines until the stop flag is raised, then flush what remains
    pub(crate) fn run(mut self) {
        loop {
            match self.receiver.recv_timeout(IDLE_POLL) {
                Ok(line) => self.handle_line(&line),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            if self.stop.load(Ordering::Acquire) {
                break;
            }
        }

        // Best-effort delivery of everything accepted before shutdown
        while let Ok(line) = self.receiver.try_recv() {
            self.handle_line(&line);
        }
        if let Some(file) = self.file.as_mut() {
            let _ = file.flush();
        }
        tracing::debug!("log writer stopped");
    }

    fn handle_line(&mut self, line: &str) {
        if let Err(err) = self.write_line(line) {
            tracing::error!("log write failed: {err}");
        }
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            // File handle was lost to an earlier I/O failure; the record
            // already went to the console echo if that was enabled
            return Ok(());
        };

        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        file.flush()?;
        self.current_bytes += line.len() as u64 + 1;

        if self.current_bytes >= self.config.max_bytes_per_file {
            self.rotate()?;
        }
        Ok(())
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        self.config
            .log_dir
            .join(format!("{}.{}.log", self.config.base_name, index))
    }

    /// Shift the backup chain and start a fresh active file
    ///
    /// `<base>.log` becomes `<base>.1.log`, `<base>.1.log` becomes
    /// `<base>.2.log`, and so on; the rename into `<base>.<max>.log`
    /// overwrites the oldest backup. With zero backups configured the
    /// active file is removed outright.
    fn rotate(&mut self) -> Result<()> {
        // Close the handle before renaming the file under it
        self.file = None;

        if self.config.max_backup_files == 0 {
            fs::remove_file(&self.active_path)
                .map_err(|e| Error::Rotation(format!("{}: {e}", self.active_path.display())))?;
        }

        for i in (0..self.config.max_backup_files).rev() {
            let from = if i == 0 {
                self.active_path.clone()
            } else {
                self.backup_path(i)
            };
            if from.exists() {
                let to = self.backup_path(i + 1);
                fs::rename(&from, &to).map_err(|e| {
                    Error::Rotation(format!("{} -> {}: {e}", from.display(), to.display()))
                })?;
            }
        }

        self.open_log_file()?;
        tracing::debug!("rotated log file {}", self.active_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;
    use tempfile::TempDir;

    fn writer_with_config(config: LoggerConfig) -> (AsyncLogWriter, Sender<String>) {
        let (sender, receiver) = channel::bounded(config.queue_capacity);
        let stop = Arc::new(AtomicBool::new(false));
        (AsyncLogWriter::new(receiver, stop, config), sender)
    }

    fn read_file(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap_or_default()
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let (sender, receiver) = channel::bounded::<String>(2);

        enqueue(&sender, &receiver, "one".to_string());
        enqueue(&sender, &receiver, "two".to_string());
        enqueue(&sender, &receiver, "three".to_string());

        assert_eq!(receiver.try_recv().unwrap(), "two");
        assert_eq!(receiver.try_recv().unwrap(), "three");
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_write_appends_and_counts_bytes() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig::builder()
            .log_dir(dir.path())
            .base_name("svc")
            .build();
        let (mut writer, _sender) = writer_with_config(config);

        writer.write_line("alpha").unwrap();
        writer.write_line("beta").unwrap();

        assert_eq!(writer.current_bytes, 11);
        assert_eq!(read_file(&dir, "svc.log"), "alpha\nbeta\n");
    }

    #[test]
    fn test_rotation_shifts_backup_chain() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig::builder()
            .log_dir(dir.path())
            .base_name("svc")
            .max_bytes_per_file(1)
            .max_backup_files(2)
            .build();
        let (mut writer, _sender) = writer_with_config(config);

        // Every line exceeds the threshold, so each write rotates
        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();
        writer.write_line("third").unwrap();

        assert_eq!(read_file(&dir, "svc.log"), "");
        assert_eq!(read_file(&dir, "svc.1.log"), "third\n");
        assert_eq!(read_file(&dir, "svc.2.log"), "second\n");
        // The oldest content fell off the end of the chain
        assert!(!dir.path().join("svc.3.log").exists());
    }

    #[test]
    fn test_rotation_with_zero_backups_truncates() {
        let dir = TempDir::new().unwrap();
        let config = LoggerConfig::builder()
            .log_dir(dir.path())
            .base_name("svc")
            .max_bytes_per_file(1)
            .max_backup_files(0)
            .build();
        let (mut writer, _sender) = writer_with_config(config);

        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();

        assert_eq!(read_file(&dir, "svc.log"), "");
        assert!(!dir.path().join("svc.1.log").exists());
    }
}
