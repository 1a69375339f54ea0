//! Follow task: polls the log file and the format file on an interval.
//!
//! Each tick re-stats the log file through [`FileLineProvider::refresh`] and
//! checks the format file's modification time. Whatever changed is sent to the
//! application loop as [`WatchEvent`]s, in the order it happened.

use crate::error::Result;
use crate::format::{load_format, LogFormat};
use crate::line_source::{FileLineProvider, LineCountChange};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc::Sender;
use tokio::time::MissedTickBehavior;

/// Something the application loop has to react to
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// The log file's line count changed
    Lines(LineCountChange),
    /// The format file changed and loaded cleanly
    Format(Arc<LogFormat>),
    /// The format file changed but could not be loaded; the old format stays
    FormatError(String),
}

/// Modification-time tracker for a format file
#[derive(Debug)]
pub struct FormatWatch {
    path: PathBuf,
    modified: Option<SystemTime>,
}

impl FormatWatch {
    /// Start watching `path`, treating its current contents as already loaded
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let modified = modified_time(&path);
        Self { path, modified }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload the format if the file changed since the last check
    ///
    /// Returns `None` when nothing changed or the file is currently missing.
    pub fn poll(&mut self) -> Option<Result<LogFormat>> {
        let modified = modified_time(&self.path)?;
        if self.modified == Some(modified) {
            return None;
        }
        self.modified = Some(modified);
        Some(load_format(&self.path))
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .ok()
}

/// Run the follow task until the receiving side goes away.
///
/// `provider` is `None` when following is disabled; the format file is still
/// watched in that case.
pub async fn watch_loop(
    tx: Sender<WatchEvent>,
    provider: Option<Arc<FileLineProvider>>,
    mut format_watch: Option<FormatWatch>,
    poll_interval: Duration,
) {
    let mut interval = tokio::time::interval(poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let events = collect_events(provider.as_ref(), format_watch.as_mut()).await;
                for event in events {
                    if tx.send(event).await.is_err() {
                        return;
                    }
                }
            },
            _ = tx.closed() => break,
        }
    }
    log::debug!("Watcher stopped");
}

async fn collect_events(
    provider: Option<&Arc<FileLineProvider>>,
    format_watch: Option<&mut FormatWatch>,
) -> Vec<WatchEvent> {
    let mut events = Vec::new();

    if let Some(provider) = provider {
        let provider = Arc::clone(provider);
        match tokio::task::spawn_blocking(move || provider.refresh()).await {
            Ok(Ok(changes)) => events.extend(changes.into_iter().map(WatchEvent::Lines)),
            Ok(Err(e)) => log::warn!("Failed to refresh log file: {}", e),
            Err(e) => log::error!("Refresh task failed: {}", e),
        }
    }

    if let Some(watch) = format_watch {
        match watch.poll() {
            Some(Ok(format)) => {
                log::info!("Reloaded format from {}", watch.path().display());
                events.push(WatchEvent::Format(Arc::new(format)));
            }
            Some(Err(e)) => {
                log::warn!(
                    "Failed to reload format {}: {}",
                    watch.path().display(),
                    e
                );
                events.push(WatchEvent::FormatError(e.to_string()));
            }
            None => {}
        }
    }

    events
}
