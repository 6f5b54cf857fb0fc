use crate::error::Result;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// Watches the host's input files and reports which one changed.
pub struct InputWatcher {
    _watcher: RecommendedWatcher,
}

impl InputWatcher {
    pub fn new(paths: &[&Path]) -> Result<(Self, mpsc::UnboundedReceiver<PathBuf>)> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let tracked: Vec<PathBuf> = paths
            .iter()
            .map(|p| p.canonicalize().unwrap_or_else(|_| p.to_path_buf()))
            .collect();
        let filter = tracked.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<Event, notify::Error>| {
                let Ok(event) = res else { return };
                if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    return;
                }
                for path in event.paths {
                    if filter.iter().any(|t| *t == path) {
                        let _ = event_tx.send(path);
                    }
                }
            },
            Config::default()
                .with_poll_interval(Duration::from_secs(1))
                .with_compare_contents(false),
        )?;

        // Watch parent directories so editors that replace files are still seen
        let mut dirs: Vec<&Path> = tracked.iter().map(|p| p.parent().unwrap_or(p)).collect();
        dirs.sort();
        dirs.dedup();
        for dir in dirs {
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
            tracing::debug!("Watching {:?} for input changes", dir);
        }

        Ok((Self { _watcher: watcher }, event_rx))
    }
}
