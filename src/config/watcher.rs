//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself, so saves
//! that replace the file (write to a temp file, then rename) keep being
//! seen. One save usually raises several events; a reload is only sent when
//! the file's contents differ from the last version handed out.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::AppConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<AppConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let file_name = self.path.file_name().map(OsString::from);
        let dir = watch_dir(&self.path);
        let mut reloader = Reloader::new(self.path.clone());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let relevant = (event.kind.is_modify() || event.kind.is_create())
                        && event
                            .paths
                            .iter()
                            .any(|p| p.file_name().map(OsString::from) == file_name);
                    if !relevant {
                        return;
                    }
                    if let Some(config) = reloader.reload() {
                        let _ = tx.send(config);
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Turns file contents into configs, skipping repeats and partial writes.
struct Reloader {
    path: PathBuf,
    last: Option<String>,
}

impl Reloader {
    /// The file's current contents count as already loaded.
    fn new(path: PathBuf) -> Self {
        let last = fs::read_to_string(&path).ok();
        Self { path, last }
    }

    fn reload(&mut self) -> Option<AppConfig> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => self.apply(contents),
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Config file unreadable, keeping current route table");
                None
            }
        }
    }

    fn apply(&mut self, contents: String) -> Option<AppConfig> {
        // Truncated mid-save; the write that follows raises another event.
        if contents.trim().is_empty() {
            tracing::debug!(path = ?self.path, "Config file empty, waiting for the write to finish");
            return None;
        }
        if self.last.as_deref() == Some(contents.as_str()) {
            tracing::debug!(path = ?self.path, "Config file unchanged, skipping reload");
            return None;
        }

        match parse_config(&contents) {
            Ok(config) => {
                let routes = config.route_table().map(|t| t.len()).unwrap_or_default();
                tracing::info!(
                    path = ?self.path,
                    routes,
                    revision = ?config.router.revision,
                    "Config file changed, reloading"
                );
                self.last = Some(contents);
                Some(config)
            }
            Err(e) => {
                tracing::error!(
                    path = ?self.path,
                    error = %e,
                    "Failed to reload config, keeping current route table"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Revision;

    fn reloader(initial: &str) -> (tempfile::TempDir, Reloader) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domscout.toml");
        fs::write(&path, initial).unwrap();
        let reloader = Reloader::new(path);
        (dir, reloader)
    }

    #[test]
    fn test_unchanged_contents_skipped() {
        let initial = "[router]\nrevision = \"initial\"\n";
        let (_dir, mut reloader) = reloader(initial);
        assert!(reloader.reload().is_none());
        assert!(reloader.apply(initial.to_string()).is_none());
    }

    #[test]
    fn test_changed_contents_reloaded_once() {
        let (_dir, mut reloader) = reloader("[router]\nrevision = \"initial\"\n");
        let current = "[router]\nrevision = \"current\"\n".to_string();

        let config = reloader.apply(current.clone()).unwrap();
        assert_eq!(config.router.revision, Revision::Current);
        assert!(reloader.apply(current).is_none());
    }

    #[test]
    fn test_empty_and_invalid_contents_ignored() {
        let (_dir, mut reloader) = reloader("[router]\nrevision = \"initial\"\n");
        assert!(reloader.apply(String::new()).is_none());
        assert!(reloader.apply("  \n".to_string()).is_none());
        assert!(reloader.apply("[router\n".to_string()).is_none());
        assert!(reloader.apply("[router]\nmax_history = 0\n".to_string()).is_none());

        // A rejected version does not become the baseline.
        let config = reloader.apply("[router]\nrevision = \"current\"\n".to_string());
        assert!(config.is_some());
    }

    #[test]
    fn test_watch_dir() {
        assert_eq!(watch_dir(Path::new("/etc/domscout/app.toml")), PathBuf::from("/etc/domscout"));
        assert_eq!(watch_dir(Path::new("app.toml")), PathBuf::from("."));
    }
}
