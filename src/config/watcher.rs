//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself, so editors
//! that save by writing a temp file and renaming it over the config are still
//! seen. Events for other files in that directory are dropped, and a burst of
//! events for one save reloads once: the file is only parsed when its
//! contents differ from the last reload.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::GatewayConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<GatewayConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<GatewayConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as reloads are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let Some(file_name) = path.file_name().map(OsString::from) else {
            return Err(notify::Error::path_not_found().add_path(path));
        };
        let dir = watch_dir(&path);

        let mut changes = ChangeFilter::new(fs::read_to_string(&path).ok());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !is_config_event(&event, &file_name) {
                        return;
                    }
                    let content = match fs::read_to_string(&path) {
                        Ok(content) => content,
                        // Mid-rename; the create event for the new file follows
                        Err(e) => {
                            tracing::debug!(path = ?path, error = %e, "Config file not readable yet");
                            return;
                        }
                    };
                    if !changes.is_new(&content) {
                        tracing::debug!(path = ?path, "Config file unchanged, skipping reload");
                        return;
                    }

                    tracing::info!(path = ?path, "Config file change detected, reloading");
                    match parse_config(&content) {
                        Ok(new_config) => {
                            let _ = tx.send(new_config);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to reload config, keeping current policy");
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

/// Directory holding the config file; `.` for a bare file name.
fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// A write or create touching the config file itself.
fn is_config_event(event: &Event, file_name: &OsString) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

/// Remembers the contents of the last reload.
struct ChangeFilter {
    last: Option<String>,
}

impl ChangeFilter {
    fn new(initial: Option<String>) -> Self {
        Self { last: initial }
    }

    /// True when `content` differs from what was last seen, recording it.
    fn is_new(&mut self, content: &str) -> bool {
        if self.last.as_deref() == Some(content) {
            return false;
        }
        self.last = Some(content.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, EventKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    fn write(path: &str) -> Event {
        event(EventKind::Modify(ModifyKind::Data(DataChange::Content)), path)
    }

    #[test]
    fn test_only_config_file_events_pass() {
        let name = OsString::from("gateway.toml");
        assert!(is_config_event(&write("/etc/gateway/gateway.toml"), &name));
        assert!(is_config_event(
            &event(EventKind::Create(CreateKind::File), "/etc/gateway/gateway.toml"),
            &name
        ));
        assert!(!is_config_event(&write("/etc/gateway/.gateway.toml.swp"), &name));
        assert!(!is_config_event(&write("/etc/gateway/other.toml"), &name));
        assert!(!is_config_event(
            &event(EventKind::Access(AccessKind::Any), "/etc/gateway/gateway.toml"),
            &name
        ));
    }

    #[test]
    fn test_unchanged_content_is_skipped() {
        let mut changes = ChangeFilter::new(Some("[docs]\n".into()));

        assert!(!changes.is_new("[docs]\n"));
        assert!(changes.is_new("[docs]\nmode = \"allow_list\"\n"));
        assert!(!changes.is_new("[docs]\nmode = \"allow_list\"\n"));
        assert!(changes.is_new("[docs]\n"));

        let mut unread = ChangeFilter::new(None);
        assert!(unread.is_new(""));
    }

    #[test]
    fn test_watch_dir_of_bare_file_name() {
        assert_eq!(watch_dir(Path::new("gateway.toml")), PathBuf::from("."));
        assert_eq!(
            watch_dir(Path::new("/etc/gateway/gateway.toml")),
            PathBuf::from("/etc/gateway")
        );
    }
}
