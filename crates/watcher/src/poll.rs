//! The polling watch loop
//!
//! A [`PollWatcher`] owns one background task at most. The task waits for the
//! configured interval, scans, diffs against the previous snapshot and sends
//! a [`ChangeReport`] when something changed. Control calls only flip the
//! shared [`WatchState`]; the task observes it at two checkpoints, after the
//! interval wait and right before sending.

use crate::config::WatchConfig;
use crate::error::{ScanError, WatchError};
use crate::report::ChangeReport;
use crate::sink::SendFailure;
use parking_lot::Mutex;
use pollwatch_core::{Snapshot, SnapshotDiff};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// Lifecycle state of a watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Not polling; `start` resumes
    Stopped,
    /// Polling on the configured interval
    Running,
    /// Permanently shut down, change channel closed
    Destroyed,
}

/// Polling file watcher
///
/// ```no_run
/// use pollwatch::{change_channel, PollWatcher, FlatScanner, WatchConfig};
/// use std::time::Duration;
///
/// # async fn example() -> anyhow::Result<()> {
/// let (sink, mut changes) = change_channel();
/// let config = WatchConfig::builder()
///     .root("/etc/myapp")
///     .criterion(".conf")
///     .interval(Duration::from_secs(2))
///     .changes(sink)
///     .scanner(FlatScanner)
///     .build()?;
///
/// let watcher = PollWatcher::new(config)?;
/// watcher.start();
///
/// while let Some(report) = changes.recv().await {
///     for path in report.updated_paths() {
///         println!("changed: {}", path.display());
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// Dropping the watcher destroys it.
pub struct PollWatcher {
    shared: Arc<Shared>,
    runtime: Handle,
}

struct Shared {
    config: WatchConfig,
    control: Mutex<Control>,
    /// Interrupts the interval wait so control changes are seen promptly
    wake: Notify,
    /// Only touched by the polling task
    last: Mutex<Snapshot>,
}

struct Control {
    state: WatchState,
    task_alive: bool,
}

impl PollWatcher {
    /// Create a stopped watcher
    ///
    /// Must be called from within a tokio runtime; the polling task is
    /// spawned onto that runtime.
    pub fn new(config: WatchConfig) -> Result<Self, WatchError> {
        let runtime = Handle::try_current()?;

        Ok(Self {
            shared: Arc::new(Shared {
                config,
                control: Mutex::new(Control {
                    state: WatchState::Stopped,
                    task_alive: false,
                }),
                wake: Notify::new(),
                last: Mutex::new(Snapshot::new()),
            }),
            runtime,
        })
    }

    /// Start or resume polling
    ///
    /// Does nothing when already running or destroyed.
    pub fn start(&self) {
        let mut control = self.shared.control.lock();
        if control.state != WatchState::Stopped {
            return;
        }
        control.state = WatchState::Running;

        // A task that has not yet noticed a stop simply keeps going
        if control.task_alive {
            info!("Resuming watch of {}", self.shared.config.root().display());
            return;
        }
        control.task_alive = true;
        drop(control);

        info!(
            "Watching {} for {:?} every {:?}",
            self.shared.config.root().display(),
            self.shared.config.criteria(),
            self.shared.config.interval()
        );
        self.runtime.spawn(poll_loop(Arc::clone(&self.shared)));
    }

    /// Pause polling; the change channel stays open
    pub fn stop(&self) {
        let mut control = self.shared.control.lock();
        if control.state != WatchState::Running {
            return;
        }
        control.state = WatchState::Stopped;
        self.shared.wake.notify_one();
        info!("Stopping watch of {}", self.shared.config.root().display());
    }

    /// Shut down for good and close the change channel
    ///
    /// The channel closes right away when no polling task is alive, otherwise
    /// as soon as the task reaches its next checkpoint.
    pub fn destroy(&self) {
        let mut control = self.shared.control.lock();
        if control.state == WatchState::Destroyed {
            return;
        }
        control.state = WatchState::Destroyed;

        if control.task_alive {
            self.shared.wake.notify_one();
        } else {
            self.shared.config.changes().close();
        }
        info!("Destroyed watch of {}", self.shared.config.root().display());
    }

    pub fn state(&self) -> WatchState {
        self.shared.control.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == WatchState::Running
    }

    /// The configuration this watcher was created with
    pub fn config(&self) -> &WatchConfig {
        &self.shared.config
    }
}

impl Drop for PollWatcher {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl std::fmt::Debug for PollWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollWatcher")
            .field("config", &self.shared.config)
            .field("state", &self.state())
            .finish()
    }
}

impl Shared {
    /// Checkpoint: true while running, otherwise retires the task
    fn keep_polling(&self) -> bool {
        let mut control = self.control.lock();
        match control.state {
            WatchState::Running => true,
            WatchState::Stopped => {
                control.task_alive = false;
                debug!("Poll task for {} exiting", self.config.root().display());
                false
            }
            WatchState::Destroyed => {
                control.task_alive = false;
                self.config.changes().close();
                debug!("Poll task for {} closed its channel", self.config.root().display());
                false
            }
        }
    }

    /// The consumer is gone, nothing left to poll for
    fn disconnect(&self) {
        let mut control = self.control.lock();
        control.state = WatchState::Destroyed;
        control.task_alive = false;
        self.config.changes().close();
    }

    async fn scan(self: &Arc<Self>) -> Result<Snapshot, ScanError> {
        let shared = Arc::clone(self);
        tokio::task::spawn_blocking(move || shared.config.scanner().scan(&shared.config))
            .await
            .unwrap_or_else(|err| Err(ScanError::Scanner(format!("scanner task failed: {err}"))))
    }
}

async fn poll_loop(shared: Arc<Shared>) {
    let interval = shared.config.interval();

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = shared.wake.notified() => {
                if !shared.keep_polling() {
                    return;
                }
                // Stopped and resumed before we looked; wait a full interval again
                continue;
            }
        }

        if !shared.keep_polling() {
            return;
        }

        let (report, current) = match shared.scan().await {
            Ok(current) => {
                let diff = SnapshotDiff::between(&shared.last.lock(), &current);
                debug!(
                    "Scanned {}: {} matched, {} updated, {} deleted",
                    shared.config.root().display(),
                    current.len(),
                    diff.updated.len(),
                    diff.deleted.len()
                );

                if diff.is_empty() && !shared.config.emit_empty() {
                    *shared.last.lock() = current;
                    continue;
                }
                (ChangeReport::from_diff(diff), Some(current))
            }
            Err(err) => {
                warn!("Scan of {} failed: {}", shared.config.root().display(), err);
                (ChangeReport::from_error(err), None)
            }
        };

        if !shared.keep_polling() {
            return;
        }

        match shared.config.changes().send(report).await {
            Ok(()) => {
                // Only a delivered report moves the baseline forward
                if let Some(current) = current {
                    *shared.last.lock() = current;
                }
            }
            Err(SendFailure::Disconnected) => {
                warn!(
                    "Change receiver for {} dropped, shutting down",
                    shared.config.root().display()
                );
                shared.disconnect();
                return;
            }
            Err(SendFailure::Closed) => {
                shared.disconnect();
                return;
            }
        }
    }
}
