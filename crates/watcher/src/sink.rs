//! Closable handoff channel for change reports

use crate::report::ChangeReport;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Receiving side of a change channel
pub type ChangeReceiver = mpsc::Receiver<ChangeReport>;

/// Create a change channel
///
/// The channel holds at most one pending report, so a consumer that stops
/// reading pauses the watcher instead of letting reports pile up.
pub fn change_channel() -> (ChangeSink, ChangeReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (ChangeSink::new(tx), rx)
}

/// Sending side of a change channel
///
/// Clones share one underlying sender, so [`ChangeSink::close`] on any clone
/// closes the channel for every holder and the receiver sees `None`.
#[derive(Clone)]
pub struct ChangeSink {
    tx: Arc<Mutex<Option<mpsc::Sender<ChangeReport>>>>,
}

/// Returned when a report cannot be delivered
#[derive(Debug)]
pub enum SendFailure {
    /// The sink was closed before or during the send
    Closed,
    /// The receiver was dropped
    Disconnected,
}

impl ChangeSink {
    fn new(tx: mpsc::Sender<ChangeReport>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Send a report, waiting while the previous one is still unconsumed
    pub async fn send(&self, report: ChangeReport) -> Result<(), SendFailure> {
        // Clone out so the lock is not held across the await
        let tx = match self.tx.lock().as_ref() {
            Some(tx) => tx.clone(),
            None => return Err(SendFailure::Closed),
        };

        tx.send(report).await.map_err(|_| SendFailure::Disconnected)
    }

    /// Drop the sender, closing the channel once no send is in flight
    pub fn close(&self) {
        self.tx.lock().take();
    }

    /// Check if the sink has been closed
    pub fn is_closed(&self) -> bool {
        match self.tx.lock().as_ref() {
            Some(tx) => tx.is_closed(),
            None => true,
        }
    }
}

impl std::fmt::Debug for ChangeSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSink")
            .field("closed", &self.is_closed())
            .finish()
    }
}
