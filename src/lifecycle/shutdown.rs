//! Shutdown coordination for the gateway.
//!
//! A single `watch` flag flips from `false` to `true` once. Subscribers
//! created after the flip still observe it, so a server started late
//! never misses a shutdown that already happened.

use std::sync::Arc;

use tokio::sync::watch;

/// Handle that triggers shutdown. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Shutdown {
    flag: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (flag, _) = watch::channel(false);
        Self { flag: Arc::new(flag) }
    }

    /// A future-producing handle for one long-running task.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.flag.subscribe(),
        }
    }

    /// Flip the flag. Idempotent.
    pub fn trigger(&self) {
        self.flag.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of [`Shutdown`].
#[derive(Debug)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered or every [`Shutdown`] handle is dropped.
    pub async fn wait(mut self) {
        // A closed channel means nobody can trigger any more; treat it as shutdown.
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}
