//! Periodic driver for the pusher.

use std::sync::Arc;

use tokio::time::interval;
use tracing::info;

use crate::pusher::LivePusher;

/// Drives [`LivePusher::tick`] at a fixed wall-clock cadence on a
/// background task. Started explicitly by the orchestrator; module
/// initialization never starts a timer on its own.
pub struct PushScheduler {
    pusher: Arc<LivePusher>,
}

impl PushScheduler {
    pub fn new(pusher: Arc<LivePusher>) -> Self {
        Self { pusher }
    }

    /// Run the tick loop forever at the pusher's configured cadence.
    pub async fn run(self) {
        let cadence = self.pusher.config().cadence();
        info!("Starting push scheduler with {:?} cadence", cadence);

        let mut ticker = interval(cadence);
        // The first interval tick completes immediately; consume it so the
        // first push happens one full cadence after startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            self.pusher.tick().await;
        }
    }

    /// Spawn the loop on the runtime, returning its join handle.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
