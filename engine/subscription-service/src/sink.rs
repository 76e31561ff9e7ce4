//! Notification sink boundary.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::types::SnapshotRecord;

/// Capability to deliver a snapshot payload to every subscriber
/// interested in a subscription type.
///
/// Fire-and-forget: the engine consumes no return value, and each
/// implementation owns its failure handling. Delivery must never block
/// the caller beyond the await itself.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, subscription_type: &str, records: &[SnapshotRecord]);
}

/// Sink that records every delivery in memory (for tests).
#[derive(Default)]
pub struct CapturingSink {
    deliveries: Mutex<Vec<(String, Vec<SnapshotRecord>)>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, in order.
    pub fn deliveries(&self) -> Vec<(String, Vec<SnapshotRecord>)> {
        self.deliveries.lock().clone()
    }
}

#[async_trait]
impl NotificationSink for CapturingSink {
    async fn deliver(&self, subscription_type: &str, records: &[SnapshotRecord]) {
        self.deliveries.lock().push((subscription_type.to_string(), records.to_vec()));
    }
}
