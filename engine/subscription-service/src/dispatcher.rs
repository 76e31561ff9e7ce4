//! HTTP push dispatcher: UTMC-style notification payloads POSTed to each
//! interested subscriber's callback URL.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::registry::SubscriptionRegistry;
use crate::sink::NotificationSink;
use crate::types::{SnapshotDynamics, SnapshotRecord};

/// Action tag stamped on outgoing notifications.
pub const NOTIFICATION_ACTION: &str = "INSERT";

/// Top-level payload POSTed to a subscriber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// 0-based positional id of the receiving subscription
    pub subscription_id: String,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// The subscription-type tag this notification belongs to
    pub subscription: String,
    pub action: String,
    pub notification_data: Vec<NotificationData>,
}

/// One site's grouped dynamics within a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    pub system_code_number: String,
    pub dynamics: Vec<SnapshotDynamics>,
}

/// Best-effort HTTP POST delivery to every interested subscriber.
///
/// Per-subscriber failures are logged and do not abort delivery to the
/// rest; nothing propagates to the caller.
pub struct HttpNotificationSink {
    registry: Arc<SubscriptionRegistry>,
    client: Client,
}

impl HttpNotificationSink {
    pub fn new(registry: Arc<SubscriptionRegistry>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { registry, client })
    }
}

#[async_trait]
impl NotificationSink for HttpNotificationSink {
    async fn deliver(&self, subscription_type: &str, records: &[SnapshotRecord]) {
        let interested = self.registry.interested_in(subscription_type);
        if interested.is_empty() {
            return;
        }

        let notification_data = group_by_site(records);
        for (index, subscription) in interested {
            let payload = NotificationPayload {
                subscription_id: index.to_string(),
                notifications: vec![Notification {
                    subscription: subscription_type.to_string(),
                    action: NOTIFICATION_ACTION.to_string(),
                    notification_data: notification_data.clone(),
                }],
            };

            match self.client.post(&subscription.notification_url).json(&payload).send().await {
                Ok(response) => debug!(
                    "Push sent to {} - Status: {}",
                    subscription.notification_url,
                    response.status()
                ),
                Err(e) => error!("Failed to notify {}: {e}", subscription.notification_url),
            }
        }
    }
}

/// Group snapshot records by site code, preserving first-seen site order.
fn group_by_site(records: &[SnapshotRecord]) -> Vec<NotificationData> {
    let mut grouped: Vec<NotificationData> = Vec::new();
    for record in records {
        match grouped.iter_mut().find(|g| g.system_code_number == record.system_code_number) {
            Some(group) => group.dynamics.push(record.dynamics.clone()),
            None => grouped.push(NotificationData {
                system_code_number: record.system_code_number.clone(),
                dynamics: vec![record.dynamics.clone()],
            }),
        }
    }
    grouped
}
