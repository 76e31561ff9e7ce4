//! Append-only subscriber registry.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One subscriber: a callback target plus the subscription types it wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub notification_url: String,
    pub subscriptions: Vec<String>,
}

/// Append-only list of subscription records. A subscription's identifier
/// is its position in the list; records are never removed or reordered.
#[derive(Default)]
pub struct SubscriptionRegistry {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Returns the new registry length, which the
    /// boundary reports as the subscription id.
    pub fn subscribe(&self, notification_url: String, subscriptions: Vec<String>) -> usize {
        let mut subs = self.subscriptions.write();
        info!("New subscription request: {notification_url}");
        subs.push(Subscription { notification_url, subscriptions });
        subs.len()
    }

    /// Subscribers interested in `subscription_type`, paired with their
    /// 0-based positional ids.
    pub fn interested_in(&self, subscription_type: &str) -> Vec<(usize, Subscription)> {
        self.subscriptions
            .read()
            .iter()
            .enumerate()
            .filter(|(_, sub)| sub.subscriptions.iter().any(|tag| tag == subscription_type))
            .map(|(index, sub)| (index, sub.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_returns_positional_ids() {
        let registry = SubscriptionRegistry::new();
        assert_eq!(registry.subscribe("http://a.example/cb".into(), vec!["X".into()]), 1);
        assert_eq!(registry.subscribe("http://b.example/cb".into(), vec!["Y".into()]), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn interested_in_filters_by_tag() {
        let registry = SubscriptionRegistry::new();
        registry.subscribe("http://a.example/cb".into(), vec!["AIR QUALITY DYNAMIC".into()]);
        registry.subscribe("http://b.example/cb".into(), vec!["OTHER".into()]);
        registry.subscribe(
            "http://c.example/cb".into(),
            vec!["OTHER".into(), "AIR QUALITY DYNAMIC".into()],
        );

        let interested = registry.interested_in("AIR QUALITY DYNAMIC");
        let ids: Vec<usize> = interested.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(interested[0].1.notification_url, "http://a.example/cb");
    }

    #[test]
    fn no_subscribers_means_no_interest() {
        let registry = SubscriptionRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.interested_in("AIR QUALITY DYNAMIC").is_empty());
    }
}
