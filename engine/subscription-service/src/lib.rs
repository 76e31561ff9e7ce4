//! # subscription-service
//!
//! The notification boundary of the simulator: an append-only registry of
//! subscribers, the `NotificationSink` capability the engine pushes
//! through, and the HTTP dispatcher that POSTs UTMC-style payloads to
//! every interested callback URL. Delivery is best-effort and
//! fire-and-forget; failures are logged, never propagated.

pub mod dispatcher;
pub mod registry;
pub mod sink;
pub mod types;

pub use dispatcher::{HttpNotificationSink, NotificationPayload};
pub use registry::{Subscription, SubscriptionRegistry};
pub use sink::{CapturingSink, NotificationSink};
pub use types::{SnapshotDynamics, SnapshotRecord};

/// Subscription-type tag for the live air quality push feed.
pub const AIR_QUALITY_DYNAMIC: &str = "AIR QUALITY DYNAMIC";
