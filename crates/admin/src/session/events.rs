//! In-process feature flag change notifications.
//!
//! A best-effort broadcast: publishing with no subscribers is fine, slow
//! subscribers lose the oldest changes, and nothing leaves this process.
//! Subscribers are expected to update their own state from the payload rather
//! than re-reading cookies.

use menuboard_core::FeatureFlags;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Default number of buffered changes per subscriber.
const DEFAULT_CAPACITY: usize = 16;

/// Publish/subscribe channel for feature flag changes.
#[derive(Debug, Clone)]
pub struct FeatureBus {
    sender: broadcast::Sender<FeatureFlags>,
}

impl Default for FeatureBus {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureBus {
    /// Create a bus with the default buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a bus buffering up to `capacity` changes per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Receive every change published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FeatureFlags> {
        self.sender.subscribe()
    }

    /// Notify current subscribers. Returns how many were notified.
    pub fn publish(&self, features: &FeatureFlags) -> usize {
        self.sender.send(features.clone()).unwrap_or(0)
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Log every feature flag change until the bus is dropped.
pub fn spawn_feature_audit(bus: &FeatureBus) -> JoinHandle<()> {
    let mut receiver = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(features) => {
                    let enabled: Vec<&str> =
                        features.enabled().into_iter().map(|f| f.key()).collect();
                    tracing::info!(?enabled, "admin feature flags changed");
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "feature audit fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use menuboard_core::FeatureFlag;

    use super::*;

    #[test]
    fn test_publish_without_subscribers_is_not_an_error() {
        let bus = FeatureBus::new();
        assert_eq!(bus.publish(&FeatureFlags::default()), 0);
    }

    #[tokio::test]
    async fn test_subscribers_receive_published_flags() {
        let bus = FeatureBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let flags = FeatureFlags::default().with(FeatureFlag::OrdersToggle, true);
        assert_eq!(bus.publish(&flags), 2);

        assert_eq!(first.recv().await.unwrap(), flags);
        assert_eq!(second.recv().await.unwrap(), flags);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_changes() {
        let bus = FeatureBus::new();
        bus.publish(&FeatureFlags::default().with(FeatureFlag::EventsToggle, true));

        let mut late = bus.subscribe();
        assert!(late.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_old_changes() {
        let bus = FeatureBus::with_capacity(1);
        let mut receiver = bus.subscribe();

        bus.publish(&FeatureFlags::default().with(FeatureFlag::OrdersToggle, true));
        let latest = FeatureFlags::default().with(FeatureFlag::EventsToggle, true);
        bus.publish(&latest);

        assert!(matches!(
            receiver.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
        assert_eq!(receiver.recv().await.unwrap(), latest);
    }

    #[tokio::test]
    async fn test_audit_task_stops_when_bus_dropped() {
        let bus = FeatureBus::new();
        let handle = spawn_feature_audit(&bus);
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(&FeatureFlags::default());
        drop(bus);

        handle.await.unwrap();
    }
}
