//! Notification inbox state.
//!
//! A [`NotificationCenter`] holds the locally cached notification list.
//! Read-state changes are purely local; the source is only consulted on
//! [`NotificationCenter::refresh`].

use pinnwand_common::model::{
    Id,
    notification::{Notification, NotificationKind, NotificationMarker},
};
use pinnwand_source::{NotificationSource, Result};
use tracing::debug;

#[derive(Clone, Debug, Default)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached list with the source's current one.
    pub async fn refresh(&mut self, source: &impl NotificationSource) -> Result<()> {
        self.notifications = source.list_notifications().await?;
        debug!(
            total = self.notifications.len(),
            unread = self.unread_count(),
            "Refreshed notifications"
        );
        Ok(())
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications
            .iter()
            .filter(|notification| !notification.read)
            .count()
    }

    /// Notifications of one kind, in cached order.
    pub fn of_kind(&self, kind: NotificationKind) -> impl Iterator<Item = &Notification> {
        self.notifications
            .iter()
            .filter(move |notification| notification.kind == kind)
    }

    /// Marks one notification as read. Unknown ids are silent no-ops.
    pub fn mark_read(&mut self, id: &Id<NotificationMarker>) {
        match self
            .notifications
            .iter_mut()
            .find(|notification| notification.id == *id)
        {
            Some(notification) => notification.read = true,
            None => debug!(%id, "Notification not cached, skipping mark-read"),
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::notifications::NotificationCenter;
    use pinnwand_common::model::{Id, notification::NotificationKind};
    use pinnwand_source::mock::MockBackend;
    use std::time::Duration;

    async fn refreshed() -> NotificationCenter {
        let source = MockBackend::new().latency(Duration::ZERO);
        let mut center = NotificationCenter::new();
        center.refresh(&source).await.unwrap();
        center
    }

    #[tokio::test]
    async fn unread_count_tracks_read_flags() {
        let mut center = refreshed().await;
        assert_eq!(center.notifications().len(), 5);
        assert_eq!(center.unread_count(), 3);

        center.mark_read(&Id::from("notification-1"));
        assert_eq!(center.unread_count(), 2);

        // Already read and unknown ids change nothing.
        center.mark_read(&Id::from("notification-1"));
        center.mark_read(&Id::from("notification-404"));
        assert_eq!(center.unread_count(), 2);

        center.mark_all_read();
        assert_eq!(center.unread_count(), 0);
    }

    #[tokio::test]
    async fn of_kind_filters_without_reordering() {
        let center = refreshed().await;

        let likes: Vec<_> = center.of_kind(NotificationKind::Like).collect();
        assert_eq!(likes.len(), 1);
        assert_eq!(likes[0].id, Id::from("notification-1"));

        assert_eq!(center.of_kind(NotificationKind::Mention).count(), 0);
    }
}
