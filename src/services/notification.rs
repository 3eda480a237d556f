use crate::models::comment::ParentNode;
use crate::models::notification::{Notification, NotificationType};
use crate::stores::NotificationSink;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationService {
    sink: Arc<dyn NotificationSink>,
}

impl NotificationService {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Queues a reply notification for the parent's owning author and
    /// returns immediately. The insert runs on a detached task, overlapping
    /// the response path; a failed insert is logged and dropped so it can
    /// never affect the outcome of the reply itself.
    pub fn notify_reply(&self, parent: &ParentNode, replying_user: &str) {
        let message = match parent.notification_type() {
            NotificationType::Post => format!("{} has commented on your post", replying_user),
            NotificationType::Comment => format!("{} has replied to your comment", replying_user),
        };

        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            notification_type: parent.notification_type(),
            recipient: parent.owning_author().to_string(),
            read: false,
            source_id: parent.id().to_string(),
            message,
            created_at: Utc::now(),
        };

        debug!(
            "Queueing {:?} reply notification for {}",
            notification.notification_type, notification.recipient
        );

        let sink = self.sink.clone();
        tokio::spawn(async move {
            let recipient = notification.recipient.clone();
            if let Err(e) = sink.insert(notification).await {
                warn!("Failed to record reply notification for {}: {}", recipient, e);
            }
        });
    }
}
