use crate::{error::Result, models::notification::Notification, services::Database};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Write-only sink for notification records. The caller decides what to
/// do with a failure; the lifecycle core drops it.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn insert(&self, notification: Notification) -> Result<()>;
}

pub struct SurrealNotificationSink {
    db: Arc<Database>,
}

impl SurrealNotificationSink {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationSink for SurrealNotificationSink {
    async fn insert(&self, notification: Notification) -> Result<()> {
        let record = json!({
            "notification_type": notification.notification_type,
            "recipient": notification.recipient,
            "read": notification.read,
            "source_id": notification.source_id,
            "message": notification.message,
            "created_at": notification.created_at,
        });

        self.db
            .query_with_params(
                "CREATE type::thing('notification', $id) CONTENT $record",
                json!({ "id": notification.id, "record": record }),
            )
            .await?;
        Ok(())
    }
}
