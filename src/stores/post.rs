use crate::{error::Result, models::post::Post, services::Database};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

/// Read-only access to posts. Posts are owned by the community service;
/// this subsystem only resolves them as reply targets.
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>>;
}

pub struct SurrealPostStore {
    db: Arc<Database>,
}

impl SurrealPostStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for SurrealPostStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>> {
        let mut response = self
            .db
            .query_with_params(
                "SELECT *, meta::id(id) AS id FROM type::thing('post', $id)",
                json!({ "id": id }),
            )
            .await?;
        let posts: Vec<Post> = response.take(0)?;
        Ok(posts.into_iter().next())
    }
}
