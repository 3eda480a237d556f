use crate::{
    error::Result,
    models::comment::{Comment, CommentPatch},
    services::Database,
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Persistence operations for comment records.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Comment>>;
    async fn insert(&self, comment: Comment) -> Result<Comment>;
    async fn update_fields(&self, id: &str, patch: CommentPatch) -> Result<()>;
    async fn delete_by_id(&self, id: &str) -> Result<()>;
    /// Deletes every comment whose `parent_id` equals the given id.
    /// Matching zero records is a normal, successful outcome.
    async fn delete_where_parent(&self, parent_id: &str) -> Result<()>;
    async fn find_children(&self, parent_id: &str, is_reply: bool) -> Result<Vec<Comment>>;
}

pub struct SurrealCommentStore {
    db: Arc<Database>,
}

impl SurrealCommentStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentStore for SurrealCommentStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Comment>> {
        let mut response = self
            .db
            .query_with_params(
                "SELECT *, meta::id(id) AS id FROM type::thing('comment', $id)",
                json!({ "id": id }),
            )
            .await?;
        let comments: Vec<Comment> = response.take(0)?;
        Ok(comments.into_iter().next())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment> {
        debug!("Inserting comment {}", comment.id);

        // Record id goes into the key position; everything else is content.
        let record = json!({
            "author": comment.author,
            "content": comment.content,
            "parent_id": comment.parent_id,
            "is_reply": comment.is_reply,
            "community": comment.community,
            "created_at": comment.created_at,
            "vote_count": comment.vote_count,
            "spoiler": comment.spoiler,
            "locked": comment.locked,
        });

        self.db
            .query_with_params(
                "CREATE type::thing('comment', $id) CONTENT $record",
                json!({ "id": comment.id, "record": record }),
            )
            .await?;

        Ok(comment)
    }

    async fn update_fields(&self, id: &str, patch: CommentPatch) -> Result<()> {
        self.db
            .query_with_params(
                "UPDATE type::thing('comment', $id) MERGE $patch",
                json!({ "id": id, "patch": patch }),
            )
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<()> {
        self.db
            .query_with_params(
                "DELETE type::thing('comment', $id)",
                json!({ "id": id }),
            )
            .await?;
        Ok(())
    }

    async fn delete_where_parent(&self, parent_id: &str) -> Result<()> {
        self.db
            .query_with_params(
                "DELETE comment WHERE parent_id = $parent_id",
                json!({ "parent_id": parent_id }),
            )
            .await?;
        Ok(())
    }

    async fn find_children(&self, parent_id: &str, is_reply: bool) -> Result<Vec<Comment>> {
        let mut response = self
            .db
            .query_with_params(
                r#"
                SELECT *, meta::id(id) AS id FROM comment
                WHERE parent_id = $parent_id AND is_reply = $is_reply
                ORDER BY created_at ASC
                "#,
                json!({ "parent_id": parent_id, "is_reply": is_reply }),
            )
            .await?;
        let comments: Vec<Comment> = response.take(0)?;
        Ok(comments)
    }
}
