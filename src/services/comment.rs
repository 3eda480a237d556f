use crate::{
    error::{AppError, Result},
    models::comment::*,
    services::NotificationService,
    stores::{CommentStore, PostStore},
    utils::validation::{flag_or_false, flag_or_stored, validate_record_id},
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// The comment lifecycle core. Every business rule for creating, editing
/// and deleting comments lives here; the stores it drives are injected so
/// tests can substitute in-memory fakes.
#[derive(Clone)]
pub struct CommentService {
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
    notifications: NotificationService,
}

impl CommentService {
    pub fn new(
        posts: Arc<dyn PostStore>,
        comments: Arc<dyn CommentStore>,
        notifications: NotificationService,
    ) -> Self {
        Self {
            posts,
            comments,
            notifications,
        }
    }

    /// Creates a comment on a post, or a reply on another comment when the
    /// request carries `reply: true`. Checks run in a fixed order and each
    /// failure short-circuits before any write: id syntax, parent
    /// existence (and lock state for comment parents), then content.
    pub async fn create_comment(
        &self,
        author: &str,
        target_id: &str,
        request: CreateCommentRequest,
    ) -> Result<Comment> {
        debug!("Creating comment on node {} by {}", target_id, author);

        validate_record_id(target_id)?;

        let is_reply = flag_or_false(&request.reply);
        let parent = self.resolve_node(target_id, is_reply).await?;

        if let ParentNode::Comment(parent_comment) = &parent {
            if parent_comment.locked {
                return Err(AppError::LockedParent);
            }
        }

        let content = required_content(&request.content)?.to_string();
        request.validate()?;

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            author: author.to_string(),
            content,
            parent_id: target_id.to_string(),
            is_reply,
            community: parent.community().to_string(),
            created_at: Utc::now(),
            vote_count: 0,
            spoiler: flag_or_false(&request.spoiler),
            locked: flag_or_false(&request.locked),
        };

        let created = self.comments.insert(comment).await?;

        // No self-notification: replying to your own post or comment stays
        // silent. The insert itself is best-effort and detached.
        if created.author != parent.owning_author() {
            self.notifications.notify_reply(&parent, &created.author);
        }

        info!(
            "Comment {} created on {} by {}",
            created.id, target_id, created.author
        );
        Ok(created)
    }

    /// Fetches a single comment for display. Callers get the public field
    /// set only; `is_reply` stays internal to child-query routing. Child
    /// listings in [`Self::get_children`] keep the full record.
    pub async fn get_comment(&self, comment_id: &str) -> Result<CommentView> {
        validate_record_id(comment_id)?;

        self.comments
            .find_by_id(comment_id)
            .await?
            .map(CommentView::from)
            .ok_or_else(|| AppError::not_found("Comment"))
    }

    /// Lists the direct children of a node: the comments of a post, or the
    /// replies of a comment. A node with zero children reports as not
    /// found rather than as an empty success; callers have always treated
    /// the two identically and the contract is kept as-is.
    pub async fn get_children(
        &self,
        node_id: &str,
        node_is_comment: bool,
    ) -> Result<Vec<Comment>> {
        validate_record_id(node_id)?;

        let node = self.resolve_node(node_id, node_is_comment).await?;
        let children = self.comments.find_children(node_id, node_is_comment).await?;

        if children.is_empty() {
            return Err(match node {
                ParentNode::Post(_) => {
                    AppError::NotFound("There are no comments for this post".to_string())
                }
                ParentNode::Comment(_) => {
                    AppError::NotFound("There are no replies for this comment".to_string())
                }
            });
        }

        Ok(children)
    }

    /// Edits a comment's content and flags. Only the author may edit, and
    /// only `content`, `spoiler` and `locked` are touched; a non-boolean
    /// flag value keeps the stored one.
    pub async fn update_comment(
        &self,
        comment_id: &str,
        user: &str,
        request: UpdateCommentRequest,
    ) -> Result<()> {
        validate_record_id(comment_id)?;

        let existing = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment"))?;

        if existing.author != user {
            return Err(AppError::forbidden("You can only edit your own comments"));
        }

        let content = required_content(&request.content)?.to_string();
        request.validate()?;

        let patch = CommentPatch {
            content,
            spoiler: flag_or_stored(&request.spoiler, existing.spoiler),
            locked: flag_or_stored(&request.locked, existing.locked),
        };

        self.comments.update_fields(comment_id, patch).await?;

        info!("Comment {} edited by {}", comment_id, user);
        Ok(())
    }

    /// Deletes a comment and its direct children. Grandchildren keep their
    /// `parent_id` chain and simply become unreachable through child
    /// queries once the root is gone. The two deletes are independent
    /// store calls with no transaction across the pair, so a reply created
    /// concurrently between them can survive as an orphan.
    pub async fn delete_comment(&self, comment_id: &str, user: &str) -> Result<()> {
        validate_record_id(comment_id)?;

        let existing = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Comment"))?;

        if existing.author != user {
            return Err(AppError::forbidden("You can only delete your own comments"));
        }

        self.comments.delete_by_id(comment_id).await?;
        self.comments.delete_where_parent(comment_id).await?;

        info!("Comment {} deleted by {}", comment_id, user);
        Ok(())
    }

    /// Placeholder until the vote subsystem lands; accepts and drops the
    /// vote without touching `vote_count`.
    pub async fn vote_comment(&self, _comment_id: &str, _user: &str) -> Result<()> {
        Ok(())
    }

    /// Placeholder; reports are not persisted yet.
    pub async fn report_comment(&self, _comment_id: &str, _user: &str) -> Result<()> {
        Ok(())
    }

    async fn resolve_node(&self, node_id: &str, is_comment: bool) -> Result<ParentNode> {
        if is_comment {
            let comment = self
                .comments
                .find_by_id(node_id)
                .await?
                .ok_or_else(|| {
                    AppError::ParentNotFound("There is no comment with this ID".to_string())
                })?;
            Ok(ParentNode::Comment(comment))
        } else {
            let post = self.posts.find_by_id(node_id).await?.ok_or_else(|| {
                AppError::ParentNotFound("There is no post with this ID".to_string())
            })?;
            Ok(ParentNode::Post(post))
        }
    }
}

fn required_content(content: &Option<String>) -> Result<&str> {
    match content {
        None => Err(AppError::MissingContent),
        Some(text) if text.is_empty() => Err(AppError::EmptyContent),
        Some(text) => Ok(text),
    }
}
