use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::notification::NotificationType;
use crate::models::post::Post;

/// A comment attached to a post, or a reply attached to another comment.
/// `parent_id`, `is_reply`, `author` and `community` are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub parent_id: String,
    /// True iff `parent_id` refers to a comment rather than a post. Child
    /// queries filter on this flag, so a record is only reachable through
    /// the query family it was created under.
    pub is_reply: bool,
    /// Community name denormalized from the parent at creation time.
    pub community: String,
    pub created_at: DateTime<Utc>,
    pub vote_count: i64,
    pub spoiler: bool,
    /// A locked comment accepts no further replies.
    pub locked: bool,
}

/// What fetch-one exposes to callers. The `is_reply` discriminator is
/// routing detail for child queries and stays internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub id: String,
    pub author: String,
    pub community: String,
    pub content: String,
    pub parent_id: String,
    pub created_at: DateTime<Utc>,
    pub vote_count: i64,
    pub spoiler: bool,
    pub locked: bool,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author,
            community: comment.community,
            content: comment.content,
            parent_id: comment.parent_id,
            created_at: comment.created_at,
            vote_count: comment.vote_count,
            spoiler: comment.spoiler,
            locked: comment.locked,
        }
    }
}

/// The node a new comment points at: either a post or another comment.
#[derive(Debug, Clone)]
pub enum ParentNode {
    Post(Post),
    Comment(Comment),
}

impl ParentNode {
    pub fn id(&self) -> &str {
        match self {
            ParentNode::Post(post) => &post.id,
            ParentNode::Comment(comment) => &comment.id,
        }
    }

    /// Whoever should be notified of a reply to this node.
    pub fn owning_author(&self) -> &str {
        match self {
            ParentNode::Post(post) => &post.creator_username,
            ParentNode::Comment(comment) => &comment.author,
        }
    }

    pub fn community(&self) -> &str {
        match self {
            ParentNode::Post(post) => &post.community_name,
            ParentNode::Comment(comment) => &comment.community,
        }
    }

    pub fn notification_type(&self) -> NotificationType {
        match self {
            ParentNode::Post(_) => NotificationType::Post,
            ParentNode::Comment(_) => NotificationType::Comment,
        }
    }
}

/// Body of a create request. `reply`, `spoiler` and `locked` are kept as
/// raw JSON values: clients send all sorts of things here and only the
/// literal `true` counts, anything else falls back to the default.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub reply: Value,
    #[validate(length(max = 10000, message = "Comment content is too long"))]
    pub content: Option<String>,
    #[serde(default)]
    pub spoiler: Value,
    #[serde(default)]
    pub locked: Value,
}

/// Body of an edit request. Unlike creation, a literal boolean here
/// overrides the stored flag while anything else leaves it untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(max = 10000, message = "Comment content is too long"))]
    pub content: Option<String>,
    #[serde(default)]
    pub spoiler: Value,
    #[serde(default)]
    pub locked: Value,
}

/// The only fields an edit may touch.
#[derive(Debug, Clone, Serialize)]
pub struct CommentPatch {
    pub content: String,
    pub spoiler: bool,
    pub locked: bool,
}
