//! Store interfaces consumed by the comment lifecycle core, plus their
//! SurrealDB implementations. The traits are the seam that lets tests
//! drive the core with in-memory fakes.

pub mod comment;
pub mod notification;
pub mod post;

pub use comment::{CommentStore, SurrealCommentStore};
pub use notification::{NotificationSink, SurrealNotificationSink};
pub use post::{PostStore, SurrealPostStore};
