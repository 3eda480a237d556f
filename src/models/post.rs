use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 帖子视图。帖子由社区服务管理，本服务只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub creator_username: String,
    pub community_name: String,
    pub created_at: DateTime<Utc>,
}
