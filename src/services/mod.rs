pub mod auth;
pub mod comment;
pub mod database;
pub mod notification;

// 重新导出常用类型
pub use auth::AuthService;
pub use comment::CommentService;
pub use database::Database;
pub use notification::NotificationService;
