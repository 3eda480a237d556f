pub mod comment;
pub mod notification;
pub mod post;
