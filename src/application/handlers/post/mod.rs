//! Post command/query handlers.

mod add_comment;
mod create_post;
mod list_posts;
mod toggle_like;

pub use add_comment::{AddCommentCommand, AddCommentHandler};
pub use create_post::{CreatePostCommand, CreatePostHandler};
pub use list_posts::{ListPostsHandler, ListPostsQuery};
pub use toggle_like::{ToggleLikeCommand, ToggleLikeHandler, ToggleLikeResult};
