mod post;
mod user;

pub use post::Post;
pub use user::User;
