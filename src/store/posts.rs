use tracing::info;

use crate::errors::{Result, StoreError};
use crate::models::Post;
use crate::store::DocumentStore;

impl DocumentStore {
    /// Publishes a post. `author_id` is recorded as given; the store
    /// does not check it against the users table.
    pub fn create_post(&self, body: &str, author_id: u64) -> Result<Post> {
        let post = self.write(|snapshot| {
            let id = snapshot.allocate_post_id();
            let post = Post {
                id,
                body: body.to_owned(),
                author_id,
            };
            snapshot.posts.insert(id, post.clone());
            Ok(post)
        })?;

        info!("Post created: {} by user {}", post.id, post.author_id);
        Ok(post)
    }

    /// Returns every post, or only those by one author when the filter
    /// is set. `None` and `Some(0)` both mean "no filter". The order of
    /// the returned posts is unspecified; callers sort.
    pub fn list_posts(&self, author_filter: Option<u64>) -> Result<Vec<Post>> {
        self.read(|snapshot| {
            let posts = snapshot
                .posts
                .values()
                .filter(|post| match author_filter {
                    Some(author) if author != 0 => post.author_id == author,
                    _ => true,
                })
                .cloned()
                .collect();
            Ok(posts)
        })
    }

    pub fn get_post(&self, id: u64) -> Result<Post> {
        self.read(|snapshot| snapshot.posts.get(&id).cloned().ok_or(StoreError::NotFound))
    }

    /// Deletes post `id` on behalf of `requester_id`.
    ///
    /// The ownership check runs inside the same exclusive-lock cycle as
    /// the removal, so "does this post still belong to this requester"
    /// cannot race with another delete. Fails with `NotFound` if the
    /// post is gone and `Forbidden` if the requester is not the author;
    /// the post stays put in the latter case.
    pub fn delete_post(&self, id: u64, requester_id: u64) -> Result<bool> {
        self.write(|snapshot| {
            let post = snapshot.posts.get(&id).ok_or(StoreError::NotFound)?;
            if post.author_id != requester_id {
                return Err(StoreError::Forbidden);
            }
            snapshot.posts.remove(&id);
            Ok(true)
        })?;

        info!("Post deleted: {} by user {}", id, requester_id);
        Ok(true)
    }
}
