//! Embedded, single-file JSON document store for a microblogging
//! backend.
//!
//! The store owns one on-disk JSON file holding the entire database
//! (posts, users, an email index, and a refresh-token revocation
//! registry) plus a reader/writer lock that makes every operation an
//! all-or-nothing unit against that file. There is no caching layer:
//! each call reads the full snapshot and each mutation rewrites it
//! atomically, which keeps the design small and is plenty for a
//! single-node deployment of moderate size.
//!
//! The HTTP layer, password hashing, and token cryptography all live in
//! the consuming service; this crate only stores what it is handed.
//!
//! ```no_run
//! use microblog_store::DocumentStore;
//!
//! # fn main() -> microblog_store::Result<()> {
//! let store = DocumentStore::open("database.json")?;
//! let user = store.create_user("a@x.com", "$2b$12$...")?;
//! let post = store.create_post("hello world", user.id)?;
//! store.delete_post(post.id, user.id)?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod models;
mod snapshot;
mod store;

pub use errors::{Result, StoreError};
pub use models::{Post, User};
pub use store::DocumentStore;
