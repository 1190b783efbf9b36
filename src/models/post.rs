use serde::{Deserialize, Serialize};

/// A single published post. Immutable once created; the only lifecycle
/// event after creation is deletion by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub body: String,
    /// Id of the user who published the post. The store does not check
    /// it against the users table; referential integrity is the
    /// caller's concern.
    pub author_id: u64,
}
