use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Post, User};

// ============================================================================
// SNAPSHOT - The complete persisted state, one value per operation
// ============================================================================
/// Everything the backing file holds, deserialized in one piece. A
/// `Snapshot` lives for exactly one store operation: writes load it under
/// the exclusive lock, mutate it, and persist it back; reads load it and
/// copy the records they return. Nothing caches it across operations.
///
/// The maps are keyed by synthetic id (serialized as stringified
/// integers) or by raw string for the two index maps. Iteration order is
/// meaningless and does not survive a reload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Snapshot {
    pub posts: HashMap<u64, Post>,
    pub users: HashMap<u64, User>,
    /// Secondary index: email -> user id. Kept in lockstep with `users`
    /// by every mutation; emails are case-sensitive and unique.
    #[serde(rename = "emailIDUserMap")]
    pub email_index: HashMap<String, u64>,
    /// Revocation registry: token -> instant it was revoked. Entries are
    /// never removed.
    #[serde(rename = "revokedRefreshTokens")]
    pub revoked_tokens: HashMap<String, DateTime<Utc>>,
    /// Next id to hand out for a post. Zero only in files written before
    /// the counters existed; `restore_counters` repairs that on load.
    #[serde(default, rename = "nextPostId")]
    pub next_post_id: u64,
    #[serde(default, rename = "nextUserId")]
    pub next_user_id: u64,
}

impl Snapshot {
    /// Empty snapshot for a freshly created database file.
    pub fn new() -> Self {
        Snapshot {
            next_post_id: 1,
            next_user_id: 1,
            ..Snapshot::default()
        }
    }

    /// Rebuilds missing next-id counters from the high-water mark of the
    /// ids already on disk. Files written by older versions carry no
    /// counters and deserialize them as zero, which is never a valid id.
    pub fn restore_counters(&mut self) {
        if self.next_post_id == 0 {
            self.next_post_id = Self::high_water(&self.posts);
        }
        if self.next_user_id == 0 {
            self.next_user_id = Self::high_water(&self.users);
        }
    }

    fn high_water<V>(records: &HashMap<u64, V>) -> u64 {
        records.keys().max().map_or(1, |max| max + 1)
    }

    /// Hands out a post id. Must only be called under the exclusive
    /// lock, in the same cycle that persists the insert.
    pub fn allocate_post_id(&mut self) -> u64 {
        let id = self.next_post_id;
        self.next_post_id += 1;
        id
    }

    pub fn allocate_user_id(&mut self) -> u64 {
        let id = self.next_user_id;
        self.next_user_id += 1;
        id
    }
}
