use chrono::Utc;
use tracing::info;

use crate::errors::Result;
use crate::store::DocumentStore;

impl DocumentStore {
    /// Records `token` as revoked at the current UTC instant. Accepts
    /// arbitrary strings and never fails for business reasons;
    /// re-revoking just refreshes the timestamp.
    pub fn revoke_token(&self, token: &str) -> Result<()> {
        self.write(|snapshot| {
            snapshot.revoked_tokens.insert(token.to_owned(), Utc::now());
            Ok(())
        })?;

        info!("Refresh token revoked");
        Ok(())
    }

    /// True if `token` has ever been revoked. A token the store has
    /// never seen is simply not revoked, not an error.
    pub fn is_token_revoked(&self, token: &str) -> Result<bool> {
        self.read(|snapshot| Ok(snapshot.revoked_tokens.contains_key(token)))
    }
}
