use serde::{Deserialize, Serialize};

/// A registered account. The password arrives already hashed; the store
/// never sees plaintext credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub hashed_password: String,
    /// Set once the account is upgraded to the paid tier. Never unset.
    pub is_premium: bool,
}
