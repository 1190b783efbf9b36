use tracing::info;

use crate::errors::{Result, StoreError};
use crate::models::User;
use crate::store::DocumentStore;

impl DocumentStore {
    /// Registers a new account under `email`. The password must already
    /// be hashed by the caller.
    ///
    /// Fails with `DuplicateEmail` if the address is taken, in which
    /// case nothing is written.
    pub fn create_user(&self, email: &str, hashed_password: &str) -> Result<User> {
        let user = self.write(|snapshot| {
            if snapshot.email_index.contains_key(email) {
                return Err(StoreError::DuplicateEmail);
            }

            let id = snapshot.allocate_user_id();
            let user = User {
                id,
                email: email.to_owned(),
                hashed_password: hashed_password.to_owned(),
                is_premium: false,
            };
            snapshot.users.insert(id, user.clone());
            snapshot.email_index.insert(email.to_owned(), id);
            Ok(user)
        })?;

        info!("New user registered: {}", user.email);
        Ok(user)
    }

    /// Replaces the email and password of user `id`, preserving the
    /// premium flag, and moves the email index entry to the new
    /// address.
    ///
    /// Fails with `NotFound` if the id is unknown and with
    /// `DuplicateEmail` if the new address already belongs to a
    /// different user; either way the store is left unchanged.
    pub fn update_user(&self, id: u64, email: &str, hashed_password: &str) -> Result<User> {
        let user = self.write(|snapshot| {
            let (old_email, is_premium) = {
                let current = snapshot.users.get(&id).ok_or(StoreError::NotFound)?;
                (current.email.clone(), current.is_premium)
            };

            if snapshot.email_index.get(email).is_some_and(|&owner| owner != id) {
                return Err(StoreError::DuplicateEmail);
            }

            snapshot.email_index.remove(&old_email);
            let user = User {
                id,
                email: email.to_owned(),
                hashed_password: hashed_password.to_owned(),
                is_premium,
            };
            snapshot.users.insert(id, user.clone());
            snapshot.email_index.insert(email.to_owned(), id);
            Ok(user)
        })?;

        info!("User updated: {}", user.id);
        Ok(user)
    }

    /// Marks user `id` as premium. Idempotent: upgrading an already
    /// premium account succeeds and returns true again.
    pub fn upgrade_user(&self, id: u64) -> Result<bool> {
        self.write(|snapshot| {
            let user = snapshot.users.get_mut(&id).ok_or(StoreError::NotFound)?;
            user.is_premium = true;
            Ok(true)
        })?;

        info!("User upgraded to premium: {}", id);
        Ok(true)
    }

    /// Resolves an account through the email index.
    pub fn find_user_by_email(&self, email: &str) -> Result<User> {
        self.read(|snapshot| {
            let id = snapshot.email_index.get(email).ok_or(StoreError::NotFound)?;
            snapshot.users.get(id).cloned().ok_or(StoreError::NotFound)
        })
    }
}
