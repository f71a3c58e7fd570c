//! User operations - create, lookup, save, delete
//!
//! Users are independent of customers: deleting a user touches nothing else.

use crate::administration::{BankAdministration, BankResult};
use anyhow::Context;
use bankadmin_core::{Id, User};
use bankadmin_persistence::{Mapper, UserMapper};

impl BankAdministration {
    /// Create a user. No uniqueness check on `email` or `user_id`.
    pub async fn create_user(&self, name: &str, email: &str, user_id: &str) -> BankResult<User> {
        let user = self
            .users
            .insert(User::new(name, email, user_id))
            .await
            .context("Failed to insert user")?;

        tracing::info!(id = user.id, name = %user.name, "User created");
        Ok(user)
    }

    /// All users whose name matches `name`
    pub async fn get_user_by_name(&self, name: &str) -> BankResult<Vec<User>> {
        tracing::debug!(name, "Looking up users by name");
        Ok(self.users.find_by_name(name).await?)
    }

    pub async fn get_user_by_id(&self, id: Id) -> BankResult<Option<User>> {
        tracing::debug!(id, "Looking up user");
        Ok(self.users.find_by_key(id).await?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> BankResult<Option<User>> {
        tracing::debug!(email, "Looking up user by email");
        Ok(self.users.find_by_email(email).await?)
    }

    /// Lookup by the id issued by the external identity provider
    pub async fn get_user_by_google_user_id(&self, user_id: &str) -> BankResult<Option<User>> {
        tracing::debug!(user_id, "Looking up user by google user id");
        Ok(self.users.find_by_google_user_id(user_id).await?)
    }

    pub async fn get_all_users(&self) -> BankResult<Vec<User>> {
        tracing::debug!("Listing users");
        Ok(self.users.find_all().await?)
    }

    /// Write `user` back. Last write wins.
    pub async fn save_user(&self, user: &User) -> BankResult<()> {
        self.users
            .update(user)
            .await
            .with_context(|| format!("Failed to save user {}", user.id))?;
        tracing::info!(id = user.id, "User saved");
        Ok(())
    }

    /// Delete `user` only; nothing cascades.
    pub async fn delete_user(&self, user: &User) -> BankResult<()> {
        self.users
            .delete(user)
            .await
            .with_context(|| format!("Failed to delete user {}", user.id))?;
        tracing::info!(id = user.id, "User deleted");
        Ok(())
    }
}
