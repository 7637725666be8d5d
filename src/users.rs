//! CRUD operations for [`User`] records.

use chrono::Utc;

use crate::database::USERS_KEY;
use crate::error::{Result, StoreError};
use crate::models::{NewUser, User, UserPatch};
use crate::store::Store;

impl Store {
    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// List all users, in creation order.
    pub fn users(&self) -> Result<Vec<User>> {
        self.db.read_collection(USERS_KEY)
    }

    /// Fetch a single user by id.
    pub fn user(&self, id: &str) -> Result<Option<User>> {
        Ok(self.users()?.into_iter().find(|u| u.id == id))
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Register a new user.
    ///
    /// Fails with [`StoreError::DuplicateEmail`] when another user already
    /// owns the email, compared case-insensitively.
    pub fn add_user(&self, new: NewUser) -> Result<User> {
        let mut users = self.users()?;

        let email_lower = new.email.to_lowercase();
        if users.iter().any(|u| u.email.to_lowercase() == email_lower) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: self.next_id(),
            name: new.name,
            email: new.email,
            password: new.password,
            role: new.role,
            created_at: Utc::now(),
        };

        tracing::debug!(id = %user.id, role = ?user.role, "adding user");

        users.push(user.clone());
        self.db.write_slot(USERS_KEY, &users)?;
        self.notify();
        Ok(user)
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    /// Merge `patch` into the user with the given id.
    ///
    /// Silently a no-op (no write, no notification) when the id is unknown.
    pub fn update_user(&self, id: &str, patch: UserPatch) -> Result<()> {
        let mut users = self.users()?;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(());
        };

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(password) = patch.password {
            user.password = password;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }

        self.db.write_slot(USERS_KEY, &users)?;
        self.notify();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete the user with the given id. Silently a no-op when absent.
    pub fn delete_user(&self, id: &str) -> Result<()> {
        let mut users = self.users()?;
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Ok(());
        }

        tracing::debug!(id, "deleting user");

        self.db.write_slot(USERS_KEY, &users)?;
        self.notify();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn open_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_at(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn customer(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
            role: Role::Customer,
        }
    }

    #[test]
    fn add_user_assigns_id_and_persists() {
        let (_dir, store) = open_store();

        let user = store.add_user(customer("Ana", "ana@app.com")).unwrap();
        assert!(!user.id.is_empty());

        let users = store.users().unwrap();
        assert_eq!(users, vec![user]);
    }

    #[test]
    fn duplicate_email_is_rejected_case_insensitively() {
        let (_dir, store) = open_store();

        store.add_user(customer("Ana", "ana@app.com")).unwrap();
        let err = store
            .add_user(customer("Impostor", "ANA@App.Com"))
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.users().unwrap().len(), 1);
    }

    #[test]
    fn update_merges_only_given_fields() {
        let (_dir, store) = open_store();
        let user = store.add_user(customer("Ana", "ana@app.com")).unwrap();

        store
            .update_user(
                &user.id,
                UserPatch {
                    name: Some("Ana María".to_string()),
                    role: Some(Role::Admin),
                    ..UserPatch::default()
                },
            )
            .unwrap();

        let updated = store.user(&user.id).unwrap().unwrap();
        assert_eq!(updated.name, "Ana María");
        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.email, "ana@app.com");
        assert_eq!(updated.password, "secret");
    }

    #[test]
    fn update_and_delete_ignore_unknown_ids() {
        let (_dir, store) = open_store();
        store.add_user(customer("Ana", "ana@app.com")).unwrap();

        store
            .update_user("missing", UserPatch { name: Some("x".into()), ..UserPatch::default() })
            .unwrap();
        store.delete_user("missing").unwrap();

        assert_eq!(store.users().unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_the_record() {
        let (_dir, store) = open_store();
        let user = store.add_user(customer("Ana", "ana@app.com")).unwrap();

        store.delete_user(&user.id).unwrap();
        assert!(store.users().unwrap().is_empty());
        assert!(store.user(&user.id).unwrap().is_none());
    }
}
