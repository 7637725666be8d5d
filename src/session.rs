//! Current-session management and role checks.
//!
//! At most one user is persisted as the current session. It is set on login
//! (or right after registration by the profile screen), cleared on logout,
//! and carries no expiry or token.

use crate::database::CURRENT_USER_KEY;
use crate::error::Result;
use crate::models::{Role, User};
use crate::store::Store;

impl Store {
    /// The currently authenticated user, if any.
    pub fn current_user(&self) -> Result<Option<User>> {
        self.db.read_slot(CURRENT_USER_KEY)
    }

    /// Persist `user` as the current session.
    pub fn set_current_user(&self, user: &User) -> Result<()> {
        self.db.write_slot(CURRENT_USER_KEY, user)?;
        self.notify();
        Ok(())
    }

    /// Authenticate with a case-insensitive email lookup and an exact
    /// password compare.
    ///
    /// On success the session slot is set and the user returned; bad
    /// credentials yield `Ok(None)`. There is no lockout or rate limiting.
    pub fn login(&self, email: &str, password: &str) -> Result<Option<User>> {
        let email_lower = email.to_lowercase();
        let user = self
            .users()?
            .into_iter()
            .find(|u| u.email.to_lowercase() == email_lower);

        match user {
            Some(user) if user.password == password => {
                tracing::info!(id = %user.id, "login");
                self.db.write_slot(CURRENT_USER_KEY, &user)?;
                self.notify();
                Ok(Some(user))
            }
            _ => Ok(None),
        }
    }

    /// Clear the current session.
    pub fn logout(&self) -> Result<()> {
        tracing::info!("logout");
        self.db.delete_slot(CURRENT_USER_KEY)?;
        self.notify();
        Ok(())
    }

    /// Whether the current session belongs to an admin.
    pub fn check_admin_permission(&self) -> Result<bool> {
        Ok(matches!(
            self.current_user()?,
            Some(User { role: Role::Admin, .. })
        ))
    }

    /// Whether the current session belongs to a customer.
    pub fn check_customer_permission(&self) -> Result<bool> {
        Ok(matches!(
            self.current_user()?,
            Some(User { role: Role::Customer, .. })
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;

    fn open_store() -> (tempfile::TempDir, Store) {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_at(&dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn seed_admin(store: &Store) -> User {
        store
            .add_user(NewUser {
                name: "Administrador".to_string(),
                email: "admin@app.com".to_string(),
                password: "admin123".to_string(),
                role: Role::Admin,
            })
            .unwrap()
    }

    #[test]
    fn login_is_case_insensitive_on_email() {
        let (_dir, store) = open_store();
        let admin = seed_admin(&store);

        let logged_in = store.login("Admin@App.Com", "admin123").unwrap().unwrap();
        assert_eq!(logged_in, admin);
        assert_eq!(store.current_user().unwrap(), Some(admin));
    }

    #[test]
    fn wrong_password_leaves_the_session_untouched() {
        let (_dir, store) = open_store();
        seed_admin(&store);

        assert!(store.login("admin@app.com", "admin124").unwrap().is_none());
        assert!(store.login("nobody@app.com", "admin123").unwrap().is_none());
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn logout_clears_the_session() {
        let (_dir, store) = open_store();
        seed_admin(&store);

        store.login("admin@app.com", "admin123").unwrap();
        store.logout().unwrap();
        assert!(store.current_user().unwrap().is_none());
    }

    #[test]
    fn permission_checks_follow_the_session_role() {
        let (_dir, store) = open_store();
        seed_admin(&store);
        let customer = store
            .add_user(NewUser {
                name: "Cliente".to_string(),
                email: "cliente@app.com".to_string(),
                password: "cliente123".to_string(),
                role: Role::Customer,
            })
            .unwrap();

        assert!(!store.check_admin_permission().unwrap());
        assert!(!store.check_customer_permission().unwrap());

        store.login("admin@app.com", "admin123").unwrap();
        assert!(store.check_admin_permission().unwrap());
        assert!(!store.check_customer_permission().unwrap());

        store.set_current_user(&customer).unwrap();
        assert!(store.check_customer_permission().unwrap());
        assert!(!store.check_admin_permission().unwrap());
    }
}
