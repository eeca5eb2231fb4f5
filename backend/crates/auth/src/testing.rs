//! In-memory repositories for tests
//!
//! Enforces the same uniqueness rules as the database schema, so
//! conflict paths behave like production.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use kernel::id::UserId;

use crate::domain::entity::{
    user::{NewUser, User},
    user_settings::UserSettings,
};
use crate::domain::repository::{UserRepository, UserSettingsRepository};
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Store {
    users: Vec<User>,
    settings: HashMap<UserId, UserSettings>,
    next_id: i64,
}

/// Shared in-memory user store; clones see the same data
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    inner: Arc<Mutex<Store>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> MutexGuard<'_, Store> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a user directly, bypassing registration rules
    pub fn insert_user(&self, name: &str, password: &str, is_admin: bool) -> User {
        let raw = RawPassword::for_verification(password.to_string());
        let password = UserPassword::from_raw(&raw, None).unwrap_or_else(|e| panic!("{e}"));
        let user_name = UserName::from_db(name);
        let email = Email::from_db(format!("{}@example.com", user_name.canonical()));

        let mut store = self.store();
        store.next_id += 1;
        let user = User {
            user_id: UserId::new(store.next_id),
            user_name,
            email,
            password,
            full_name: None,
            bio: None,
            website: None,
            twitter: None,
            linkedin: None,
            is_active: true,
            is_admin,
            created_at: Utc::now(),
            updated_at: None,
        };
        store.users.push(user.clone());
        user
    }

    pub fn user(&self, user_id: UserId) -> Option<User> {
        self.store()
            .users
            .iter()
            .find(|u| u.user_id == user_id)
            .cloned()
    }

    pub fn settings_count(&self) -> usize {
        self.store().settings.len()
    }
}

fn conflict(store: &Store, name: &UserName, email: &Email, except: Option<UserId>) -> Option<AuthError> {
    let others = || store.users.iter().filter(move |u| Some(u.user_id) != except);
    if others().any(|u| u.user_name.canonical() == name.canonical()) {
        return Some(AuthError::UserNameTaken);
    }
    if others().any(|u| u.email == *email) {
        return Some(AuthError::EmailTaken);
    }
    None
}

impl UserRepository for InMemoryUserStore {
    async fn create_user(&self, user: &NewUser) -> AuthResult<User> {
        let mut store = self.store();
        if let Some(err) = conflict(&store, &user.user_name, &user.email, None) {
            return Err(err);
        }

        store.next_id += 1;
        let created = User {
            user_id: UserId::new(store.next_id),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            full_name: user.full_name.clone(),
            bio: None,
            website: None,
            twitter: None,
            linkedin: None,
            is_active: true,
            is_admin: false,
            created_at: Utc::now(),
            updated_at: None,
        };
        store.users.push(created.clone());
        Ok(created)
    }

    async fn find_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.user(user_id))
    }

    async fn find_user_by_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .store()
            .users
            .iter()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .store()
            .users
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn user_name_taken(
        &self,
        user_name: &UserName,
        except: Option<UserId>,
    ) -> AuthResult<bool> {
        Ok(self
            .store()
            .users
            .iter()
            .any(|u| Some(u.user_id) != except && u.user_name.canonical() == user_name.canonical()))
    }

    async fn email_taken(&self, email: &Email, except: Option<UserId>) -> AuthResult<bool> {
        Ok(self
            .store()
            .users
            .iter()
            .any(|u| Some(u.user_id) != except && u.email == *email))
    }

    async fn update_user(&self, user: &User) -> AuthResult<User> {
        let mut store = self.store();
        if let Some(err) = conflict(&store, &user.user_name, &user.email, Some(user.user_id)) {
            return Err(err);
        }

        let slot = store
            .users
            .iter_mut()
            .find(|u| u.user_id == user.user_id)
            .ok_or(AuthError::UserNotFound)?;
        let is_active = slot.is_active;
        *slot = User {
            is_active,
            ..user.clone()
        };
        Ok(slot.clone())
    }

    async fn deactivate_user(&self, user_id: UserId) -> AuthResult<()> {
        let mut store = self.store();
        let slot = store
            .users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .ok_or(AuthError::UserNotFound)?;
        slot.is_active = false;
        slot.updated_at = Some(Utc::now());
        Ok(())
    }
}

impl UserSettingsRepository for InMemoryUserStore {
    async fn find_or_create_settings(&self, user_id: UserId) -> AuthResult<UserSettings> {
        Ok(self
            .store()
            .settings
            .entry(user_id)
            .or_insert_with(|| UserSettings::defaults(user_id))
            .clone())
    }

    async fn update_settings(&self, settings: &UserSettings) -> AuthResult<UserSettings> {
        let mut store = self.store();
        if !store.settings.contains_key(&settings.user_id) {
            return Err(AuthError::UserNotFound);
        }
        store.settings.insert(settings.user_id, settings.clone());
        Ok(settings.clone())
    }
}
