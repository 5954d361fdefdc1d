// TestDependencies - mock implementations for testing
//
// Provides an in-memory UserStore that can be injected into AuthService for tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::common::UserId;
use crate::domains::user::{StoreError, User, UserStore};

/// Name reported for phone-number uniqueness violations, matching the Postgres schema.
pub const PHONE_NUMBER_CONSTRAINT: &str = "users_phone_number_key";

// =============================================================================
// Mock User Store
// =============================================================================

#[derive(Default)]
struct MockUserStoreState {
    next_id: i32,
    users: BTreeMap<UserId, User>,
    logins: Vec<User>,
    unavailable: bool,
}

/// In-memory `UserStore` enforcing phone-number uniqueness.
#[derive(Clone, Default)]
pub struct MockUserStore {
    state: Arc<Mutex<MockUserStoreState>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Remove a user directly (no API deletes users)
    pub fn delete_user(&self, id: UserId) -> Option<User> {
        self.lock().users.remove(&id)
    }

    /// Get a stored user
    pub fn user(&self, id: UserId) -> Option<User> {
        self.lock().users.get(&id).cloned()
    }

    /// Get every recorded login, oldest first
    pub fn logins(&self) -> Vec<User> {
        self.lock().logins.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockUserStoreState> {
        self.state.lock().expect("mock user store lock poisoned")
    }
}

impl MockUserStoreState {
    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            Err(StoreError::Unavailable("mock store unavailable".to_string()))
        } else {
            Ok(())
        }
    }

    fn phone_taken(&self, phone_number: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.phone_number == phone_number && Some(u.id) != except)
    }
}

fn conflict() -> StoreError {
    StoreError::Conflict {
        constraint: PHONE_NUMBER_CONSTRAINT.to_string(),
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn insert_user(
        &self,
        phone_number: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<UserId, StoreError> {
        let mut state = self.lock();
        state.check_available()?;
        if state.phone_taken(phone_number, None) {
            return Err(conflict());
        }

        state.next_id += 1;
        let id = UserId::new(state.next_id);
        state.users.insert(
            id,
            User {
                id,
                phone_number: phone_number.to_string(),
                name: name.to_string(),
                password_hash: password_hash.to_string(),
            },
        );
        Ok(id)
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<User, StoreError> {
        let state = self.lock();
        state.check_available()?;
        state
            .users
            .values()
            .find(|u| u.phone_number == phone_number)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        let state = self.lock();
        state.check_available()?;
        state.users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update(
        &self,
        id: UserId,
        phone_number: &str,
        name: &str,
    ) -> Result<User, StoreError> {
        let mut state = self.lock();
        state.check_available()?;
        if state.phone_taken(phone_number, Some(id)) {
            return Err(conflict());
        }

        let user = state.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.phone_number = phone_number.to_string();
        user.name = name.to_string();
        Ok(user.clone())
    }

    async fn record_login(&self, user: &User) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.check_available()?;
        state.logins.push(user.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.lock().check_available()
    }
}
