//! AuthService - registration, login and profile operations.
//!
//! Each operation is a short pipeline that stops at the first failure:
//!
//! - register: validate → hash password → insert
//! - login: find by phone → verify password → record login → issue token
//! - get_profile: verify token → find by id
//! - update_profile: verify token → validate → update
//!
//! Handlers that must reject unauthenticated callers before reading the body call
//! [`AuthService::authenticate`] first and then [`AuthService::update_profile_as`].
//!
//! No retries and no partial results: a failure is mapped once to a [`ServiceError`].

use anyhow::Context;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::data::{LoginResult, Profile};
use super::errors::ServiceError;
use super::store::{StoreError, UserStore};
use crate::common::UserId;
use crate::domains::auth::{
    validate_profile_update, validate_registration, AuthError, IdentityClaim, PasswordHasher,
    TokenIssuer, TokenKeys, TokenSettings, TokenVerifier,
};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        keys: Arc<TokenKeys>,
        settings: TokenSettings,
    ) -> Self {
        let verifier = TokenVerifier::new(keys.clone(), &settings.issuer);
        let issuer = TokenIssuer::new(keys, settings);

        Self {
            store,
            hasher,
            issuer,
            verifier,
        }
    }

    /// Create an account and return its new id.
    pub async fn register(
        &self,
        phone_number: &str,
        name: &str,
        password: &str,
    ) -> Result<UserId, ServiceError> {
        validate_registration(phone_number, name, password).into_result()?;

        let password_hash = self.hash_password(password).await?;

        let id = self
            .store
            .insert_user(phone_number, name, &password_hash)
            .await?;

        info!(user_id = %id, "User registered");
        Ok(id)
    }

    /// Check credentials and issue a bearer token.
    ///
    /// An unknown phone number and a wrong password produce the same error, so the
    /// response does not reveal which phone numbers are registered.
    pub async fn login(
        &self,
        phone_number: &str,
        password: &str,
    ) -> Result<LoginResult, ServiceError> {
        let user = match self.store.find_by_phone(phone_number).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                debug!("Login rejected: unknown phone number");
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e.into()),
        };

        if !self.verify_password(password, &user.password_hash).await? {
            debug!(user_id = %user.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        self.store.record_login(&user).await?;

        let token = self.issuer.issue(user.id)?;

        info!(user_id = %user.id, "User logged in");
        Ok(LoginResult { id: user.id, token })
    }

    /// Profile of the user named by the bearer token.
    pub async fn get_profile(&self, authorization: Option<&str>) -> Result<Profile, ServiceError> {
        let claim = self.authenticate(authorization)?;

        let user = self.store.find_by_id(claim.user_id).await?;

        Ok(user.into())
    }

    /// Change phone number and name of the user named by the bearer token.
    pub async fn update_profile(
        &self,
        authorization: Option<&str>,
        phone_number: &str,
        name: &str,
    ) -> Result<Profile, ServiceError> {
        let claim = self.authenticate(authorization)?;

        self.update_profile_as(&claim, phone_number, name).await
    }

    /// Profile update for a caller already authenticated with [`Self::authenticate`].
    pub async fn update_profile_as(
        &self,
        claim: &IdentityClaim,
        phone_number: &str,
        name: &str,
    ) -> Result<Profile, ServiceError> {
        validate_profile_update(phone_number, name).into_result()?;

        let user = self
            .store
            .update(claim.user_id, phone_number, name)
            .await?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user.into())
    }

    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.store.health_check().await
    }

    /// Verify the `Authorization` header value and return the caller's identity.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<IdentityClaim, AuthError> {
        self.verifier.verify_header(authorization).map_err(|e| {
            warn!(error = %e, "Bearer token rejected");
            e
        })
    }

    // bcrypt is CPU-bound; keep it off the async worker threads.
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let hasher = self.hasher;
        let password = password.to_string();

        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .context("Password hashing task failed")??;
        Ok(hash)
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, ServiceError> {
        let hasher = self.hasher;
        let password = password.to_string();
        let hash = hash.to_string();

        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .context("Password verification task failed")??;
        Ok(matches)
    }
}
