//! Test fixtures: key material and canned accounts.

use std::sync::Arc;
use user_service::common::UserId;
use user_service::domains::auth::{TokenKeys, TokenSettings};
use user_service::domains::user::AuthService;

pub const PRIVATE_PEM: &str = include_str!("../fixtures/token_private.pem");
pub const PUBLIC_PEM: &str = include_str!("../fixtures/token_public.pem");
pub const OTHER_PRIVATE_PEM: &str = include_str!("../fixtures/other_private.pem");
pub const OTHER_PUBLIC_PEM: &str = include_str!("../fixtures/other_public.pem");

pub const ALICE_PHONE: &str = "+628123456789";
pub const ALICE_NAME: &str = "Alice";
pub const ALICE_PASSWORD: &str = "secret1";

pub const BOB_PHONE: &str = "+628987654321";
pub const BOB_NAME: &str = "Bob";
pub const BOB_PASSWORD: &str = "hunter22";

/// The key pair the service under test signs and verifies with
pub fn token_keys() -> Arc<TokenKeys> {
    Arc::new(
        TokenKeys::from_rsa_pem(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes())
            .expect("fixture keys must parse"),
    )
}

/// A second, unrelated key pair
pub fn other_token_keys() -> Arc<TokenKeys> {
    Arc::new(
        TokenKeys::from_rsa_pem(OTHER_PRIVATE_PEM.as_bytes(), OTHER_PUBLIC_PEM.as_bytes())
            .expect("fixture keys must parse"),
    )
}

pub fn token_settings() -> TokenSettings {
    TokenSettings {
        issuer: "test_issuer".to_string(),
        ..TokenSettings::default()
    }
}

/// Register Alice and return her id
pub async fn register_alice(service: &AuthService) -> UserId {
    service
        .register(ALICE_PHONE, ALICE_NAME, ALICE_PASSWORD)
        .await
        .expect("Failed to register Alice")
}

/// Register Bob and return his id
pub async fn register_bob(service: &AuthService) -> UserId {
    service
        .register(BOB_PHONE, BOB_NAME, BOB_PASSWORD)
        .await
        .expect("Failed to register Bob")
}

/// Register Alice and log her in, returning her id and bearer token
pub async fn logged_in_alice(service: &AuthService) -> (UserId, String) {
    let id = register_alice(service).await;
    let login = service
        .login(ALICE_PHONE, ALICE_PASSWORD)
        .await
        .expect("Failed to log Alice in");
    (id, login.token)
}
