use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::errors::AuthError;
use super::keys::TokenKeys;
use crate::common::UserId;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (user id as string)
    pub iat: i64,    // Issued at timestamp
    pub exp: i64,    // Expiration timestamp
    pub iss: String, // Issuer
    pub jti: String, // JWT ID (unique token identifier)
}

/// Identity recovered from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaim {
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    pub token_id: String,
}

/// Issuer name and lifetime stamped into every token.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub issuer: String,
    pub ttl: Duration,
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            issuer: "user-service".to_string(),
            ttl: Duration::hours(24),
        }
    }
}

/// Creates signed bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<TokenKeys>,
    settings: TokenSettings,
}

impl TokenIssuer {
    pub fn new(keys: Arc<TokenKeys>, settings: TokenSettings) -> Self {
        Self { keys, settings }
    }

    /// Issue a token whose subject is `user_id`.
    ///
    /// Signing failures are returned as errors; an unsigned token is never produced.
    pub fn issue(&self, user_id: UserId) -> Result<String> {
        let now = Utc::now();
        let exp = now + self.settings.ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.settings.issuer.clone(),
            jti: Uuid::new_v4().to_string(), // Unique token ID
        };

        encode(
            &Header::new(self.keys.algorithm()),
            &claims,
            self.keys.signing_key(),
        )
        .context("Failed to sign token")
    }
}

/// Validates bearer tokens against the configured public key.
#[derive(Clone)]
pub struct TokenVerifier {
    keys: Arc<TokenKeys>,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(keys: Arc<TokenKeys>, issuer: &str) -> Self {
        // Validation::new pins the accepted algorithms to exactly this one, so tokens
        // signed with HS256 (or any other alg) are rejected before signature checks.
        let mut validation = Validation::new(keys.algorithm());
        validation.set_issuer(&[issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self { keys, validation }
    }

    /// Verify a token, with or without a leading `Bearer ` scheme, and recover the
    /// identity it carries.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, AuthError> {
        let token = strip_bearer(token);
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = decode::<Claims>(token, self.keys.verification_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)?;

        let user_id = parse_subject(&claims.sub)?;
        let issued_at = Utc
            .timestamp_opt(claims.iat, 0)
            .single()
            .ok_or(AuthError::MalformedClaims)?;

        Ok(IdentityClaim {
            user_id,
            issued_at,
            token_id: claims.jti,
        })
    }

    /// Verify the raw value of an `Authorization` header, if one was sent.
    pub fn verify_header(&self, authorization: Option<&str>) -> Result<IdentityClaim, AuthError> {
        match authorization {
            Some(value) => self.verify(value),
            None => Err(AuthError::MissingToken),
        }
    }
}

/// Remove an optional `Bearer` scheme (any case) and surrounding whitespace.
pub fn strip_bearer(value: &str) -> &str {
    let value = value.trim();
    match value.get(..6) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer") => {
            let rest = &value[6..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest.trim_start()
            } else {
                value
            }
        }
        _ => value,
    }
}

fn parse_subject(sub: &str) -> Result<UserId, AuthError> {
    match sub.parse::<i32>() {
        Ok(id) if id >= 0 && !sub.starts_with('+') => Ok(UserId::new(id)),
        _ => Err(AuthError::InvalidSubject),
    }
}
