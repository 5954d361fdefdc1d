//! Auth domain - credential rules, password hashing and bearer tokens
//!
//! Responsibilities:
//! - Field validation for registration and profile updates
//! - bcrypt password hashing/verification
//! - RS256 token issuance and verification
//!
//! Everything here is pure or reads only immutable key material, so one instance of
//! each component is shared by all requests.

pub mod errors;
pub mod jwt;
pub mod keys;
pub mod password;
pub mod validation;

pub use errors::{AuthError, KeyError};
pub use jwt::{strip_bearer, Claims, IdentityClaim, TokenIssuer, TokenSettings, TokenVerifier};
pub use keys::TokenKeys;
pub use password::PasswordHasher;
pub use validation::{validate_profile_update, validate_registration, ValidationErrors};
