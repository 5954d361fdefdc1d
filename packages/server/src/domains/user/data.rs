//! User domain data types
//!
//! Simple, serializable types returned by AuthService operations.

use serde::{Deserialize, Serialize};

use super::models::User;
use crate::common::UserId;

/// Result of a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResult {
    pub id: UserId,
    pub token: String,
}

/// Public view of a user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub phone_number: String,
    pub name: String,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            phone_number: user.phone_number,
            name: user.name,
        }
    }
}
