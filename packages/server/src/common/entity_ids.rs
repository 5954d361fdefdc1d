//! Typed ID definitions for domain entities.
//!
//! User ids are assigned by the database (`SERIAL`), so unlike random UUIDs they are
//! plain integers. Wrapping them keeps a user id from being confused with any other
//! integer that flows through a request.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

/// Store-assigned identifier of a user account.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw database id.
    #[inline]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The raw database id.
    #[inline]
    pub const fn into_inner(self) -> i32 {
        self.0
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>().map(Self)
    }
}
