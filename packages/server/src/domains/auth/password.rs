// Password hashing and verification

use anyhow::{bail, Context, Result};

/// Lowest cost bcrypt accepts.
///
/// This is the default work factor: logins stay fast, at the price of weaker
/// brute-force resistance for a leaked hash. Raise it with `BCRYPT_COST`.
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Salted one-way password hashing (bcrypt).
///
/// Holds only the configured cost, so it is `Copy` and safe to share across requests.
/// Never log the inputs or outputs of this type.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: MIN_COST }
    }
}

impl PasswordHasher {
    /// Create a hasher with the given bcrypt cost.
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            bail!("bcrypt cost must be between {} and {}, got {}", MIN_COST, MAX_COST, cost);
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a raw password with a fresh random salt.
    pub fn hash(&self, raw_password: &str) -> Result<String> {
        bcrypt::hash(raw_password, self.cost).context("Failed to hash password")
    }

    /// Check a raw password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch. Errors only when the stored hash is malformed.
    pub fn verify(&self, raw_password: &str, hashed_password: &str) -> Result<bool> {
        bcrypt::verify(raw_password, hashed_password).context("Stored password hash is malformed")
    }
}
