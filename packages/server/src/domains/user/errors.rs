use thiserror::Error;

use super::store::StoreError;
use crate::common::OutcomeKind;
use crate::domains::auth::{AuthError, ValidationErrors};

/// Failure of an account operation, mapped once to an [`OutcomeKind`].
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("User not found")]
    NotFound,

    #[error("Phone number is already registered")]
    Conflict,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            ServiceError::Validation(_) => OutcomeKind::BadRequest,
            ServiceError::Auth(_) => OutcomeKind::Unauthorized,
            ServiceError::NotFound => OutcomeKind::NotFound,
            ServiceError::Conflict => OutcomeKind::Conflict,
            ServiceError::Internal(_) => OutcomeKind::Internal,
        }
    }

    /// Message safe to return to the caller; internal details are withheld.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound => ServiceError::NotFound,
            StoreError::Conflict { .. } => ServiceError::Conflict,
            other => ServiceError::Internal(anyhow::Error::new(other)),
        }
    }
}
