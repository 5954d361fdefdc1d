//! User domain - accounts, login and profiles
//!
//! `AuthService` orchestrates the auth components against a `UserStore`.

pub mod data;
pub mod errors;
pub mod models;
pub mod service;
pub mod store;

pub use data::{LoginResult, Profile};
pub use errors::ServiceError;
pub use models::User;
pub use service::AuthService;
pub use store::{PostgresUserStore, StoreError, UserStore};
