// User Service - API Core
//
// Account registration, login and profile management over HTTP, backed by
// PostgreSQL stored functions. Authentication uses bcrypt password hashes and
// RS256-signed bearer tokens.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
