// Common test utilities

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
pub mod postgres;

pub use fixtures::*;
pub use harness::*;
pub use postgres::*;
