// Common types shared across the application

pub mod entity_ids;
pub mod outcome;

pub use entity_ids::UserId;
pub use outcome::OutcomeKind;
