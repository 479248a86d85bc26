//! Shared types for the founder intake service.

pub mod error;
pub mod fields;
pub mod types;

pub use error::SubmitError;
pub use fields::FormFields;
pub use types::{FOLLOWUP_ENDPOINT, FORM_TYPE_KEY, FollowUpKind, INTAKE_ENDPOINT};
