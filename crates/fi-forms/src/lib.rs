//! Submission handling: intake upsert and follow-up placement.

mod blocks;
mod context;
mod followup;
mod intake;
mod placement;
pub mod questions;
pub mod schema;

pub use blocks::build_response_blocks;
pub use context::FormsContext;
pub use followup::{FollowUpReceipt, handle_followup};
pub use intake::{IntakeReceipt, build_intake_properties, handle_intake};
pub use placement::{FOLLOW_UP_HEADING, SessionPlacement, ensure_update_subsection, place_section};
