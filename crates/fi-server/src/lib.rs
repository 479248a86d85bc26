//! HTTP surface for the intake and follow-up handlers.

mod routes;
mod serve;

pub use routes::{AppState, REQUEST_TOO_LARGE, router};
pub use serve::{FormServer, run_server};
