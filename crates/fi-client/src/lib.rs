//! Client side of the forms: field serialization, the POST, and the
//! busy/error/success transitions of the submit control.

mod registry;
mod submit;
mod ui;

pub use registry::{FormRegistry, FormSpec};
pub use submit::{
    BUSY_LABEL, FALLBACK_ERROR, FormSubmitter, NETWORK_ERROR, SUCCESS_MESSAGE, SubmitOutcome,
};
pub use ui::{RecordingUi, SubmitUi, TerminalUi, UiEvent};
