use serde_json::{Value, json};

/// Outcome of a rejected or failed submission, mapped 1:1 onto an HTTP status.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{context}: {details}")]
    Upstream {
        context: &'static str,
        details: String,
    },
}

impl SubmitError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Wrap an internal failure under a caller-facing headline.
    pub fn upstream(context: &'static str, details: impl Into<String>) -> Self {
        Self::Upstream {
            context,
            details: details.into(),
        }
    }

    /// HTTP status code reported to the caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MethodNotAllowed => 405,
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Upstream { .. } => 500,
        }
    }

    /// JSON response body. `expose_details = false` hides upstream error text.
    pub fn body(&self, expose_details: bool) -> Value {
        match self {
            Self::MethodNotAllowed | Self::Validation(_) | Self::NotFound(_) => {
                json!({ "error": self.to_string() })
            }
            Self::Upstream { context, details } => {
                let details = if expose_details {
                    details.as_str()
                } else {
                    "internal error"
                };
                json!({ "error": context, "details": details })
            }
        }
    }
}
