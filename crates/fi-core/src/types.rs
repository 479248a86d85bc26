use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Path of the intake submission endpoint.
pub const INTAKE_ENDPOINT: &str = "/.netlify/functions/submit-intake";
/// Path of the follow-up submission endpoint.
pub const FOLLOWUP_ENDPOINT: &str = "/.netlify/functions/submit-followup";
/// Form field carrying the follow-up kind.
pub const FORM_TYPE_KEY: &str = "formType";

/// Which follow-up survey a submission belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum FollowUpKind {
    #[value(name = "24h")]
    #[serde(rename = "24h")]
    Day,
    #[value(name = "7d")]
    #[serde(rename = "7d")]
    Week,
}

impl FollowUpKind {
    /// Parse the wire value (`24h` / `7d`). Matching is exact.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "24h" => Some(Self::Day),
            "7d" => Some(Self::Week),
            _ => None,
        }
    }

    /// Returns the wire value for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::Week => "7d",
        }
    }

    /// Text of the level-3 heading that groups responses of this kind.
    pub fn heading_label(&self) -> &'static str {
        match self {
            Self::Day => "24-hour update",
            Self::Week => "7-day update",
        }
    }

    /// Human-facing name used in confirmation messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Day => "24-hour",
            Self::Week => "7-day",
        }
    }
}

impl std::fmt::Display for FollowUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
