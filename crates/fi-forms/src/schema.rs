//! Property names of the founders database.

pub const NAME: &str = "Name";
pub const EMAIL: &str = "Email";
pub const STARTUP_NAME: &str = "Startup Name";
pub const ROLE: &str = "Role";
pub const INTAKE_TIMESTAMP: &str = "Intake Timestamp";
pub const INTAKE_SOURCE: &str = "Intake Source";
/// Relation to session pages, oldest first.
pub const SESSIONS: &str = "Sessions";

pub const INTAKE_SOURCE_WEBSITE: &str = "Website";
pub const UNKNOWN_NAME: &str = "Unknown";

/// Intake answers: (form field, database property).
pub const INTAKE_ANSWERS: [(&str, &str); 6] = [
    ("q1", "Q1 - What feels normal"),
    ("q2", "Q2 - What does field reward"),
    ("q3", "Q3 - How field holds during hard times"),
    ("q4", "Q4 - Quality of decisions"),
    ("q5", "Q5 - Cost of staying"),
    ("q6", "Q6 - Desired field"),
];
