use std::io::Write;

/// Presentation side of a submission.
///
/// The submitter drives these calls in a fixed order; implementations only
/// render them.
pub trait SubmitUi {
    /// Current label of the submit control.
    fn control_label(&self) -> String;
    fn set_control(&mut self, label: &str, enabled: bool);
    fn alert(&mut self, message: &str);
    fn navigate(&mut self, target: &str);
    fn reset_form(&mut self);
}

/// Prints alerts and navigation to stdout.
#[derive(Debug)]
pub struct TerminalUi<W: Write = std::io::Stdout> {
    label: String,
    enabled: bool,
    out: W,
}

impl TerminalUi {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_writer(label, std::io::stdout())
    }
}

impl<W: Write> TerminalUi<W> {
    pub fn with_writer(label: impl Into<String>, out: W) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            out,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(error) = writeln!(self.out, "{text}") {
            tracing::debug!(error = %error, "failed to write to terminal");
        }
    }
}

impl<W: Write> SubmitUi for TerminalUi<W> {
    fn control_label(&self) -> String {
        self.label.clone()
    }

    fn set_control(&mut self, label: &str, enabled: bool) {
        tracing::debug!(label, enabled, "submit control");
        self.label = label.to_string();
        self.enabled = enabled;
        if !enabled {
            self.line(label);
        }
    }

    fn alert(&mut self, message: &str) {
        self.line(message);
    }

    fn navigate(&mut self, target: &str) {
        self.line(&format!("Redirecting to {target}"));
    }

    fn reset_form(&mut self) {
        tracing::debug!("form reset");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Control { label: String, enabled: bool },
    Alert(String),
    Navigate(String),
    Reset,
}

/// Records every UI call, for asserting on the exact transition sequence.
#[derive(Debug, Clone)]
pub struct RecordingUi {
    label: String,
    pub events: Vec<UiEvent>,
}

impl RecordingUi {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            events: Vec::new(),
        }
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                UiEvent::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl SubmitUi for RecordingUi {
    fn control_label(&self) -> String {
        self.label.clone()
    }

    fn set_control(&mut self, label: &str, enabled: bool) {
        self.label = label.to_string();
        self.events.push(UiEvent::Control {
            label: label.to_string(),
            enabled,
        });
    }

    fn alert(&mut self, message: &str) {
        self.events.push(UiEvent::Alert(message.to_string()));
    }

    fn navigate(&mut self, target: &str) {
        self.events.push(UiEvent::Navigate(target.to_string()));
    }

    fn reset_form(&mut self) {
        self.events.push(UiEvent::Reset);
    }
}
