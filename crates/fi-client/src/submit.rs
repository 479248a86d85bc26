use std::time::Duration;

use anyhow::{Context, Result};
use fi_core::FormFields;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::{FormSpec, SubmitUi};

pub const BUSY_LABEL: &str = "Submitting...";
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";
pub const FALLBACK_ERROR: &str = "Failed to submit form. Please try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How a submission ended, after the UI has been updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Redirected(String),
    Succeeded,
    /// Non-2xx response; `message` is what the user was shown.
    Rejected { status: u16, message: String },
    /// Transport failure or an unreadable response.
    NetworkError(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Redirected(_) | Self::Succeeded)
    }
}

/// Posts forms to a site rooted at `base_url`. No retries.
#[derive(Debug, Clone)]
pub struct FormSubmitter {
    base_url: String,
    client: reqwest::Client,
}

impl FormSubmitter {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build form http client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint_url(&self, form: &FormSpec) -> String {
        format!("{}{}", self.base_url, form.endpoint)
    }

    pub async fn submit<U>(&self, form: &FormSpec, fields: &FormFields, ui: &mut U) -> SubmitOutcome
    where
        U: SubmitUi + ?Sized,
    {
        let original_label = ui.control_label();
        ui.set_control(BUSY_LABEL, false);

        match self.post(form, fields).await {
            Ok((status, _)) if (200..300).contains(&status) => {
                tracing::info!(form = %form.id, status, "form submitted");
                match &form.redirect {
                    Some(target) => {
                        ui.navigate(target);
                        SubmitOutcome::Redirected(target.clone())
                    }
                    None => {
                        ui.alert(SUCCESS_MESSAGE);
                        ui.reset_form();
                        SubmitOutcome::Succeeded
                    }
                }
            }
            Ok((status, body)) => {
                let server_error = body
                    .get("error")
                    .and_then(Value::as_str)
                    .filter(|error| !error.is_empty())
                    .unwrap_or(FALLBACK_ERROR);
                let message = format!("Error: {server_error}");
                tracing::warn!(form = %form.id, status, error = server_error, "form rejected");
                ui.alert(&message);
                ui.set_control(&original_label, true);
                SubmitOutcome::Rejected { status, message }
            }
            Err(error) => {
                let details = format!("{error:#}");
                tracing::warn!(form = %form.id, error = %details, "form submission error");
                ui.alert(NETWORK_ERROR);
                ui.set_control(&original_label, true);
                SubmitOutcome::NetworkError(details)
            }
        }
    }

    /// POST the payload; an unparseable body counts as a transport failure.
    async fn post(&self, form: &FormSpec, fields: &FormFields) -> Result<(u16, Value)> {
        let url = self.endpoint_url(form);
        let payload = form.payload(fields);
        let body = serde_json::to_string(&payload).context("failed to serialize form fields")?;

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .with_context(|| format!("failed to read response from {url}"))?;
        let value = serde_json::from_str(&text)
            .with_context(|| format!("response from {url} is not JSON (status {status})"))?;
        Ok((status, value))
    }
}
