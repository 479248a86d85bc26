use fi_core::{FOLLOWUP_ENDPOINT, FORM_TYPE_KEY, FollowUpKind, FormFields, INTAKE_ENDPOINT};

/// One form wired to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSpec {
    pub id: String,
    pub endpoint: &'static str,
    /// Injected as `formType` on submit.
    pub kind: Option<FollowUpKind>,
    /// Where to go after a successful submit; `None` shows a message instead.
    pub redirect: Option<String>,
}

impl FormSpec {
    pub fn new(id: impl Into<String>, endpoint: &'static str, kind: Option<FollowUpKind>) -> Self {
        Self {
            id: id.into(),
            endpoint,
            kind,
            redirect: None,
        }
    }

    pub fn with_redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    /// Fields as sent on the wire.
    pub fn payload(&self, fields: &FormFields) -> FormFields {
        let mut payload = fields.clone();
        if let Some(kind) = self.kind {
            payload.insert(FORM_TYPE_KEY, kind.as_str());
        }
        payload
    }
}

#[derive(Debug, Clone)]
pub struct FormRegistry {
    forms: Vec<FormSpec>,
}

impl FormRegistry {
    /// The three forms served by the site.
    pub fn standard() -> Self {
        Self {
            forms: vec![
                FormSpec::new("field-questionnaire", INTAKE_ENDPOINT, None),
                FormSpec::new(
                    "followup-24h-form",
                    FOLLOWUP_ENDPOINT,
                    Some(FollowUpKind::Day),
                ),
                FormSpec::new(
                    "followup-7d-form",
                    FOLLOWUP_ENDPOINT,
                    Some(FollowUpKind::Week),
                ),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&FormSpec> {
        self.forms.iter().find(|form| form.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.forms.iter().map(|form| form.id.as_str())
    }
}
