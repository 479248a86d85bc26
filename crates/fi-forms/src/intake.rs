use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fi_core::{FormFields, SubmitError};
use fi_notion::{PropertyMap, PropertyValue};
use serde::Serialize;

use crate::FormsContext;
use crate::schema;

const FAILURE: &str = "Failed to submit form";

/// Success payload of the intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReceipt {
    pub success: bool,
    pub message: String,
    pub page_id: String,
    pub is_update: bool,
}

/// Founder properties written on every intake, create or update alike.
pub fn build_intake_properties(
    fields: &FormFields,
    email: &str,
    submitted_at: DateTime<Utc>,
) -> PropertyMap {
    let text = |key: &str| fields.present(key).unwrap_or_default().to_string();

    let mut properties = PropertyMap::new();
    properties.insert(
        schema::NAME.to_string(),
        PropertyValue::Title(
            fields
                .present("full-name")
                .unwrap_or(schema::UNKNOWN_NAME)
                .to_string(),
        ),
    );
    properties.insert(
        schema::EMAIL.to_string(),
        PropertyValue::Email(email.to_string()),
    );
    properties.insert(
        schema::STARTUP_NAME.to_string(),
        PropertyValue::RichText(text("startup-name")),
    );
    properties.insert(schema::ROLE.to_string(), PropertyValue::RichText(text("role")));
    properties.insert(
        schema::INTAKE_TIMESTAMP.to_string(),
        PropertyValue::Date(submitted_at),
    );
    properties.insert(
        schema::INTAKE_SOURCE.to_string(),
        PropertyValue::Select(schema::INTAKE_SOURCE_WEBSITE.to_string()),
    );
    for (key, property) in schema::INTAKE_ANSWERS {
        properties.insert(property.to_string(), PropertyValue::RichText(text(key)));
    }
    properties
}

/// Intake endpoint: create the founder record, or overwrite the first one
/// already filed under the same email.
pub async fn handle_intake(
    ctx: &FormsContext,
    method: &str,
    body: &str,
) -> Result<IntakeReceipt, SubmitError> {
    if method != "POST" {
        return Err(SubmitError::MethodNotAllowed);
    }

    let fields = FormFields::from_json_body(body).map_err(|err| {
        tracing::warn!(error = %err, "intake body is not a JSON object");
        SubmitError::upstream(FAILURE, format!("invalid JSON body: {err}"))
    })?;
    let Some(email) = fields.present("email") else {
        tracing::warn!("intake rejected: missing email");
        return Err(SubmitError::validation("Email is required"));
    };

    upsert_founder(ctx, &fields, email).await.map_err(|err| {
        tracing::error!(email, error = %format!("{err:#}"), "intake submission failed");
        SubmitError::upstream(FAILURE, format!("{err:#}"))
    })
}

async fn upsert_founder(ctx: &FormsContext, fields: &FormFields, email: &str) -> Result<IntakeReceipt> {
    let existing = ctx
        .notion
        .query_by_email(&ctx.database_id, schema::EMAIL, email)
        .await
        .context("failed to look up founder by email")?;

    let properties = build_intake_properties(fields, email, Utc::now());

    let (page, is_update) = match existing.first() {
        Some(founder) => {
            if existing.len() > 1 {
                tracing::warn!(
                    email,
                    matches = existing.len(),
                    "multiple founders share this email; updating the first"
                );
            }
            let page = ctx
                .notion
                .update_page(&founder.id, &properties)
                .await
                .with_context(|| format!("failed to update founder {}", founder.id))?;
            (page, true)
        }
        None => {
            let page = ctx
                .notion
                .create_page(&ctx.database_id, &properties)
                .await
                .context("failed to create founder")?;
            (page, false)
        }
    };

    tracing::info!(email, page_id = %page.id, is_update, "intake stored");
    let message = if is_update {
        "Founder profile updated successfully"
    } else {
        "Founder profile created successfully"
    };
    Ok(IntakeReceipt {
        success: true,
        message: message.to_string(),
        page_id: page.id,
        is_update,
    })
}
