use anyhow::{Context, Result};
use chrono::Utc;
use fi_core::{FORM_TYPE_KEY, FollowUpKind, FormFields, SubmitError};
use serde::Serialize;

use crate::placement::{ensure_update_subsection, place_section};
use crate::{FormsContext, build_response_blocks, schema};

const FAILURE: &str = "Failed to submit follow-up";
const NO_FOUNDER: &str = "No founder found with this email. Please complete the intake form first.";
const NO_SESSIONS: &str = "No sessions found for this founder. Please contact support.";

/// Success payload of the follow-up endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpReceipt {
    pub success: bool,
    pub message: String,
    pub session_id: String,
}

/// Result of the lookup phase, before anything is written.
enum Lookup {
    Session(String),
    NoFounder,
    NoSessions,
}

/// Follow-up endpoint: file the answers under the founder's latest session.
pub async fn handle_followup(
    ctx: &FormsContext,
    method: &str,
    body: &str,
) -> Result<FollowUpReceipt, SubmitError> {
    if method != "POST" {
        return Err(SubmitError::MethodNotAllowed);
    }

    let fields = FormFields::from_json_body(body).map_err(|err| {
        tracing::warn!(error = %err, "follow-up body is not a JSON object");
        SubmitError::upstream(FAILURE, format!("invalid JSON body: {err}"))
    })?;
    let Some(email) = fields.present("email") else {
        tracing::warn!("follow-up rejected: missing email");
        return Err(SubmitError::validation("Email is required"));
    };
    let Some(kind) = fields.get(FORM_TYPE_KEY).and_then(FollowUpKind::parse) else {
        tracing::warn!(email, form_type = ?fields.get(FORM_TYPE_KEY), "follow-up rejected: bad form type");
        return Err(SubmitError::validation(
            r#"Invalid form type. Must be "24h" or "7d""#,
        ));
    };
    let responses = fields.without(&["email", FORM_TYPE_KEY]);

    let fail = |err: anyhow::Error| {
        tracing::error!(email, kind = %kind, error = %format!("{err:#}"), "follow-up submission failed");
        SubmitError::upstream(FAILURE, format!("{err:#}"))
    };

    let session_id = match latest_session(ctx, email).await.map_err(fail)? {
        Lookup::Session(session_id) => session_id,
        Lookup::NoFounder => {
            tracing::warn!(email, "follow-up rejected: founder not found");
            return Err(SubmitError::not_found(NO_FOUNDER));
        }
        Lookup::NoSessions => {
            tracing::warn!(email, "follow-up rejected: founder has no sessions");
            return Err(SubmitError::not_found(NO_SESSIONS));
        }
    };

    file_responses(ctx, &session_id, kind, &responses)
        .await
        .map_err(fail)?;

    tracing::info!(email, kind = %kind, session_id = %session_id, "follow-up stored");
    Ok(FollowUpReceipt {
        success: true,
        message: format!("{} follow-up submitted successfully", kind.display_name()),
        session_id,
    })
}

/// Latest session of the first founder filed under `email`.
///
/// "Latest" is the last entry of the relation; Notion keeps relation order.
async fn latest_session(ctx: &FormsContext, email: &str) -> Result<Lookup> {
    let founders = ctx
        .notion
        .query_by_email(&ctx.database_id, schema::EMAIL, email)
        .await
        .context("failed to look up founder by email")?;
    let Some(founder) = founders.first() else {
        return Ok(Lookup::NoFounder);
    };
    Ok(founder
        .relation_ids(schema::SESSIONS)
        .pop()
        .map_or(Lookup::NoSessions, Lookup::Session))
}

async fn file_responses(
    ctx: &FormsContext,
    session_id: &str,
    kind: FollowUpKind,
    responses: &FormFields,
) -> Result<()> {
    let api = ctx.notion.as_ref();
    let placement = place_section(api, session_id, ctx.page_size).await?;
    let subsection = ensure_update_subsection(api, &placement, kind, ctx.page_size).await?;

    let blocks = build_response_blocks(kind, responses, Utc::now());
    api.append_children(&subsection.id, &blocks)
        .await
        .with_context(|| format!("failed to append responses under {}", subsection.id))?;
    tracing::debug!(
        session_id,
        subsection_id = %subsection.id,
        blocks = blocks.len(),
        "appended follow-up entry"
    );
    Ok(())
}
