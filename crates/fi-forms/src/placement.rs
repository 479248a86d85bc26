//! Locating (or lazily creating) the headings a follow-up entry goes under.
//!
//! Session page layout:
//!
//! ```text
//! session page
//! └── ## Follow-Up
//!     ├── ### 24-hour update
//!     │   └── entries...
//!     └── ### 7-day update
//!         └── entries...
//! ```
//!
//! Headings are matched by case-insensitive substring so a hand-written
//! "Follow-up notes" heading is reused rather than duplicated. The update
//! subsection is searched among the section's own children, which is where
//! it is created.

use anyhow::{Context, Result, anyhow};
use fi_core::FollowUpKind;
use fi_notion::{Block, BlockContent, HeadingLevel, NotionApi, fetch_all_children, find_heading};

pub const FOLLOW_UP_HEADING: &str = "Follow-Up";

/// The Follow-Up section of one session page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlacement {
    pub session_id: String,
    pub section: Block,
    /// True when the section was appended by this request.
    pub section_created: bool,
}

/// Find the session's level-2 Follow-Up heading, appending one if absent.
pub async fn place_section(
    api: &dyn NotionApi,
    session_id: &str,
    page_size: u32,
) -> Result<SessionPlacement> {
    let blocks = fetch_all_children(api, session_id, page_size)
        .await
        .with_context(|| format!("failed to list blocks of session {session_id}"))?;

    if let Some(section) = find_heading(&blocks, HeadingLevel::Two, FOLLOW_UP_HEADING) {
        return Ok(SessionPlacement {
            session_id: session_id.to_string(),
            section: section.clone(),
            section_created: false,
        });
    }

    let section = append_heading(api, session_id, HeadingLevel::Two, FOLLOW_UP_HEADING).await?;
    tracing::info!(session_id, section_id = %section.id, "created follow-up section");
    Ok(SessionPlacement {
        session_id: session_id.to_string(),
        section,
        section_created: true,
    })
}

/// Find the level-3 heading for `kind` under the section, appending one if absent.
pub async fn ensure_update_subsection(
    api: &dyn NotionApi,
    placement: &SessionPlacement,
    kind: FollowUpKind,
    page_size: u32,
) -> Result<Block> {
    let label = kind.heading_label();
    let section_id = placement.section.id.as_str();

    // A section we just created, or one Notion reports as childless, cannot
    // hold the subsection yet.
    if !placement.section_created && placement.section.has_children {
        let children = fetch_all_children(api, section_id, page_size)
            .await
            .with_context(|| format!("failed to list blocks of section {section_id}"))?;
        if let Some(subsection) = find_heading(&children, HeadingLevel::Three, label) {
            return Ok(subsection.clone());
        }
    }

    let subsection = append_heading(api, section_id, HeadingLevel::Three, label).await?;
    tracing::info!(
        session_id = %placement.session_id,
        subsection_id = %subsection.id,
        kind = %kind,
        "created update subsection"
    );
    Ok(subsection)
}

async fn append_heading(
    api: &dyn NotionApi,
    parent_id: &str,
    level: HeadingLevel,
    label: &str,
) -> Result<Block> {
    api.append_children(parent_id, &[BlockContent::section_heading(level, label)])
        .await
        .with_context(|| format!("failed to create heading '{label}' under {parent_id}"))?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("notion returned no block for heading '{label}'"))
}
