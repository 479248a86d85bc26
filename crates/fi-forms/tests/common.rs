#![allow(dead_code)]

use std::sync::Arc;

use fi_forms::{FormsContext, schema};
use fi_notion::{MemoryWorkspace, PropertyMap, PropertyValue};

pub const DATABASE_ID: &str = "founders-db";

pub fn workspace_and_context() -> (Arc<MemoryWorkspace>, FormsContext) {
    let workspace = Arc::new(MemoryWorkspace::new());
    let ctx = FormsContext::new(workspace.clone(), DATABASE_ID);
    (workspace, ctx)
}

/// Founder page with `sessions` linked session pages; returns (founder, sessions).
pub fn seed_founder(workspace: &MemoryWorkspace, email: &str, sessions: usize) -> (String, Vec<String>) {
    let mut properties = PropertyMap::new();
    properties.insert(schema::EMAIL.into(), PropertyValue::Email(email.into()));
    let founder = workspace.insert_page(DATABASE_ID, properties);
    let session_ids = (0..sessions)
        .filter_map(|_| workspace.link_related_page(&founder, schema::SESSIONS))
        .collect();
    (founder, session_ids)
}
