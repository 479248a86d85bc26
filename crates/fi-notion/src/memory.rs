use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use ulid::Ulid;

use crate::{Block, BlockContent, BlockPage, NotionApi, PageRecord, PropertyMap};

/// In-process stand-in for a Notion workspace.
///
/// Keeps pages and block trees in memory, answers the same operations as the
/// HTTP client, and counts calls so tests can assert on side effects.
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    state: Mutex<WorkspaceState>,
    page_size_cap: Option<u32>,
}

#[derive(Debug, Default)]
struct WorkspaceState {
    pages: Vec<StoredPage>,
    /// Direct children per block/page id. Every known id has an entry.
    children: HashMap<String, Vec<Block>>,
    calls: usize,
    writes: usize,
    fail_writes_after: Option<usize>,
}

#[derive(Debug, Clone)]
struct StoredPage {
    id: String,
    database_id: String,
    properties: Map<String, Value>,
}

impl StoredPage {
    fn record(&self) -> PageRecord {
        PageRecord {
            id: self.id.clone(),
            properties: Value::Object(self.properties.clone()),
        }
    }
}

fn new_id() -> String {
    Ulid::new().to_string().to_lowercase()
}

fn merge_properties(target: &mut Map<String, Value>, properties: &PropertyMap) {
    for (name, value) in properties {
        target.insert(name.clone(), value.to_json());
    }
}

impl WorkspaceState {
    fn page_mut(&mut self, page_id: &str) -> Option<&mut StoredPage> {
        self.pages.iter_mut().find(|page| page.id == page_id)
    }

    fn begin_write(&mut self) -> Result<()> {
        if let Some(limit) = self.fail_writes_after
            && self.writes >= limit
        {
            bail!("memory workspace: injected write failure after {limit} write(s)");
        }
        self.writes += 1;
        Ok(())
    }

    fn append(&mut self, parent_id: &str, children: &[BlockContent]) -> Result<Vec<Block>> {
        if !self.children.contains_key(parent_id) {
            bail!("Could not find block with ID: {parent_id}");
        }
        for child in children {
            if let BlockContent::Other(block_type) = child {
                bail!("cannot append unsupported block type '{block_type}'");
            }
        }

        let created: Vec<Block> = children
            .iter()
            .map(|content| Block {
                id: new_id(),
                has_children: false,
                content: content.clone(),
            })
            .collect();
        for block in &created {
            self.children.insert(block.id.clone(), Vec::new());
        }
        if let Some(siblings) = self.children.get_mut(parent_id) {
            siblings.extend(created.iter().cloned());
        }
        if !created.is_empty() {
            self.mark_has_children(parent_id);
        }
        Ok(created)
    }

    fn mark_has_children(&mut self, block_id: &str) {
        for siblings in self.children.values_mut() {
            if let Some(block) = siblings.iter_mut().find(|block| block.id == block_id) {
                block.has_children = true;
                return;
            }
        }
    }
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve at most `cap` children per listing regardless of the requested size.
    pub fn with_page_size_cap(mut self, cap: u32) -> Self {
        self.page_size_cap = Some(cap.max(1));
        self
    }

    fn state(&self) -> MutexGuard<'_, WorkspaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every write after the first `limit` fail.
    pub fn fail_writes_after(&self, limit: usize) {
        self.state().fail_writes_after = Some(limit);
    }

    /// Insert a page directly (not counted as a call).
    pub fn insert_page(&self, database_id: &str, properties: PropertyMap) -> String {
        let mut state = self.state();
        let id = new_id();
        let mut stored = Map::new();
        merge_properties(&mut stored, &properties);
        state.pages.push(StoredPage {
            id: id.clone(),
            database_id: database_id.to_string(),
            properties: stored,
        });
        state.children.insert(id.clone(), Vec::new());
        id
    }

    /// Create a standalone page and append it to `page_id`'s relation `property`.
    pub fn link_related_page(&self, page_id: &str, property: &str) -> Option<String> {
        let related_id = self.insert_page("", PropertyMap::new());
        let mut state = self.state();
        let page = state.page_mut(page_id)?;
        let relation = page
            .properties
            .entry(property.to_string())
            .or_insert_with(|| json!({ "type": "relation", "relation": [] }));
        if let Some(items) = relation.get_mut("relation").and_then(Value::as_array_mut) {
            items.push(json!({ "id": related_id }));
        }
        Some(related_id)
    }

    /// Append pre-existing content under `parent_id` (not counted as a call).
    pub fn seed_children(&self, parent_id: &str, children: &[BlockContent]) -> Vec<String> {
        let mut state = self.state();
        state
            .append(parent_id, children)
            .map(|blocks| blocks.into_iter().map(|block| block.id).collect())
            .unwrap_or_default()
    }

    /// Snapshot of the direct children of `parent_id`.
    pub fn children(&self, parent_id: &str) -> Vec<Block> {
        self.state()
            .children
            .get(parent_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn page(&self, page_id: &str) -> Option<PageRecord> {
        self.state()
            .pages
            .iter()
            .find(|page| page.id == page_id)
            .map(StoredPage::record)
    }

    pub fn pages_in(&self, database_id: &str) -> Vec<PageRecord> {
        self.state()
            .pages
            .iter()
            .filter(|page| page.database_id == database_id)
            .map(StoredPage::record)
            .collect()
    }

    /// API calls served so far (reads and writes).
    pub fn call_count(&self) -> usize {
        self.state().calls
    }

    /// Create/update/append calls that were accepted.
    pub fn write_count(&self) -> usize {
        self.state().writes
    }
}

#[async_trait]
impl NotionApi for MemoryWorkspace {
    async fn query_by_email(
        &self,
        database_id: &str,
        property: &str,
        email: &str,
    ) -> Result<Vec<PageRecord>> {
        let mut state = self.state();
        state.calls += 1;
        Ok(state
            .pages
            .iter()
            .filter(|page| page.database_id == database_id)
            .map(StoredPage::record)
            .filter(|record| record.email(property) == Some(email))
            .collect())
    }

    async fn create_page(&self, database_id: &str, properties: &PropertyMap) -> Result<PageRecord> {
        let mut state = self.state();
        state.calls += 1;
        state.begin_write()?;
        let mut stored = Map::new();
        merge_properties(&mut stored, properties);
        let page = StoredPage {
            id: new_id(),
            database_id: database_id.to_string(),
            properties: stored,
        };
        state.children.insert(page.id.clone(), Vec::new());
        let record = page.record();
        state.pages.push(page);
        Ok(record)
    }

    async fn update_page(&self, page_id: &str, properties: &PropertyMap) -> Result<PageRecord> {
        let mut state = self.state();
        state.calls += 1;
        state.begin_write()?;
        let Some(page) = state.page_mut(page_id) else {
            bail!("Could not find page with ID: {page_id}");
        };
        merge_properties(&mut page.properties, properties);
        Ok(page.record())
    }

    async fn list_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
        page_size: u32,
    ) -> Result<BlockPage> {
        let mut state = self.state();
        state.calls += 1;
        let Some(children) = state.children.get(block_id) else {
            bail!("Could not find block with ID: {block_id}");
        };

        let size = self
            .page_size_cap
            .map_or(page_size, |cap| page_size.min(cap))
            .max(1) as usize;
        let start = match start_cursor {
            Some(cursor) => children
                .iter()
                .position(|block| block.id == cursor)
                .ok_or_else(|| anyhow::anyhow!("invalid start_cursor: {cursor}"))?,
            None => 0,
        };
        let end = (start + size).min(children.len());
        let results = children[start..end].to_vec();
        let next_cursor = children.get(end).map(|block| block.id.clone());

        Ok(BlockPage {
            results,
            has_more: next_cursor.is_some(),
            next_cursor,
        })
    }

    async fn append_children(
        &self,
        block_id: &str,
        children: &[BlockContent],
    ) -> Result<Vec<Block>> {
        let mut state = self.state();
        state.calls += 1;
        state.begin_write()?;
        state.append(block_id, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeadingLevel, PropertyValue};

    fn founder_props(email: &str) -> PropertyMap {
        let mut props = PropertyMap::new();
        props.insert("Email".into(), PropertyValue::Email(email.into()));
        props
    }

    #[tokio::test]
    async fn test_query_matches_exact_email_in_database() {
        let workspace = MemoryWorkspace::new();
        let id = workspace.insert_page("db", founder_props("a@b.com"));
        workspace.insert_page("other-db", founder_props("a@b.com"));

        let hits = workspace.query_by_email("db", "Email", "a@b.com").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, id);

        let misses = workspace.query_by_email("db", "Email", "A@B.com").await.unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_unlisted_properties() {
        let workspace = MemoryWorkspace::new();
        let id = workspace.insert_page("db", founder_props("a@b.com"));
        let session = workspace.link_related_page(&id, "Sessions").unwrap();

        let mut update = PropertyMap::new();
        update.insert("Role".into(), PropertyValue::RichText("CTO".into()));
        let record = workspace.update_page(&id, &update).await.unwrap();

        assert_eq!(record.relation_ids("Sessions"), vec![session]);
        assert_eq!(record.email("Email"), Some("a@b.com"));
        assert_eq!(workspace.write_count(), 1);
    }

    #[tokio::test]
    async fn test_append_marks_parent_block_has_children() {
        let workspace = MemoryWorkspace::new();
        let page = workspace.insert_page("db", PropertyMap::new());
        let heading = workspace
            .append_children(
                &page,
                &[BlockContent::section_heading(HeadingLevel::Two, "Follow-Up")],
            )
            .await
            .unwrap();
        assert!(!workspace.children(&page)[0].has_children);

        workspace
            .append_children(&heading[0].id, &[BlockContent::Divider])
            .await
            .unwrap();
        assert!(workspace.children(&page)[0].has_children);
        assert_eq!(workspace.children(&heading[0].id).len(), 1);
    }

    #[tokio::test]
    async fn test_injected_write_failure() {
        let workspace = MemoryWorkspace::new();
        let page = workspace.insert_page("db", PropertyMap::new());
        workspace.fail_writes_after(1);

        assert!(workspace.append_children(&page, &[BlockContent::Divider]).await.is_ok());
        let err = workspace
            .append_children(&page, &[BlockContent::Divider])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("injected write failure"));
        assert_eq!(workspace.children(&page).len(), 1);
    }

    #[tokio::test]
    async fn test_seeding_is_not_counted() {
        let workspace = MemoryWorkspace::new();
        let page = workspace.insert_page("db", PropertyMap::new());
        workspace.seed_children(&page, &[BlockContent::Divider]);
        assert_eq!(workspace.call_count(), 0);
        assert_eq!(workspace.write_count(), 0);
    }
}
