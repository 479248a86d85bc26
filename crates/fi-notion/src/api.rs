use anyhow::Result;
use async_trait::async_trait;

use crate::{Block, BlockContent, PageRecord, PropertyMap};

/// One page of a block-children listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockPage {
    pub results: Vec<Block>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// Notion operations used by the form handlers.
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// Pages of `database_id` whose email property equals `email` (exact match).
    async fn query_by_email(
        &self,
        database_id: &str,
        property: &str,
        email: &str,
    ) -> Result<Vec<PageRecord>>;

    /// Create a page in `database_id`.
    async fn create_page(&self, database_id: &str, properties: &PropertyMap) -> Result<PageRecord>;

    /// Overwrite the given properties of an existing page; others are untouched.
    async fn update_page(&self, page_id: &str, properties: &PropertyMap) -> Result<PageRecord>;

    /// List direct children of a block or page.
    async fn list_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
        page_size: u32,
    ) -> Result<BlockPage>;

    /// Append children after the last child of `block_id`; returns the created blocks.
    async fn append_children(&self, block_id: &str, children: &[BlockContent])
    -> Result<Vec<Block>>;
}

/// Every direct child of `block_id`, following cursors until exhausted.
pub async fn fetch_all_children(
    api: &dyn NotionApi,
    block_id: &str,
    page_size: u32,
) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = api
            .list_children(block_id, cursor.as_deref(), page_size)
            .await?;
        pages += 1;
        blocks.extend(page.results);

        match (page.has_more, page.next_cursor) {
            (true, Some(next)) => cursor = Some(next),
            _ => break,
        }
    }

    tracing::debug!(block_id, pages, blocks = blocks.len(), "fetched block children");
    Ok(blocks)
}
