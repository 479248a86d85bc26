use std::sync::Arc;

use fi_notion::NotionApi;

const DEFAULT_PAGE_SIZE: u32 = 100;

/// Dependencies shared by every submission.
#[derive(Clone)]
pub struct FormsContext {
    pub notion: Arc<dyn NotionApi>,
    /// Founders database.
    pub database_id: String,
    /// Children requested per block listing.
    pub page_size: u32,
}

impl FormsContext {
    pub fn new(notion: Arc<dyn NotionApi>, database_id: impl Into<String>) -> Self {
        Self {
            notion,
            database_id: database_id.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

impl std::fmt::Debug for FormsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormsContext")
            .field("database_id", &self.database_id)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
