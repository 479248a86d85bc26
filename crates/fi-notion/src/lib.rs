//! Typed access to the parts of the Notion API the intake service needs.

mod api;
mod block;
mod http_client;
mod memory;
mod page;
mod property;

pub use api::{BlockPage, NotionApi, fetch_all_children};
pub use block::{Block, BlockContent, HeadingLevel, TextRun, find_heading};
pub use http_client::HttpNotionClient;
pub use memory::MemoryWorkspace;
pub use page::PageRecord;
pub use property::{PropertyMap, PropertyValue, properties_to_json};
