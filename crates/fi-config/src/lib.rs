//! Service configuration loading and validation (`config.toml` + environment).

pub mod paths;
pub mod service;

pub use service::{NotionConfig, ServerConfig, ServiceConfig};
