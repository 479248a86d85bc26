use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use fi_config::NotionConfig;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};

use crate::{
    Block, BlockContent, BlockPage, NotionApi, PageRecord, PropertyMap, properties_to_json,
};

const NOTION_VERSION_HEADER: &str = "Notion-Version";

/// Notion REST client. One instance is shared by all requests.
#[derive(Debug, Clone)]
pub struct HttpNotionClient {
    base_url: String,
    api_key: String,
    notion_version: String,
    client: reqwest::Client,
}

impl HttpNotionClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        notion_version: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build notion http client")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            notion_version: notion_version.into(),
            client,
        })
    }

    pub fn from_config(config: &NotionConfig) -> Result<Self> {
        Self::new(
            &config.base_url,
            &config.api_key,
            &config.notion_version,
            config.request_timeout(),
        )
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&self.api_key)
            .header(NOTION_VERSION_HEADER, &self.notion_version);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("notion request failed: {method} {path}"))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("failed to read notion response body: {method} {path}"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "notion {method} {path} failed: {}",
                describe_error(status, &text)
            ));
        }

        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse notion response JSON: {method} {path}"))
    }
}

/// Render a Notion error body (`{"object":"error","code":...,"message":...}`).
/// Falls back to the raw body when it is not the documented shape.
fn describe_error(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|value| value.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    match (field("code"), field("message")) {
        (Some(code), Some(message)) => format!("status {status}, code {code}: {message}"),
        _ => format!("status {status}, body {}", body.trim()),
    }
}

fn parse_results<T>(value: &Value, parse: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
    value
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("notion response has no results array"))?
        .iter()
        .map(parse)
        .collect()
}

#[async_trait]
impl NotionApi for HttpNotionClient {
    async fn query_by_email(
        &self,
        database_id: &str,
        property: &str,
        email: &str,
    ) -> Result<Vec<PageRecord>> {
        let body = json!({
            "filter": {
                "property": property,
                "email": { "equals": email },
            }
        });
        let response = self
            .send(
                Method::POST,
                &format!("/databases/{database_id}/query"),
                &[],
                Some(body),
            )
            .await?;
        parse_results(&response, PageRecord::from_json)
    }

    async fn create_page(&self, database_id: &str, properties: &PropertyMap) -> Result<PageRecord> {
        let body = json!({
            "parent": { "database_id": database_id },
            "properties": properties_to_json(properties),
        });
        let response = self.send(Method::POST, "/pages", &[], Some(body)).await?;
        PageRecord::from_json(&response)
    }

    async fn update_page(&self, page_id: &str, properties: &PropertyMap) -> Result<PageRecord> {
        let body = json!({ "properties": properties_to_json(properties) });
        let response = self
            .send(Method::PATCH, &format!("/pages/{page_id}"), &[], Some(body))
            .await?;
        PageRecord::from_json(&response)
    }

    async fn list_children(
        &self,
        block_id: &str,
        start_cursor: Option<&str>,
        page_size: u32,
    ) -> Result<BlockPage> {
        let page_size = page_size.to_string();
        let mut query = vec![("page_size", page_size.as_str())];
        if let Some(cursor) = start_cursor {
            query.push(("start_cursor", cursor));
        }
        let response = self
            .send(
                Method::GET,
                &format!("/blocks/{block_id}/children"),
                &query,
                None,
            )
            .await?;

        Ok(BlockPage {
            results: parse_results(&response, Block::from_json)?,
            has_more: response
                .get("has_more")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            next_cursor: response
                .get("next_cursor")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    async fn append_children(
        &self,
        block_id: &str,
        children: &[BlockContent],
    ) -> Result<Vec<Block>> {
        let children = children
            .iter()
            .map(BlockContent::to_json)
            .collect::<Result<Vec<_>>>()?;
        let response = self
            .send(
                Method::PATCH,
                &format!("/blocks/{block_id}/children"),
                &[],
                Some(json!({ "children": children })),
            )
            .await?;
        parse_results(&response, Block::from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_error_uses_notion_fields() {
        let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"Could not find block"}"#;
        assert_eq!(
            describe_error(StatusCode::NOT_FOUND, body),
            "status 404 Not Found, code object_not_found: Could not find block"
        );
    }

    #[test]
    fn test_describe_error_falls_back_to_raw_body() {
        assert_eq!(
            describe_error(StatusCode::BAD_GATEWAY, "upstream down\n"),
            "status 502 Bad Gateway, body upstream down"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = HttpNotionClient::new(
            "https://api.notion.com/v1/",
            "secret",
            "2022-06-28",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://api.notion.com/v1");
    }

    #[test]
    fn test_parse_results_requires_array() {
        let err = parse_results(&json!({}), PageRecord::from_json).unwrap_err();
        assert!(err.to_string().contains("results"));
    }
}
