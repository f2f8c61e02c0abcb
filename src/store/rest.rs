//! PostgREST-style HTTP component store (e.g. a Supabase project).
//!
//! Thin HTTP wrapper over the table endpoint. Response parsing lives in pure
//! functions (`parse_rows`, `parse_created`) for testability.

#[cfg(test)]
#[path = "rest_test.rs"]
mod tests;

use std::fmt::Write as _;
use std::time::Duration;

use super::{ComponentStore, StoreError, instance_from_row};
use crate::config::RestConfig;
use crate::editor::widget::{Instance, NewInstance, Properties};

pub const TABLE: &str = "components";

// =============================================================================
// CLIENT
// =============================================================================

pub struct RestStore {
    http: reqwest::Client,
    table_url: String,
    api_key: String,
}

impl RestStore {
    /// Build a client for `{base_url}/components`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the HTTP client cannot be constructed.
    pub fn new(config: &RestConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?;
        Ok(Self { http, table_url: table_url(&config.base_url), api_key: config.api_key.clone() })
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn row_url(&self, id: &str) -> String {
        format!("{}?id=eq.{}", self.table_url, encode_filter_value(id))
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, StoreError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| StoreError::Http(e.to_string()))?;
    if !status.is_success() {
        return Err(StoreError::Api { status: status.as_u16(), body: text });
    }
    Ok(text)
}

#[async_trait::async_trait]
impl ComponentStore for RestStore {
    async fn list(&self) -> Result<Vec<Instance>, StoreError> {
        let url = format!("{}?select=*&order=created_at.asc", self.table_url);
        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        let text = read_body(response).await?;
        parse_rows(&text)
    }

    async fn create(&self, new: NewInstance) -> Result<Instance, StoreError> {
        let response = self
            .request(reqwest::Method::POST, &self.table_url)
            .header("Prefer", "return=representation")
            .json(&[new])
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        let text = read_body(response).await?;
        parse_created(&text)
    }

    async fn update(&self, id: &str, properties: &Properties) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::PATCH, &self.row_url(id))
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "properties": properties }))
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        let text = read_body(response).await?;
        ensure_matched(id, &text)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, &self.row_url(id))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| StoreError::Http(e.to_string()))?;
        let text = read_body(response).await?;
        ensure_matched(id, &text)
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn table_url(base_url: &str) -> String {
    format!("{}/{TABLE}", base_url.trim_end_matches('/'))
}

/// Percent-encode characters that would break a `col=eq.value` filter.
fn encode_filter_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

fn parse_rows(json: &str) -> Result<Vec<Instance>, StoreError> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(json).map_err(|e| StoreError::Decode(e.to_string()))?;
    rows.iter().map(instance_from_row).collect()
}

/// Inserts return a one-element array of the created row.
fn parse_created(json: &str) -> Result<Instance, StoreError> {
    parse_rows(json)?
        .into_iter()
        .next()
        .ok_or_else(|| StoreError::Decode("insert returned no row".into()))
}

/// With `return=representation`, an empty array means the filter matched nothing.
fn ensure_matched(id: &str, json: &str) -> Result<(), StoreError> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(json).map_err(|e| StoreError::Decode(e.to_string()))?;
    if rows.is_empty() {
        return Err(StoreError::NotFound(id.to_owned()));
    }
    Ok(())
}
