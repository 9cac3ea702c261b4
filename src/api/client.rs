use async_trait::async_trait;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::types::{AnalysisResponse, RequestPayload};
use crate::error::{HukukError, Result};

/// Default generate endpoint path
pub const GENERATE_PATH: &str = "/api/documents/ai-generate";

static FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"filename\*?=(?:UTF-8'')?"?([^";]+)"?"#).expect("valid filename pattern")
});

/// Trait for document generation backends
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Submit a generation request and return the parsed analysis response
    async fn generate(&self, payload: &RequestPayload) -> Result<AnalysisResponse>;

    /// Fetch the generated document file
    async fn download(&self, document_id: &str) -> Result<DownloadedDocument>;

    /// Get the base URL for this backend
    fn base_url(&self) -> &str;
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root, e.g. `http://localhost:8000`
    pub base_url: String,
    /// Path of the generate endpoint
    pub generate_path: String,
    /// Request timeout in seconds, 0 disables it
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            generate_path: GENERATE_PATH.to_string(),
            timeout: 0,
            user_agent: format!("hukuk-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A downloaded document body
#[derive(Debug, Clone)]
pub struct DownloadedDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Link path for a generated document
pub fn download_href(document_id: &str) -> String {
    format!("/documents/{}/download", document_id)
}

/// HTTP backend speaking the document service JSON contract
pub struct HttpDocumentClient {
    config: ClientConfig,
    base: Url,
    client: Client,
}

impl HttpDocumentClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| HukukError::Config(format!("Invalid base URL '{}': {}", config.base_url, e)))?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if config.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout));
        }
        let client = builder
            .build()
            .map_err(|e| HukukError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, base, client })
    }

    fn generate_url(&self) -> Result<Url> {
        self.base
            .join(&self.config.generate_path)
            .map_err(|e| HukukError::Config(format!("Invalid generate path: {}", e)))
    }

    fn download_url(&self, document_id: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| HukukError::Config(format!("Base URL cannot have a path: {}", self.base)))?
            .clear()
            .extend(["documents", document_id, "download"]);
        Ok(url)
    }
}

#[async_trait]
impl DocumentApi for HttpDocumentClient {
    async fn generate(&self, payload: &RequestPayload) -> Result<AnalysisResponse> {
        let url = self.generate_url()?;
        info!(
            "Submitting document request: template={}, category={}",
            payload.template_name, payload.case_category
        );
        debug!("POST {} ({} template fields)", url, payload.template_data.len());

        let response = self.client.post(url).json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(HukukError::http(status.as_u16(), error_detail(&body)));
        }

        serde_json::from_str(&body).map_err(|e| HukukError::Parse(e.to_string()))
    }

    async fn download(&self, document_id: &str) -> Result<DownloadedDocument> {
        let url = self.download_url(document_id)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HukukError::http(status.as_u16(), error_detail(&body)));
        }

        let headers = response.headers();
        let file_name = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| format!("{}.docx", document_id));
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();

        Ok(DownloadedDocument {
            file_name,
            content_type,
            bytes,
        })
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

/// Pull a human readable message out of a FastAPI style error body
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("message").and_then(Value::as_str).map(str::to_string),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

fn filename_from_disposition(header: &str) -> Option<String> {
    let name = FILENAME_RE.captures(header)?.get(1)?.as_str().trim();
    // Only keep the final path component
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    (!name.is_empty()).then(|| name.to_string())
}
