use std::collections::HashMap;

use hyperbrowser_core::{JobStatus, SchemaInput};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::scrape::{PageStatus, ScreenshotFormat, WaitUntil};
use super::session::{CreateSessionParams, ScreenConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StealthMode {
    None,
    Auto,
    Ultra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SanitizeMode {
    None,
    Basic,
    Advanced,
}

/// One requested output of a fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum FetchOutputFormat {
    Markdown,
    Html,
    Links,
    Screenshot {
        #[serde(skip_serializing_if = "Option::is_none")]
        full_page: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        format: Option<ScreenshotFormat>,
        #[serde(skip_serializing_if = "Option::is_none")]
        crop_to_content: Option<bool>,
    },
    Json {
        #[serde(skip_serializing_if = "Option::is_none")]
        schema: Option<SchemaInput>,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageStateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_storage: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_storage: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutputOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<FetchOutputFormat>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitize: Option<SanitizeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_selectors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_selectors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_state: Option<StorageStateOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchBrowserOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solve_captchas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchNavigationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_until: Option<WaitUntil>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchCacheOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stealth: Option<StealthMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<FetchOutputOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<FetchBrowserOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<FetchNavigationOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<FetchCacheOptions>,
}

impl FetchParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponseData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<FetchResponseData>,
}

/// One fetched page of a batch fetch or web crawl.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    pub url: String,
    pub status: PageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartBatchFetchJobParams {
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stealth: Option<StealthMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<FetchOutputOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<FetchBrowserOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<FetchNavigationOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<FetchCacheOptions>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebCrawlOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_sitemap: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_patterns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartWebCrawlJobParams {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stealth: Option<StealthMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<FetchOutputOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<FetchBrowserOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<FetchNavigationOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<FetchCacheOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crawl_options: Option<WebCrawlOptions>,
}

/// Multi-page fetch driven by a prompt or schema.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDeepFetchJobParams {
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaInput>,
    /// Milliseconds to wait after page load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_options: Option<CreateSessionParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_links: Option<u32>,
}

impl StartDeepFetchJobParams {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            urls,
            ..Default::default()
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<SchemaInput>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepFetchJobMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_pages_scraped: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeepFetchJobResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DeepFetchJobMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFiletype {
    Pdf,
    Doc,
    Docx,
    Xls,
    Xlsx,
    Ppt,
    Pptx,
    Html,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_phrase: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_phrase: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_terms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost_terms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filetype: Option<SearchFiletype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inurl: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSearchParams {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<WebSearchFilters>,
}

impl WebSearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchResultItem {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebSearchResponseData {
    pub query: String,
    #[serde(default)]
    pub results: Vec<WebSearchResultItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSearchResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<WebSearchResponseData>,
}
