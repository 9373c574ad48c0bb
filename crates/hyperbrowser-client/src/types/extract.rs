use hyperbrowser_core::{JobStatus, SchemaInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::session::CreateSessionParams;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExtractJobParams {
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_options: Option<CreateSessionParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_links: Option<u32>,
}

impl StartExtractJobParams {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractJobResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
