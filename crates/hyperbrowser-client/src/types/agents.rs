use std::collections::HashMap;

use hyperbrowser_core::{JobStatus, SchemaInput};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::session::CreateSessionParams;

/// Provider keys used when a task runs on the caller's own LLM accounts.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentApiKeys {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anthropic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserUseTaskParams {
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate_output: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_vision: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_vision_for_planner: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_actions_per_step: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planner_llm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_extraction_llm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planner_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_failures: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_actions: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive_data: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_model_schema: Option<SchemaInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_browser_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_options: Option<CreateSessionParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_custom_api_keys: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<AgentApiKeys>,
}

impl BrowserUseTaskParams {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Default::default()
        }
    }
}

/// Parameters shared by the computer-use agents (OpenAI CUA, Claude,
/// Gemini) and HyperAgent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerUseTaskParams {
    pub task: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_failures: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_browser_open: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_options: Option<CreateSessionParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_custom_api_keys: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_keys: Option<AgentApiKeys>,
}

impl ComputerUseTaskParams {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Default::default()
        }
    }
}

/// Steps are kept as raw JSON: each agent (and each agent version) reports
/// a different step shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTaskData {
    #[serde(default)]
    pub steps: Vec<Value>,
    #[serde(default)]
    pub final_result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentTaskResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AgentTaskData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}
