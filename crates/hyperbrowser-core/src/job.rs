use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

/// Status of a remote job, as reported by its status endpoint.
///
/// Some families never report `stopped`; the shared enum covers them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Stopped,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Stopped => "stopped",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Stopped
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(JobStatus::Pending),
            "running" => Ok(JobStatus::Running),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            "stopped" => Ok(JobStatus::Stopped),
            _ => Err(format!("Unknown job status: {}", s)),
        }
    }
}

/// Polling policy for start-and-wait operations.
///
/// Defaults: status every 2s, result pages every 500ms, 5 consecutive
/// failures tolerated, 100 items per page, no overall deadline.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub poll_interval: Duration,
    pub page_interval: Duration,
    pub max_failures: u32,
    pub batch_size: u32,
    /// Upper bound for a whole start-and-wait sequence. `None` waits forever.
    pub deadline: Option<Duration>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(2000),
            page_interval: Duration::from_millis(500),
            max_failures: 5,
            batch_size: 100,
            deadline: None,
        }
    }
}

impl PollConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_page_interval(mut self, interval: Duration) -> Self {
        self.page_interval = interval;
        self
    }

    /// Set the consecutive-failure ceiling. Values below 1 are raised to 1.
    pub fn with_max_failures(mut self, max: u32) -> Self {
        self.max_failures = max.max(1);
        self
    }

    pub fn with_batch_size(mut self, size: u32) -> Self {
        self.batch_size = size;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Response of a job start call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartJobResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    /// Live view URL, returned by agent task families.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
}

/// Response of the cheap status probe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub status: JobStatus,
}

/// Generic acknowledgement returned by stop/delete style endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicResponse {
    #[serde(default)]
    pub success: bool,
}

/// Pagination parameters for result fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page: Option<u32>,
    pub batch_size: Option<u32>,
}

impl PageParams {
    pub fn new(page: u32, batch_size: u32) -> Self {
        Self {
            page: Some(page),
            batch_size: Some(batch_size),
        }
    }
}

/// A page-bearing job result.
///
/// Returned for a single page by the result endpoint of paged families, and
/// used as the aggregate when all pages are collected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedJobResponse<T> {
    #[serde(default)]
    pub job_id: Option<String>,
    pub status: JobStatus,
    #[serde(
        default = "Vec::new",
        deserialize_with = "null_as_empty",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub current_page_batch: u32,
    #[serde(default)]
    pub total_page_batches: u32,
    /// Number of items across all pages. Each family names it differently
    /// on the wire.
    #[serde(
        default,
        alias = "totalScrapedPages",
        alias = "totalCrawledPages",
        alias = "totalPages"
    )]
    pub total_items: u64,
    #[serde(default)]
    pub batch_size: u32,
}

impl<T> PagedJobResponse<T> {
    /// Empty aggregate for a job that reached `status`.
    pub fn empty(job_id: impl Into<String>, status: JobStatus, batch_size: u32) -> Self {
        Self {
            job_id: Some(job_id.into()),
            status,
            data: Vec::new(),
            error: None,
            current_page_batch: 0,
            total_page_batches: 0,
            total_items: 0,
            batch_size,
        }
    }

    /// Append one fetched page and take over its progress fields.
    pub fn absorb(&mut self, page: PagedJobResponse<T>) {
        self.data.extend(page.data);
        if page.error.is_some() {
            self.error = page.error;
        }
        self.current_page_batch = page.current_page_batch;
        self.total_page_batches = page.total_page_batches;
        self.total_items = page.total_items;
        self.batch_size = page.batch_size;
    }

    pub fn has_more_pages(&self) -> bool {
        self.current_page_batch < self.total_page_batches
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
