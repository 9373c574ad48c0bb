//! Test utilities: a scripted in-memory job API.
//!
//! Each endpoint pops the next queued response on every call, with a
//! fallback once its queue runs dry. Call counters allow assertions on
//! how many requests the poll loop made.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::error::HyperbrowserError;
use crate::job::{JobStatus, JobStatusResponse, PageParams, PagedJobResponse, StartJobResponse};
use crate::traits::{JobApi, PagedJobApi};

// ---------------------------------------------------------------------------
// MockJobApi
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct MockJobApi {
    start: Arc<Mutex<Option<StartJobResponse>>>,
    statuses: Arc<Mutex<Vec<Result<JobStatus, HyperbrowserError>>>>,
    /// Status returned once `statuses` is exhausted.
    idle_status: JobStatus,
    results: Arc<Mutex<Vec<Result<Value, HyperbrowserError>>>>,
    pages: Arc<Mutex<Vec<Result<PagedJobResponse<Value>, HyperbrowserError>>>>,
    start_calls: Arc<Mutex<usize>>,
    status_calls: Arc<Mutex<usize>>,
    get_calls: Arc<Mutex<usize>>,
    requested_pages: Arc<Mutex<Vec<PageParams>>>,
}

impl MockJobApi {
    /// Job API whose start call returns `job_id`.
    pub fn new(job_id: &str) -> Self {
        Self::with_start(StartJobResponse {
            job_id: Some(job_id.to_string()),
            live_url: None,
        })
    }

    /// Job API whose start call succeeds without an ID.
    pub fn without_job_id() -> Self {
        Self::with_start(StartJobResponse::default())
    }

    fn with_start(start: StartJobResponse) -> Self {
        Self {
            start: Arc::new(Mutex::new(Some(start))),
            statuses: Arc::new(Mutex::new(Vec::new())),
            idle_status: JobStatus::Completed,
            results: Arc::new(Mutex::new(Vec::new())),
            pages: Arc::new(Mutex::new(Vec::new())),
            start_calls: Arc::new(Mutex::new(0)),
            status_calls: Arc::new(Mutex::new(0)),
            get_calls: Arc::new(Mutex::new(0)),
            requested_pages: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_statuses(self, statuses: Vec<Result<JobStatus, HyperbrowserError>>) -> Self {
        *self.statuses.lock().unwrap() = statuses;
        self
    }

    pub fn with_idle_status(mut self, status: JobStatus) -> Self {
        self.idle_status = status;
        self
    }

    pub fn with_results(self, results: Vec<Result<Value, HyperbrowserError>>) -> Self {
        *self.results.lock().unwrap() = results;
        self
    }

    pub fn with_pages(
        self,
        pages: Vec<Result<PagedJobResponse<Value>, HyperbrowserError>>,
    ) -> Self {
        *self.pages.lock().unwrap() = pages;
        self
    }

    pub fn start_calls(&self) -> usize {
        *self.start_calls.lock().unwrap()
    }

    pub fn status_calls(&self) -> usize {
        *self.status_calls.lock().unwrap()
    }

    pub fn get_calls(&self) -> usize {
        *self.get_calls.lock().unwrap()
    }

    pub fn requested_pages(&self) -> Vec<PageParams> {
        self.requested_pages.lock().unwrap().clone()
    }
}

impl JobApi for MockJobApi {
    type Params = Value;
    type Output = Value;

    fn job_name(&self) -> &str {
        "mock job"
    }

    async fn start(&self, _params: &Value) -> Result<StartJobResponse, HyperbrowserError> {
        *self.start_calls.lock().unwrap() += 1;
        Ok(self.start.lock().unwrap().clone().unwrap_or_default())
    }

    async fn get_status(&self, _job_id: &str) -> Result<JobStatusResponse, HyperbrowserError> {
        *self.status_calls.lock().unwrap() += 1;
        let mut statuses = self.statuses.lock().unwrap();
        let status = if statuses.is_empty() {
            Ok(self.idle_status)
        } else {
            statuses.remove(0)
        };
        status.map(|status| JobStatusResponse { status })
    }

    async fn get(&self, job_id: &str) -> Result<Value, HyperbrowserError> {
        *self.get_calls.lock().unwrap() += 1;
        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            Ok(json!({"jobId": job_id, "status": "completed"}))
        } else {
            results.remove(0)
        }
    }
}

impl PagedJobApi for MockJobApi {
    type Item = Value;

    async fn get_page(
        &self,
        _job_id: &str,
        params: PageParams,
    ) -> Result<PagedJobResponse<Value>, HyperbrowserError> {
        self.requested_pages.lock().unwrap().push(params);
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            Ok(page(Vec::new(), 0, 0))
        } else {
            pages.remove(0)
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn transport_error() -> HyperbrowserError {
    HyperbrowserError::NetworkError("connection reset".into())
}

pub fn items(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({"url": format!("https://example.com/{i}")}))
        .collect()
}

pub fn page(data: Vec<Value>, current: u32, total: u32) -> PagedJobResponse<Value> {
    let mut page = PagedJobResponse::empty("job-1", JobStatus::Completed, 100);
    page.total_items = data.len() as u64;
    page.data = data;
    page.current_page_batch = current;
    page.total_page_batches = total;
    page
}
