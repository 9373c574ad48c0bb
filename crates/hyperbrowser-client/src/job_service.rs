use std::marker::PhantomData;

use hyperbrowser_core::{
    BasicResponse, HyperbrowserError, JobApi, JobStatusResponse, JobWaiter, PageParams,
    PagedJobApi, PagedJobResponse, PollConfig, StartJobResponse,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::transport::HttpTransport;

/// Request body of a job start call.
pub trait JobParams: Serialize + Send + Sync {
    /// Reject parameters the API would refuse, before any network call.
    fn validate(&self) -> Result<(), HyperbrowserError> {
        Ok(())
    }
}

/// Route and display name of one job family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobRoute {
    /// Path below `/api`, e.g. `/crawl`.
    pub path: &'static str,
    /// Used in errors and logs, e.g. `crawl job`.
    pub name: &'static str,
}

/// Client for one asynchronous job family.
///
/// `P` is the start payload and `R` the result document. Families whose
/// result is a [`PagedJobResponse`] also get the paginated operations.
pub struct JobService<P, R> {
    transport: HttpTransport,
    route: JobRoute,
    poll: PollConfig,
    _types: PhantomData<fn(&P) -> R>,
}

impl<P, R> Clone for JobService<P, R> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            route: self.route,
            poll: self.poll.clone(),
            _types: PhantomData,
        }
    }
}

impl<P, R> JobService<P, R> {
    pub(crate) fn new(transport: HttpTransport, route: JobRoute, poll: PollConfig) -> Self {
        Self {
            transport,
            route,
            poll,
            _types: PhantomData,
        }
    }

    pub fn route(&self) -> JobRoute {
        self.route
    }

    pub fn poll_config(&self) -> &PollConfig {
        &self.poll
    }

    /// Same service with a different polling policy.
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    fn job_path(&self, job_id: &str) -> String {
        format!("{}/{}", self.route.path, job_id)
    }
}

impl<P: JobParams, R: DeserializeOwned + Send> JobApi for JobService<P, R> {
    type Params = P;
    type Output = R;

    fn job_name(&self) -> &str {
        self.route.name
    }

    async fn start(&self, params: &P) -> Result<StartJobResponse, HyperbrowserError> {
        params.validate()?;
        self.transport.post(self.route.path, params).await
    }

    async fn get_status(&self, job_id: &str) -> Result<JobStatusResponse, HyperbrowserError> {
        let path = format!("{}/status", self.job_path(job_id));
        self.transport.get(&path, &[]).await
    }

    async fn get(&self, job_id: &str) -> Result<R, HyperbrowserError> {
        self.transport.get(&self.job_path(job_id), &[]).await
    }
}

impl<P: JobParams, R: DeserializeOwned + Send> JobService<P, R> {
    /// Submit a job and return its start response (job ID, live URL).
    pub async fn start(&self, params: &P) -> Result<StartJobResponse, HyperbrowserError> {
        JobApi::start(self, params).await
    }

    pub async fn get_status(&self, job_id: &str) -> Result<JobStatusResponse, HyperbrowserError> {
        JobApi::get_status(self, job_id).await
    }

    /// Fetch the job result without pagination parameters.
    pub async fn get(&self, job_id: &str) -> Result<R, HyperbrowserError> {
        JobApi::get(self, job_id).await
    }

    pub async fn stop(&self, job_id: &str) -> Result<BasicResponse, HyperbrowserError> {
        let path = format!("{}/stop", self.job_path(job_id));
        self.transport.put(&path, None::<&()>).await
    }

    /// Poll loop over this family, for callers that need a custom reporter.
    pub fn waiter(&self) -> JobWaiter<'_, Self> {
        JobWaiter::new(self, self.poll.clone())
    }

    /// Wait on an already started job and fetch its result.
    pub async fn wait_for(&self, job_id: &str) -> Result<R, HyperbrowserError> {
        self.waiter().wait(job_id).await
    }

    pub async fn start_and_wait(&self, params: &P) -> Result<R, HyperbrowserError> {
        self.waiter().start_and_wait(params).await
    }

    /// Like [`start_and_wait`](Self::start_and_wait), stopping early when
    /// `cancel_token` fires.
    pub async fn start_and_wait_with(
        &self,
        params: &P,
        cancel_token: CancellationToken,
    ) -> Result<R, HyperbrowserError> {
        self.waiter()
            .with_cancel_token(cancel_token)
            .start_and_wait(params)
            .await
    }
}

impl<P, I> PagedJobApi for JobService<P, PagedJobResponse<I>>
where
    P: JobParams,
    I: DeserializeOwned + Send,
{
    type Item = I;

    async fn get_page(
        &self,
        job_id: &str,
        params: PageParams,
    ) -> Result<PagedJobResponse<I>, HyperbrowserError> {
        let query = [
            ("page", params.page.map(|p| p.to_string())),
            ("batchSize", params.batch_size.map(|b| b.to_string())),
        ];
        self.transport.get(&self.job_path(job_id), &query).await
    }
}

impl<P, I> JobService<P, PagedJobResponse<I>>
where
    P: JobParams,
    I: DeserializeOwned + Send,
{
    pub async fn get_page(
        &self,
        job_id: &str,
        params: PageParams,
    ) -> Result<PagedJobResponse<I>, HyperbrowserError> {
        PagedJobApi::get_page(self, job_id, params).await
    }

    /// Wait on an already started job and collect every result page.
    pub async fn wait_for_all(&self, job_id: &str) -> Result<PagedJobResponse<I>, HyperbrowserError> {
        self.waiter().wait_all(job_id).await
    }

    /// Start a job, wait for it, and return all result pages merged.
    pub async fn start_and_wait_all(
        &self,
        params: &P,
    ) -> Result<PagedJobResponse<I>, HyperbrowserError> {
        self.waiter().start_and_wait_all(params).await
    }

    pub async fn start_and_wait_all_with(
        &self,
        params: &P,
        cancel_token: CancellationToken,
    ) -> Result<PagedJobResponse<I>, HyperbrowserError> {
        self.waiter()
            .with_cancel_token(cancel_token)
            .start_and_wait_all(params)
            .await
    }
}
