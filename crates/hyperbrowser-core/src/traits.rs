use std::future::Future;

use crate::error::HyperbrowserError;
use crate::job::{JobStatusResponse, PageParams, PagedJobResponse, StartJobResponse};

/// Endpoint operations of one asynchronous job family.
///
/// The poll loop in [`JobWaiter`](crate::poll::JobWaiter) only needs these
/// three calls, so every family (scrape, crawl, extract, agents...) plugs
/// into the same loop by implementing this trait.
pub trait JobApi: Send + Sync {
    type Params: Send + Sync;
    type Output: Send;

    /// Human-readable family name used in errors and logs (e.g. "crawl job").
    fn job_name(&self) -> &str;

    /// Submit the job configuration.
    fn start(
        &self,
        params: &Self::Params,
    ) -> impl Future<Output = Result<StartJobResponse, HyperbrowserError>> + Send;

    /// Cheap single-field status probe.
    fn get_status(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<JobStatusResponse, HyperbrowserError>> + Send;

    /// Fetch the result without pagination parameters.
    fn get(
        &self,
        job_id: &str,
    ) -> impl Future<Output = Result<Self::Output, HyperbrowserError>> + Send;
}

/// Job families whose results are served in page batches.
pub trait PagedJobApi: JobApi {
    type Item: Send;

    fn get_page(
        &self,
        job_id: &str,
        params: PageParams,
    ) -> impl Future<Output = Result<PagedJobResponse<Self::Item>, HyperbrowserError>> + Send;
}
