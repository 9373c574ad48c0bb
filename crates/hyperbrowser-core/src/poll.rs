//! Start-and-wait protocol shared by every asynchronous job family.
//!
//! A wait runs in up to three phases, each strictly sequential:
//!
//! ```text
//! start ──> poll status every `poll_interval` ──> terminal
//!                                                   │
//!                       ┌───────────────────────────┴──────────────┐
//!                 single result fetch                collect pages 1..=totalPageBatches
//!                 (retry every page_interval)        (retry every page_interval)
//! ```
//!
//! Transport failures are retried up to `max_failures` consecutive times per
//! phase; any successful response resets the counter. A job that ends in
//! `failed` is not an error here: its result is returned like any other.
//! Cancellation and the optional deadline are checked before every request
//! and sleep, and also interrupt requests and sleeps already in flight.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::HyperbrowserError;
use crate::job::{JobStatus, JobStatusResponse, PageParams, PagedJobResponse, PollConfig};
use crate::traits::{JobApi, PagedJobApi};

/// Events emitted while waiting on a job.
#[derive(Debug, Clone)]
pub enum WaitEvent<'a> {
    Started {
        job: &'a str,
        job_id: &'a str,
    },
    StatusChecked {
        job_id: &'a str,
        status: JobStatus,
    },
    PollFailed {
        job_id: &'a str,
        attempt: u32,
        max_attempts: u32,
        error: &'a HyperbrowserError,
    },
    Terminal {
        job_id: &'a str,
        status: JobStatus,
    },
    ResultFailed {
        job_id: &'a str,
        attempt: u32,
        max_attempts: u32,
        error: &'a HyperbrowserError,
    },
    PageFetched {
        job_id: &'a str,
        page: u32,
        total_pages: u32,
        items: usize,
    },
    PageFailed {
        job_id: &'a str,
        page: u32,
        attempt: u32,
        max_attempts: u32,
        error: &'a HyperbrowserError,
    },
    PagesCollected {
        job_id: &'a str,
        items: usize,
    },
}

/// Trait for receiving wait events (decoupled logging).
pub trait WaitReporter: Send + Sync {
    fn report(&self, event: WaitEvent<'_>) {
        let _ = event;
    }
}

/// Reporter that uses the `tracing` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWaitReporter;

impl WaitReporter for TracingWaitReporter {
    fn report(&self, event: WaitEvent<'_>) {
        match event {
            WaitEvent::Started { job, job_id } => {
                tracing::info!(%job, %job_id, "Job started");
            }
            WaitEvent::StatusChecked { job_id, status } => {
                tracing::debug!(%job_id, %status, "Job status checked");
            }
            WaitEvent::PollFailed {
                job_id,
                attempt,
                max_attempts,
                error,
            } => {
                tracing::warn!(%job_id, attempt, max_attempts, %error, "Status poll failed");
            }
            WaitEvent::Terminal { job_id, status } => {
                tracing::info!(%job_id, %status, "Job reached terminal status");
            }
            WaitEvent::ResultFailed {
                job_id,
                attempt,
                max_attempts,
                error,
            } => {
                tracing::warn!(%job_id, attempt, max_attempts, %error, "Result fetch failed");
            }
            WaitEvent::PageFetched {
                job_id,
                page,
                total_pages,
                items,
            } => {
                tracing::debug!(%job_id, page, total_pages, items, "Result page fetched");
            }
            WaitEvent::PageFailed {
                job_id,
                page,
                attempt,
                max_attempts,
                error,
            } => {
                tracing::warn!(%job_id, page, attempt, max_attempts, %error, "Result page fetch failed");
            }
            WaitEvent::PagesCollected { job_id, items } => {
                tracing::info!(%job_id, items, "All result pages collected");
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Deadline {
    at: Instant,
    limit: Duration,
}

/// Drives one job family through start, status polling and result retrieval.
///
/// A waiter only reads the API handle and owns its counters, so any number
/// of waiters may run concurrently against the same client.
pub struct JobWaiter<'a, A: JobApi> {
    api: &'a A,
    config: PollConfig,
    cancel_token: CancellationToken,
    reporter: Arc<dyn WaitReporter>,
}

impl<'a, A: JobApi> JobWaiter<'a, A> {
    pub fn new(api: &'a A, config: PollConfig) -> Self {
        Self {
            api,
            config,
            cancel_token: CancellationToken::new(),
            reporter: Arc::new(TracingWaitReporter),
        }
    }

    pub fn with_cancel_token(mut self, cancel_token: CancellationToken) -> Self {
        self.cancel_token = cancel_token;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn WaitReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Start a job, wait for a terminal status, then fetch its result once.
    pub async fn start_and_wait(&self, params: &A::Params) -> Result<A::Output, HyperbrowserError> {
        let deadline = self.deadline();
        let job_id = self.start_job(params, deadline).await?;
        self.poll_until_terminal(&job_id, deadline).await?;
        self.fetch_result(&job_id, deadline).await
    }

    /// Wait on an already started job and fetch its result once.
    pub async fn wait(&self, job_id: &str) -> Result<A::Output, HyperbrowserError> {
        let deadline = self.deadline();
        self.poll_until_terminal(job_id, deadline).await?;
        self.fetch_result(job_id, deadline).await
    }

    /// Poll the status endpoint until the job reaches a terminal status.
    pub async fn wait_for_terminal(&self, job_id: &str) -> Result<JobStatus, HyperbrowserError> {
        self.poll_until_terminal(job_id, self.deadline()).await
    }

    async fn start_job(
        &self,
        params: &A::Params,
        deadline: Option<Deadline>,
    ) -> Result<String, HyperbrowserError> {
        let job = self.api.job_name();
        let started = self
            .interruptible(job, deadline, self.api.start(params))
            .await?;

        // A start response without an ID is malformed, not transient.
        match started.job_id {
            Some(job_id) if !job_id.is_empty() => {
                self.reporter.report(WaitEvent::Started {
                    job,
                    job_id: &job_id,
                });
                Ok(job_id)
            }
            _ => Err(HyperbrowserError::MissingJobId {
                job: job.to_string(),
            }),
        }
    }

    async fn poll_until_terminal(
        &self,
        job_id: &str,
        deadline: Option<Deadline>,
    ) -> Result<JobStatus, HyperbrowserError> {
        let what = self.describe(job_id);
        let max_attempts = self.config.max_failures;
        let mut failures = 0;

        loop {
            match self
                .interruptible(&what, deadline, self.api.get_status(job_id))
                .await
            {
                Ok(JobStatusResponse { status }) => {
                    self.reporter
                        .report(WaitEvent::StatusChecked { job_id, status });
                    if status.is_terminal() {
                        self.reporter.report(WaitEvent::Terminal { job_id, status });
                        return Ok(status);
                    }
                    failures = 0;
                }
                Err(e) if e.is_interruption() => return Err(e),
                Err(e) => {
                    failures += 1;
                    self.reporter.report(WaitEvent::PollFailed {
                        job_id,
                        attempt: failures,
                        max_attempts,
                        error: &e,
                    });
                    if failures >= max_attempts {
                        return Err(HyperbrowserError::PollFailed {
                            job: self.api.job_name().to_string(),
                            job_id: job_id.to_string(),
                            attempts: max_attempts,
                            source: Box::new(e),
                        });
                    }
                }
            }

            self.pause(&what, deadline, self.config.poll_interval)
                .await?;
        }
    }

    async fn fetch_result(
        &self,
        job_id: &str,
        deadline: Option<Deadline>,
    ) -> Result<A::Output, HyperbrowserError> {
        let what = self.describe(job_id);
        let max_attempts = self.config.max_failures;
        let mut failures = 0;

        loop {
            match self
                .interruptible(&what, deadline, self.api.get(job_id))
                .await
            {
                Ok(output) => return Ok(output),
                Err(e) if e.is_interruption() => return Err(e),
                Err(e) => {
                    failures += 1;
                    self.reporter.report(WaitEvent::ResultFailed {
                        job_id,
                        attempt: failures,
                        max_attempts,
                        error: &e,
                    });
                    if failures >= max_attempts {
                        return Err(HyperbrowserError::FetchFailed {
                            job: self.api.job_name().to_string(),
                            job_id: job_id.to_string(),
                            attempts: max_attempts,
                            source: Box::new(e),
                        });
                    }
                }
            }

            self.pause(&what, deadline, self.config.page_interval)
                .await?;
        }
    }

    fn describe(&self, job_id: &str) -> String {
        format!("{} {}", self.api.job_name(), job_id)
    }

    fn deadline(&self) -> Option<Deadline> {
        self.config.deadline.map(|limit| Deadline {
            at: Instant::now() + limit,
            limit,
        })
    }

    async fn pause(
        &self,
        what: &str,
        deadline: Option<Deadline>,
        interval: Duration,
    ) -> Result<(), HyperbrowserError> {
        self.interruptible(what, deadline, async {
            tokio::time::sleep(interval).await;
            Ok(())
        })
        .await
    }

    /// Run `fut` unless the wait is cancelled or past its deadline.
    async fn interruptible<T, F>(
        &self,
        what: &str,
        deadline: Option<Deadline>,
        fut: F,
    ) -> Result<T, HyperbrowserError>
    where
        F: Future<Output = Result<T, HyperbrowserError>>,
    {
        let cancelled = || HyperbrowserError::Cancelled(what.to_string());
        let exceeded = |limit: Duration| HyperbrowserError::DeadlineExceeded {
            what: what.to_string(),
            limit,
        };

        if self.cancel_token.is_cancelled() {
            return Err(cancelled());
        }
        if let Some(d) = deadline {
            if Instant::now() >= d.at {
                return Err(exceeded(d.limit));
            }
        }

        let limit = deadline.map(|d| d.limit).unwrap_or_default();
        let expiry = async move {
            match deadline {
                Some(d) => tokio::time::sleep_until(d.at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel_token.cancelled() => Err(cancelled()),
            () = expiry => Err(exceeded(limit)),
            result = fut => result,
        }
    }
}

impl<'a, A: PagedJobApi> JobWaiter<'a, A> {
    /// Start a job, wait for a terminal status, then collect every result page.
    pub async fn start_and_wait_all(
        &self,
        params: &A::Params,
    ) -> Result<PagedJobResponse<A::Item>, HyperbrowserError> {
        let deadline = self.deadline();
        let job_id = self.start_job(params, deadline).await?;
        let status = self.poll_until_terminal(&job_id, deadline).await?;
        self.collect_pages(&job_id, status, deadline).await
    }

    /// Wait on an already started job and collect every result page.
    pub async fn wait_all(
        &self,
        job_id: &str,
    ) -> Result<PagedJobResponse<A::Item>, HyperbrowserError> {
        let deadline = self.deadline();
        let status = self.poll_until_terminal(job_id, deadline).await?;
        self.collect_pages(job_id, status, deadline).await
    }

    /// Fetch pages 1..=totalPageBatches into one aggregate.
    ///
    /// At least one page is always fetched so the aggregate's metadata comes
    /// from a real response, even for an empty result set.
    async fn collect_pages(
        &self,
        job_id: &str,
        status: JobStatus,
        deadline: Option<Deadline>,
    ) -> Result<PagedJobResponse<A::Item>, HyperbrowserError> {
        let what = self.describe(job_id);
        let max_attempts = self.config.max_failures;
        let batch_size = self.config.batch_size;
        let mut aggregate = PagedJobResponse::empty(job_id, status, batch_size);
        let mut failures = 0;
        let mut first_check = true;

        while first_check || aggregate.has_more_pages() {
            let page = aggregate.current_page_batch + 1;
            match self
                .interruptible(
                    &what,
                    deadline,
                    self.api.get_page(job_id, PageParams::new(page, batch_size)),
                )
                .await
            {
                Ok(response) => {
                    let items = response.data.len();
                    aggregate.absorb(response);
                    self.reporter.report(WaitEvent::PageFetched {
                        job_id,
                        page,
                        total_pages: aggregate.total_page_batches,
                        items,
                    });
                    failures = 0;
                    first_check = false;
                }
                Err(e) if e.is_interruption() => return Err(e),
                Err(e) => {
                    failures += 1;
                    self.reporter.report(WaitEvent::PageFailed {
                        job_id,
                        page,
                        attempt: failures,
                        max_attempts,
                        error: &e,
                    });
                    if failures >= max_attempts {
                        return Err(HyperbrowserError::PageFailed {
                            job: self.api.job_name().to_string(),
                            job_id: job_id.to_string(),
                            page,
                            attempts: max_attempts,
                            source: Box::new(e),
                        });
                    }
                }
            }

            if !first_check && !aggregate.has_more_pages() {
                break;
            }
            self.pause(&what, deadline, self.config.page_interval)
                .await?;
        }

        self.reporter.report(WaitEvent::PagesCollected {
            job_id,
            items: aggregate.data.len(),
        });
        Ok(aggregate)
    }
}
