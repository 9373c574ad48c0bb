use hyperbrowser_core::PagedJobResponse;

use crate::job_service::{JobParams, JobRoute, JobService};
use crate::types::{ScrapeJobResponse, ScrapedPage, StartBatchScrapeJobParams, StartScrapeJobParams};

pub(crate) const SCRAPE: JobRoute = JobRoute {
    path: "/scrape",
    name: "scrape job",
};

pub(crate) const BATCH_SCRAPE: JobRoute = JobRoute {
    path: "/scrape/batch",
    name: "batch scrape job",
};

/// Single-page scrape jobs.
pub type ScrapeService = JobService<StartScrapeJobParams, ScrapeJobResponse>;

/// Multi-URL scrape jobs, results served in page batches.
pub type BatchScrapeService = JobService<StartBatchScrapeJobParams, PagedJobResponse<ScrapedPage>>;

impl JobParams for StartScrapeJobParams {}

impl JobParams for StartBatchScrapeJobParams {}
