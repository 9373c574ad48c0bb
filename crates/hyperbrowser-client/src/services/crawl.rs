use hyperbrowser_core::PagedJobResponse;

use crate::job_service::{JobParams, JobRoute, JobService};
use crate::types::{CrawledPage, StartCrawlJobParams};

pub(crate) const CRAWL: JobRoute = JobRoute {
    path: "/crawl",
    name: "crawl job",
};

pub type CrawlService = JobService<StartCrawlJobParams, PagedJobResponse<CrawledPage>>;

impl JobParams for StartCrawlJobParams {}
