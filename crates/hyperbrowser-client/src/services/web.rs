use hyperbrowser_core::{HyperbrowserError, PagedJobResponse, PollConfig};

use super::extract::require_schema_or_prompt;
use crate::job_service::{JobParams, JobRoute, JobService};
use crate::transport::HttpTransport;
use crate::types::{
    DeepFetchJobResponse, FetchParams, FetchResponse, PageData, StartBatchFetchJobParams,
    StartDeepFetchJobParams, StartWebCrawlJobParams, WebSearchParams, WebSearchResponse,
};

pub(crate) const BATCH_FETCH: JobRoute = JobRoute {
    path: "/web/batch-fetch",
    name: "batch fetch job",
};

pub(crate) const WEB_CRAWL: JobRoute = JobRoute {
    path: "/web/crawl",
    name: "web crawl job",
};

pub(crate) const DEEP_FETCH: JobRoute = JobRoute {
    path: "/web/deep-fetch",
    name: "deep fetch job",
};

pub type BatchFetchService = JobService<StartBatchFetchJobParams, PagedJobResponse<PageData>>;

pub type WebCrawlService = JobService<StartWebCrawlJobParams, PagedJobResponse<PageData>>;

impl JobParams for StartBatchFetchJobParams {}

impl JobParams for StartWebCrawlJobParams {}

pub type DeepFetchService = JobService<StartDeepFetchJobParams, DeepFetchJobResponse>;

impl JobParams for StartDeepFetchJobParams {
    fn validate(&self) -> Result<(), HyperbrowserError> {
        require_schema_or_prompt(self.schema.as_ref(), self.prompt.as_deref())
    }
}

/// Web fetch and search, plus the batch fetch, web crawl and deep fetch
/// job families.
#[derive(Clone)]
pub struct WebService {
    transport: HttpTransport,
    batch_fetch: BatchFetchService,
    crawl: WebCrawlService,
    deep_fetch: DeepFetchService,
}

impl WebService {
    pub(crate) fn new(transport: HttpTransport, poll: PollConfig) -> Self {
        Self {
            batch_fetch: JobService::new(transport.clone(), BATCH_FETCH, poll.clone()),
            crawl: JobService::new(transport.clone(), WEB_CRAWL, poll.clone()),
            deep_fetch: JobService::new(transport.clone(), DEEP_FETCH, poll),
            transport,
        }
    }

    /// Fetch one page synchronously.
    pub async fn fetch(&self, params: &FetchParams) -> Result<FetchResponse, HyperbrowserError> {
        self.transport.post("/web/fetch", params).await
    }

    pub async fn search(
        &self,
        params: &WebSearchParams,
    ) -> Result<WebSearchResponse, HyperbrowserError> {
        self.transport.post("/web/search", params).await
    }

    pub fn batch_fetch(&self) -> &BatchFetchService {
        &self.batch_fetch
    }

    pub fn crawl(&self) -> &WebCrawlService {
        &self.crawl
    }

    pub fn deep_fetch(&self) -> &DeepFetchService {
        &self.deep_fetch
    }
}
