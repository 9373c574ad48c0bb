use hyperbrowser_core::HyperbrowserError;

use crate::config::ClientConfig;
use crate::job_service::JobService;
use crate::services::{
    AgentsService, BATCH_SCRAPE, BatchScrapeService, CRAWL, ComputerActionService, CrawlService,
    EXTRACT, ExtensionsService, ExtractService, ProfilesService, SCRAPE, ScrapeService,
    SessionsService, TeamService, WebService,
};
use crate::transport::HttpTransport;

/// Entry point to the Hyperbrowser API.
///
/// Every service shares one connection pool. The client holds no mutable
/// state, so concurrent operations through a shared reference are safe.
#[derive(Clone)]
pub struct Hyperbrowser {
    sessions: SessionsService,
    computer_action: ComputerActionService,
    profiles: ProfilesService,
    extensions: ExtensionsService,
    team: TeamService,
    scrape: ScrapeService,
    batch_scrape: BatchScrapeService,
    crawl: CrawlService,
    extract: ExtractService,
    web: WebService,
    agents: AgentsService,
}

impl Hyperbrowser {
    pub fn new(config: ClientConfig) -> Result<Self, HyperbrowserError> {
        let transport = HttpTransport::new(&config)?;
        let poll = config.poll;

        tracing::debug!(base_url = %config.base_url, "Hyperbrowser client configured");

        Ok(Self {
            sessions: SessionsService::new(transport.clone(), config.legacy_call_warnings),
            computer_action: ComputerActionService::new(transport.clone()),
            profiles: ProfilesService::new(transport.clone()),
            extensions: ExtensionsService::new(transport.clone()),
            team: TeamService::new(transport.clone()),
            scrape: JobService::new(transport.clone(), SCRAPE, poll.clone()),
            batch_scrape: JobService::new(transport.clone(), BATCH_SCRAPE, poll.clone()),
            crawl: JobService::new(transport.clone(), CRAWL, poll.clone()),
            extract: JobService::new(transport.clone(), EXTRACT, poll.clone()),
            web: WebService::new(transport.clone(), poll.clone()),
            agents: AgentsService::new(transport, poll),
        })
    }

    /// Build a client from `HYPERBROWSER_*` environment variables.
    pub fn from_env() -> Result<Self, HyperbrowserError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn sessions(&self) -> &SessionsService {
        &self.sessions
    }

    pub fn computer_action(&self) -> &ComputerActionService {
        &self.computer_action
    }

    pub fn profiles(&self) -> &ProfilesService {
        &self.profiles
    }

    pub fn extensions(&self) -> &ExtensionsService {
        &self.extensions
    }

    pub fn team(&self) -> &TeamService {
        &self.team
    }

    pub fn scrape(&self) -> &ScrapeService {
        &self.scrape
    }

    pub fn batch_scrape(&self) -> &BatchScrapeService {
        &self.batch_scrape
    }

    pub fn crawl(&self) -> &CrawlService {
        &self.crawl
    }

    pub fn extract(&self) -> &ExtractService {
        &self.extract
    }

    pub fn web(&self) -> &WebService {
        &self.web
    }

    pub fn agents(&self) -> &AgentsService {
        &self.agents
    }
}
