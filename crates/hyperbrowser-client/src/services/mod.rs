mod account;
mod agents;
mod computer_action;
mod crawl;
mod extract;
mod profiles;
mod scrape;
mod sessions;
mod web;

pub use account::{ExtensionsService, TeamService};
pub use agents::{AgentsService, BrowserUseService, ComputerUseService};
pub use computer_action::ComputerActionService;
pub use crawl::CrawlService;
pub use extract::ExtractService;
pub use profiles::ProfilesService;
pub use scrape::{BatchScrapeService, ScrapeService};
pub use sessions::SessionsService;
pub use web::{BatchFetchService, DeepFetchService, WebCrawlService, WebService};

pub(crate) use crawl::CRAWL;
pub(crate) use extract::EXTRACT;
pub(crate) use scrape::{BATCH_SCRAPE, SCRAPE};
