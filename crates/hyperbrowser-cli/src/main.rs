use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use hyperbrowser_client::types::{
    BrowserUseTaskParams, ComputerUseTaskParams, FetchParams, StartBatchScrapeJobParams,
    StartCrawlJobParams, StartExtractJobParams, StartScrapeJobParams, WebSearchParams,
};
use hyperbrowser_client::{ClientConfig, Hyperbrowser};
use hyperbrowser_core::{JobStatus, SchemaInput};

#[derive(Parser)]
#[command(
    name = "hyperbrowser",
    version,
    about = "Run Hyperbrowser scrape, crawl, extract and agent jobs"
)]
struct Cli {
    /// API key (reads from HYPERBROWSER_API_KEY env var if not provided)
    #[arg(long, env = "HYPERBROWSER_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "HYPERBROWSER_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Give up waiting on a job after this many seconds
    #[arg(long, global = true)]
    deadline_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a single page
    Scrape {
        #[arg(short, long)]
        url: String,
    },

    /// Scrape several pages in one job
    BatchScrape {
        /// Target URL (repeatable)
        #[arg(short, long = "url", required = true)]
        urls: Vec<String>,
    },

    /// Crawl a site and collect every page
    Crawl {
        #[arg(short, long)]
        url: String,

        #[arg(long)]
        max_pages: Option<u32>,

        /// Do not follow links from the start page
        #[arg(long, default_value_t = false)]
        single_page: bool,
    },

    /// Extract structured data from one or more pages
    Extract {
        /// Target URL (repeatable)
        #[arg(short, long = "url", required = true)]
        urls: Vec<String>,

        /// Natural-language description of the data to extract
        #[arg(short, long)]
        prompt: Option<String>,

        /// Path to JSON Schema file defining the output shape
        #[arg(short, long)]
        schema: Option<PathBuf>,
    },

    /// Fetch a page synchronously
    Fetch {
        #[arg(short, long)]
        url: String,
    },

    /// Search the web
    Search {
        #[arg(short, long)]
        query: String,
    },

    /// Run a browser agent task
    Agent {
        #[arg(short, long)]
        task: String,

        #[arg(short, long, value_enum, default_value_t = AgentKind::BrowserUse)]
        kind: AgentKind,
    },

    /// Show the team's credit balance
    Credits,
}

#[derive(Clone, Copy, ValueEnum)]
enum AgentKind {
    BrowserUse,
    Cua,
    Claude,
    Gemini,
    HyperAgent,
}

/// JSON to print, plus the job status when the command ran a job.
struct Outcome {
    json: Value,
    status: Option<JobStatus>,
}

impl Outcome {
    fn job<T: serde::Serialize>(result: &T, status: JobStatus) -> Result<Self> {
        Ok(Self {
            json: serde_json::to_value(result)?,
            status: Some(status),
        })
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hyperbrowser=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let hb = build_client(&cli)?;

    let cancel_token = CancellationToken::new();
    let on_interrupt = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling wait");
            on_interrupt.cancel();
        }
    });

    let outcome = run(&hb, cli.command, cancel_token).await?;
    println!("{}", serde_json::to_string_pretty(&outcome.json)?);

    if outcome.status == Some(JobStatus::Failed) {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn build_client(cli: &Cli) -> Result<Hyperbrowser> {
    let api_key = cli
        .api_key
        .clone()
        .context("No API key. Pass --api-key or set HYPERBROWSER_API_KEY.")?;

    let mut config = ClientConfig::new(api_key)?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(secs) = cli.deadline_secs {
        let poll = config.poll.clone().with_deadline(Duration::from_secs(secs));
        config = config.with_poll_config(poll);
    }

    Hyperbrowser::new(config).context("Failed to create Hyperbrowser client")
}

async fn run(hb: &Hyperbrowser, command: Commands, cancel: CancellationToken) -> Result<Outcome> {
    match command {
        Commands::Scrape { url } => {
            tracing::info!(%url, "Scraping");
            let result = hb
                .scrape()
                .start_and_wait_with(&StartScrapeJobParams::new(url), cancel)
                .await
                .context("Scrape failed")?;
            Outcome::job(&result, result.status)
        }
        Commands::BatchScrape { urls } => {
            tracing::info!(urls = urls.len(), "Batch scraping");
            let params = StartBatchScrapeJobParams {
                urls,
                ..Default::default()
            };
            let result = hb
                .batch_scrape()
                .start_and_wait_all_with(&params, cancel)
                .await
                .context("Batch scrape failed")?;
            Outcome::job(&result, result.status)
        }
        Commands::Crawl {
            url,
            max_pages,
            single_page,
        } => {
            tracing::info!(%url, "Crawling");
            let params = StartCrawlJobParams {
                max_pages,
                follow_links: single_page.then_some(false),
                ..StartCrawlJobParams::new(url)
            };
            let result = hb
                .crawl()
                .start_and_wait_all_with(&params, cancel)
                .await
                .context("Crawl failed")?;
            tracing::info!(pages = result.data.len(), "Crawl finished");
            Outcome::job(&result, result.status)
        }
        Commands::Extract {
            urls,
            prompt,
            schema,
        } => {
            let mut params = StartExtractJobParams::new(urls);
            params.prompt = prompt;
            if let Some(path) = schema {
                let schema = SchemaInput::from_file(&path)
                    .with_context(|| format!("Failed to load schema {}", path.display()))?;
                params.schema = Some(schema);
            }
            let result = hb
                .extract()
                .start_and_wait_with(&params, cancel)
                .await
                .context("Extract failed")?;
            Outcome::job(&result, result.status)
        }
        Commands::Fetch { url } => {
            let result = hb
                .web()
                .fetch(&FetchParams::new(url))
                .await
                .context("Fetch failed")?;
            Outcome::job(&result, result.status)
        }
        Commands::Search { query } => {
            let result = hb
                .web()
                .search(&WebSearchParams::new(query))
                .await
                .context("Search failed")?;
            Outcome::job(&result, result.status)
        }
        Commands::Agent { task, kind } => {
            let agents = hb.agents();
            let result = match kind {
                AgentKind::BrowserUse => {
                    agents
                        .browser_use()
                        .start_and_wait_with(&BrowserUseTaskParams::new(task), cancel)
                        .await
                }
                AgentKind::Cua => {
                    agents
                        .cua()
                        .start_and_wait_with(&ComputerUseTaskParams::new(task), cancel)
                        .await
                }
                AgentKind::Claude => {
                    agents
                        .claude_computer_use()
                        .start_and_wait_with(&ComputerUseTaskParams::new(task), cancel)
                        .await
                }
                AgentKind::Gemini => {
                    agents
                        .gemini_computer_use()
                        .start_and_wait_with(&ComputerUseTaskParams::new(task), cancel)
                        .await
                }
                AgentKind::HyperAgent => {
                    agents
                        .hyper_agent()
                        .start_and_wait_with(&ComputerUseTaskParams::new(task), cancel)
                        .await
                }
            }
            .context("Agent task failed")?;
            Outcome::job(&result, result.status)
        }
        Commands::Credits => {
            let credits = hb
                .team()
                .credit_info()
                .await
                .context("Failed to get credit info")?;
            Ok(Outcome {
                json: Value::Object(credits),
                status: None,
            })
        }
    }
}
