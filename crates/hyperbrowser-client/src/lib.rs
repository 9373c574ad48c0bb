//! Client for the Hyperbrowser browser automation API.
//!
//! Long-running work (scrapes, crawls, extractions, agent tasks) runs as
//! remote jobs. Each job family is a [`JobService`] offering the raw
//! start/status/get/stop calls plus start-and-wait operations that poll
//! until the job finishes and, for paged families, merge every result page.

pub mod client;
pub mod config;
pub mod job_service;
pub mod services;
pub mod transport;
pub mod types;

pub use client::Hyperbrowser;
pub use config::ClientConfig;
pub use job_service::{JobParams, JobRoute, JobService};
pub use services::*;

pub use hyperbrowser_core::{
    HyperbrowserError, JobStatus, PageParams, PagedJobResponse, PollConfig, SchemaInput,
};
