pub mod error;
pub mod job;
pub mod poll;
pub mod schema;
pub mod traits;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::HyperbrowserError;
pub use job::{
    BasicResponse, JobStatus, JobStatusResponse, PageParams, PagedJobResponse, PollConfig,
    StartJobResponse,
};
pub use poll::{JobWaiter, TracingWaitReporter, WaitEvent, WaitReporter};
pub use schema::SchemaInput;
pub use traits::{JobApi, PagedJobApi};
