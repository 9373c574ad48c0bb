use hyperbrowser_core::{HyperbrowserError, SchemaInput};

use crate::job_service::{JobParams, JobRoute, JobService};
use crate::types::{ExtractJobResponse, StartExtractJobParams};

pub(crate) const EXTRACT: JobRoute = JobRoute {
    path: "/extract",
    name: "extract job",
};

pub type ExtractService = JobService<StartExtractJobParams, ExtractJobResponse>;

impl JobParams for StartExtractJobParams {
    fn validate(&self) -> Result<(), HyperbrowserError> {
        require_schema_or_prompt(self.schema.as_ref(), self.prompt.as_deref())
    }
}

/// Prompt-driven jobs need a non-blank prompt, a schema, or both.
pub(crate) fn require_schema_or_prompt(
    schema: Option<&SchemaInput>,
    prompt: Option<&str>,
) -> Result<(), HyperbrowserError> {
    let has_prompt = prompt.is_some_and(|p| !p.trim().is_empty());
    if schema.is_none() && !has_prompt {
        return Err(HyperbrowserError::InvalidParams(
            "Either schema or prompt must be provided".into(),
        ));
    }
    Ok(())
}
