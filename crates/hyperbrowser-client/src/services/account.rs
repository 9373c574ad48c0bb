use hyperbrowser_core::HyperbrowserError;

use crate::transport::HttpTransport;
use crate::types::{ExtensionResponse, TeamCreditInfo};

/// Installed browser extensions.
#[derive(Clone)]
pub struct ExtensionsService {
    transport: HttpTransport,
}

impl ExtensionsService {
    pub(crate) fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<ExtensionResponse>, HyperbrowserError> {
        self.transport.get("/extensions/list", &[]).await
    }
}

#[derive(Clone)]
pub struct TeamService {
    transport: HttpTransport,
}

impl TeamService {
    pub(crate) fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub async fn credit_info(&self) -> Result<TeamCreditInfo, HyperbrowserError> {
        self.transport.get("/team/credit-info", &[]).await
    }
}
