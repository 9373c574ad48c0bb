use hyperbrowser_core::{BasicResponse, HyperbrowserError};

use crate::transport::HttpTransport;
use crate::types::{
    CreateProfileParams, CreateProfileResponse, ProfileListParams, ProfileListResponse,
    ProfileResponse,
};

/// Persistent browser profiles.
#[derive(Clone)]
pub struct ProfilesService {
    transport: HttpTransport,
}

impl ProfilesService {
    pub(crate) fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub async fn create(
        &self,
        params: &CreateProfileParams,
    ) -> Result<CreateProfileResponse, HyperbrowserError> {
        self.transport.post("/profile", params).await
    }

    pub async fn get(&self, id: &str) -> Result<ProfileResponse, HyperbrowserError> {
        self.transport.get(&format!("/profile/{id}"), &[]).await
    }

    pub async fn delete(&self, id: &str) -> Result<BasicResponse, HyperbrowserError> {
        self.transport.delete(&format!("/profile/{id}")).await
    }

    pub async fn list(
        &self,
        params: &ProfileListParams,
    ) -> Result<ProfileListResponse, HyperbrowserError> {
        let query = [
            ("page", params.page.map(|p| p.to_string())),
            ("limit", params.limit.map(|l| l.to_string())),
            ("name", params.name.clone()),
        ];
        self.transport.get("/profiles", &query).await
    }
}
