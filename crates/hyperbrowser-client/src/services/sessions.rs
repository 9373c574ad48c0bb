use std::sync::{Arc, Once};

use hyperbrowser_core::{BasicResponse, HyperbrowserError};

use crate::transport::HttpTransport;
use crate::types::session::SessionUpdate;
use crate::types::{
    CreateSessionParams, SessionDetail, SessionDownloadsUrl, SessionListParams,
    SessionListResponse, SessionRecording, SessionRecordingUrl, UpdateSessionProfileParams,
};

/// Browser session management.
#[derive(Clone)]
pub struct SessionsService {
    transport: HttpTransport,
    legacy_call_warnings: bool,
    legacy_warned: Arc<Once>,
}

impl SessionsService {
    pub(crate) fn new(transport: HttpTransport, legacy_call_warnings: bool) -> Self {
        Self {
            transport,
            legacy_call_warnings,
            legacy_warned: Arc::new(Once::new()),
        }
    }

    pub async fn create(
        &self,
        params: &CreateSessionParams,
    ) -> Result<SessionDetail, HyperbrowserError> {
        self.transport.post("/session", params).await
    }

    pub async fn get(&self, id: &str) -> Result<SessionDetail, HyperbrowserError> {
        self.transport.get(&format!("/session/{id}"), &[]).await
    }

    pub async fn stop(&self, id: &str) -> Result<BasicResponse, HyperbrowserError> {
        self.transport
            .put(&format!("/session/{id}/stop"), None::<&()>)
            .await
    }

    pub async fn list(
        &self,
        params: &SessionListParams,
    ) -> Result<SessionListResponse, HyperbrowserError> {
        let query = [
            ("status", params.status.map(|s| s.to_string())),
            ("page", params.page.map(|p| p.to_string())),
            ("limit", params.limit.map(|l| l.to_string())),
        ];
        self.transport.get("/sessions", &query).await
    }

    pub async fn get_recording(
        &self,
        id: &str,
    ) -> Result<Vec<SessionRecording>, HyperbrowserError> {
        self.transport
            .get(&format!("/session/{id}/recording"), &[])
            .await
    }

    pub async fn get_recording_url(
        &self,
        id: &str,
    ) -> Result<SessionRecordingUrl, HyperbrowserError> {
        self.transport
            .get(&format!("/session/{id}/recording-url"), &[])
            .await
    }

    pub async fn get_downloads_url(
        &self,
        id: &str,
    ) -> Result<SessionDownloadsUrl, HyperbrowserError> {
        self.transport
            .get(&format!("/session/{id}/downloads-url"), &[])
            .await
    }

    /// Update the profile settings of a running session.
    pub async fn update_profile_params(
        &self,
        id: &str,
        params: &UpdateSessionProfileParams,
    ) -> Result<BasicResponse, HyperbrowserError> {
        self.transport
            .put(
                &format!("/session/{id}/update"),
                Some(&SessionUpdate::Profile(params)),
            )
            .await
    }

    /// Boolean form of [`update_profile_params`](Self::update_profile_params).
    #[deprecated(note = "use `update_profile_params`")]
    pub async fn update_profile_persist(
        &self,
        id: &str,
        persist_changes: bool,
    ) -> Result<BasicResponse, HyperbrowserError> {
        if self.legacy_call_warnings {
            self.legacy_warned.call_once(|| {
                tracing::warn!(
                    "update_profile_persist(id, bool) is deprecated; \
                     call update_profile_params(id, &UpdateSessionProfileParams {{ persist_changes }}) instead"
                );
            });
        }

        let params = UpdateSessionProfileParams {
            persist_changes: Some(persist_changes),
        };
        self.update_profile_params(id, &params).await
    }
}
