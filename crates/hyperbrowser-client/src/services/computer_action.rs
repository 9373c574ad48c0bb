use hyperbrowser_core::HyperbrowserError;

use crate::transport::HttpTransport;
use crate::types::{
    ComputerAction, ComputerActionResponse, Coordinate, MouseButton, SessionDetail, SessionTarget,
};

/// Mouse, keyboard and clipboard control of a running session.
///
/// Actions go to the session's own `computerActionEndpoint`, so a session
/// given by ID costs one extra lookup per call. Pass a [`SessionDetail`]
/// to skip it.
#[derive(Clone)]
pub struct ComputerActionService {
    transport: HttpTransport,
}

impl ComputerActionService {
    pub(crate) fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Send any action to the session.
    pub async fn execute<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        action: &ComputerAction,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let endpoint = match session.into() {
            SessionTarget::Id(id) => {
                let detail: SessionDetail =
                    self.transport.get(&format!("/session/{id}"), &[]).await?;
                endpoint_of(&detail)?
            }
            SessionTarget::Detail(detail) => endpoint_of(detail)?,
        };

        tracing::debug!(?action, "Sending computer action");
        self.transport.post_url(&endpoint, action).await
    }

    pub async fn click<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        x: i32,
        y: i32,
        button: MouseButton,
        num_clicks: u32,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::Click {
            x,
            y,
            button,
            num_clicks,
            return_screenshot,
        };
        self.execute(session, &action).await
    }

    pub async fn type_text<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        text: impl Into<String>,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::TypeText {
            text: text.into(),
            return_screenshot,
        };
        self.execute(session, &action).await
    }

    pub async fn screenshot<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        self.execute(session, &ComputerAction::Screenshot).await
    }

    /// Press a key combination, e.g. `["Control", "a"]`.
    pub async fn press_keys<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        keys: Vec<String>,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::PressKeys {
            keys,
            return_screenshot,
        };
        self.execute(session, &action).await
    }

    pub async fn drag<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        path: Vec<Coordinate>,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::Drag {
            path,
            return_screenshot,
        };
        self.execute(session, &action).await
    }

    pub async fn move_mouse<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        x: i32,
        y: i32,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::MoveMouse {
            x,
            y,
            return_screenshot,
        };
        self.execute(session, &action).await
    }

    /// Scroll by (`scroll_x`, `scroll_y`) with the pointer at (`x`, `y`).
    pub async fn scroll<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        x: i32,
        y: i32,
        scroll_x: i32,
        scroll_y: i32,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::Scroll {
            x,
            y,
            scroll_x,
            scroll_y,
            return_screenshot,
        };
        self.execute(session, &action).await
    }

    pub async fn hold_key<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        key: impl Into<String>,
        duration: u32,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::HoldKey {
            key: key.into(),
            duration,
            return_screenshot,
        };
        self.execute(session, &action).await
    }

    pub async fn mouse_down<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        button: MouseButton,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::MouseDown {
            button,
            return_screenshot,
        };
        self.execute(session, &action).await
    }

    pub async fn mouse_up<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        button: MouseButton,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::MouseUp {
            button,
            return_screenshot,
        };
        self.execute(session, &action).await
    }

    pub async fn get_clipboard_text<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::GetClipboardText { return_screenshot };
        self.execute(session, &action).await
    }

    /// Replace the current selection with `text`.
    pub async fn put_selection_text<'a>(
        &self,
        session: impl Into<SessionTarget<'a>>,
        text: impl Into<String>,
        return_screenshot: bool,
    ) -> Result<ComputerActionResponse, HyperbrowserError> {
        let action = ComputerAction::PutSelectionText {
            text: text.into(),
            return_screenshot,
        };
        self.execute(session, &action).await
    }
}

fn endpoint_of(detail: &SessionDetail) -> Result<String, HyperbrowserError> {
    detail
        .computer_action_endpoint
        .clone()
        .filter(|endpoint| !endpoint.is_empty())
        .ok_or_else(|| {
            HyperbrowserError::InvalidParams(format!(
                "Computer action endpoint not available for session {}",
                detail.session.id
            ))
        })
}
