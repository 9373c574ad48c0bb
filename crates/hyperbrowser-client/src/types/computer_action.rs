use serde::{Deserialize, Serialize};

use super::session::SessionDetail;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Wheel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

/// One action sent to a session's computer action endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    tag = "action",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum ComputerAction {
    Click {
        x: i32,
        y: i32,
        button: MouseButton,
        num_clicks: u32,
        return_screenshot: bool,
    },
    TypeText {
        text: String,
        return_screenshot: bool,
    },
    Screenshot,
    PressKeys {
        keys: Vec<String>,
        return_screenshot: bool,
    },
    Drag {
        path: Vec<Coordinate>,
        return_screenshot: bool,
    },
    MoveMouse {
        x: i32,
        y: i32,
        return_screenshot: bool,
    },
    Scroll {
        x: i32,
        y: i32,
        scroll_x: i32,
        scroll_y: i32,
        return_screenshot: bool,
    },
    HoldKey {
        key: String,
        /// Seconds to hold the key down.
        duration: u32,
        return_screenshot: bool,
    },
    MouseDown {
        button: MouseButton,
        return_screenshot: bool,
    },
    MouseUp {
        button: MouseButton,
        return_screenshot: bool,
    },
    GetClipboardText {
        return_screenshot: bool,
    },
    PutSelectionText {
        text: String,
        return_screenshot: bool,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerActionResponseData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clipboard_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerActionResponse {
    pub success: bool,
    /// Base64 screenshot, when one was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ComputerActionResponseData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Session to act on: an ID to look up, or details already fetched.
#[derive(Debug, Clone, Copy)]
pub enum SessionTarget<'a> {
    Id(&'a str),
    Detail(&'a SessionDetail),
}

impl<'a> From<&'a str> for SessionTarget<'a> {
    fn from(id: &'a str) -> Self {
        SessionTarget::Id(id)
    }
}

impl<'a> From<&'a String> for SessionTarget<'a> {
    fn from(id: &'a String) -> Self {
        SessionTarget::Id(id)
    }
}

impl<'a> From<&'a SessionDetail> for SessionTarget<'a> {
    fn from(detail: &'a SessionDetail) -> Self {
        SessionTarget::Detail(detail)
    }
}
