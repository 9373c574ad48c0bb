//! Request and response types, one module per API area.

pub mod agents;
pub mod computer_action;
pub mod crawl;
pub mod extract;
pub mod profile;
pub mod scrape;
pub mod session;
pub mod web;

pub use agents::*;
pub use computer_action::*;
pub use crawl::*;
pub use extract::*;
pub use profile::*;
pub use scrape::*;
pub use session::{
    CreateSessionParams, ScreenConfig, Session, SessionDetail, SessionDownloadsUrl,
    SessionListParams, SessionListResponse, SessionProfile, SessionRecording,
    SessionRecordingUrl, SessionStatus, UpdateSessionProfileParams,
};
pub use web::*;
