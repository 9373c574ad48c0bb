#![allow(dead_code)]

use std::time::Duration;

use hyperbrowser_client::{ClientConfig, Hyperbrowser, PollConfig};
use wiremock::MockServer;

pub const API_KEY: &str = "hb_test_key";

pub fn fast_poll() -> PollConfig {
    PollConfig::default()
        .with_poll_interval(Duration::from_millis(10))
        .with_page_interval(Duration::from_millis(5))
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(API_KEY)
        .unwrap()
        .with_base_url(server.uri())
        .with_poll_config(fast_poll())
}

pub fn client(server: &MockServer) -> Hyperbrowser {
    Hyperbrowser::new(config(server)).unwrap()
}

/// Number of requests the server received for `path`.
pub async fn hits(server: &MockServer, path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == path)
        .count()
}
