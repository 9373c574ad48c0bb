//! Synchronous services: sessions, profiles, extensions, web fetch/search.

use hyperbrowser_client::types::{
    CreateProfileParams, CreateSessionParams, FetchOutputFormat, FetchOutputOptions, FetchParams,
    MouseButton, ProfileListParams, SessionDetail, SessionListParams, SessionStatus,
    UpdateSessionProfileParams, WebSearchParams,
};
use hyperbrowser_client::{Hyperbrowser, HyperbrowserError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::common::{API_KEY, client, config, hits};

fn session_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "teamId": "team-1",
        "status": status,
        "createdAt": "2026-05-01T10:00:00Z",
        "updatedAt": "2026-05-01T10:05:00Z",
        "sessionUrl": format!("https://app.hyperbrowser.ai/sessions/{id}")
    })
}

#[tokio::test]
async fn test_create_and_get_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/session"))
        .and(body_json(json!({"useProxy": true, "solveCaptchas": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json({
            let mut body = session_json("sess-1", "active");
            body["wsEndpoint"] = json!("wss://connect.hyperbrowser.ai/sess-1");
            body
        }))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/session/sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json("sess-1", "closed")))
        .mount(&server)
        .await;

    let hb = client(&server);
    let params = CreateSessionParams {
        use_proxy: Some(true),
        solve_captchas: Some(true),
        ..Default::default()
    };
    let created = hb.sessions().create(&params).await.unwrap();
    assert_eq!(created.session.status, SessionStatus::Active);
    assert!(created.ws_endpoint.is_some());

    let fetched = hb.sessions().get("sess-1").await.unwrap();
    assert_eq!(fetched.session.status, SessionStatus::Closed);
}

#[tokio::test]
async fn test_list_sessions_sends_only_present_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .and(query_param("status", "active"))
        .and(query_param("page", "2"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sessions": [session_json("sess-1", "active")],
            "totalCount": 11,
            "page": 2,
            "perPage": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = SessionListParams {
        status: Some(SessionStatus::Active),
        page: Some(2),
        limit: None,
    };
    let list = client(&server).sessions().list(&params).await.unwrap();

    assert_eq!(list.total_count, 11);
    assert_eq!(list.sessions.len(), 1);
}

#[tokio::test]
async fn test_session_urls_and_recording() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/sess-1/recording"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"type": 4, "data": {"href": "https://example.com"}, "timestamp": 1714557600000i64}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/session/sess-1/recording-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "recordingUrl": "https://cdn.example.com/rec.json"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/session/sess-1/downloads-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "pending"})))
        .mount(&server)
        .await;

    let hb = client(&server);
    let recording = hb.sessions().get_recording("sess-1").await.unwrap();
    assert_eq!(recording[0].event_type, 4);

    let recording_url = hb.sessions().get_recording_url("sess-1").await.unwrap();
    assert_eq!(
        recording_url.recording_url.as_deref(),
        Some("https://cdn.example.com/rec.json")
    );

    let downloads = hb.sessions().get_downloads_url("sess-1").await.unwrap();
    assert!(downloads.downloads_url.is_none());
}

#[tokio::test]
#[allow(deprecated)]
async fn test_legacy_profile_update_uses_canonical_request() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/session/sess-1/update"))
        .and(body_json(json!({"type": "profile", "params": {"persistChanges": true}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(3)
        .mount(&server)
        .await;

    let hb = client(&server);
    let sessions = hb.sessions();

    assert!(sessions.update_profile_persist("sess-1", true).await.unwrap().success);
    assert!(sessions.update_profile_persist("sess-1", true).await.unwrap().success);

    let params = UpdateSessionProfileParams {
        persist_changes: Some(true),
    };
    assert!(sessions.update_profile_params("sess-1", &params).await.unwrap().success);
}

#[tokio::test]
#[allow(deprecated)]
async fn test_legacy_warnings_can_be_disabled() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/session/sess-2/update"))
        .and(body_json(json!({"type": "profile", "params": {"persistChanges": false}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let hb = Hyperbrowser::new(config(&server).with_legacy_call_warnings(false)).unwrap();
    let resp = hb.sessions().update_profile_persist("sess-2", false).await.unwrap();
    assert!(resp.success);
}

#[tokio::test]
async fn test_profiles_crud() {
    let server = MockServer::start().await;

    let profile = json!({
        "id": "prof-1",
        "name": "checkout",
        "teamId": "team-1",
        "createdAt": "2026-05-01T10:00:00Z",
        "updatedAt": "2026-05-01T10:00:00Z"
    });

    Mock::given(method("POST"))
        .and(path("/api/profile"))
        .and(body_json(json!({"name": "checkout"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "prof-1", "name": "checkout"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/profile/prof-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile.clone()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/profiles"))
        .and(query_param("name", "checkout"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "profiles": [profile],
            "totalCount": 1,
            "page": 1,
            "perPage": 5
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/profile/prof-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let hb = client(&server);
    let profiles = hb.profiles();

    let created = profiles
        .create(&CreateProfileParams {
            name: Some("checkout".into()),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "prof-1");

    let fetched = profiles.get("prof-1").await.unwrap();
    assert_eq!(fetched.team_id, "team-1");

    let list = profiles
        .list(&ProfileListParams {
            name: Some("checkout".into()),
            page: None,
            limit: Some(5),
        })
        .await
        .unwrap();
    assert_eq!(list.profiles.len(), 1);

    assert!(profiles.delete("prof-1").await.unwrap().success);
}

#[tokio::test]
async fn test_list_extensions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/extensions/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "ext-1",
            "name": "adblock",
            "createdAt": "2026-05-01T10:00:00Z",
            "updatedAt": "2026-05-01T10:00:00Z"
        }])))
        .mount(&server)
        .await;

    let extensions = client(&server).extensions().list().await.unwrap();
    assert_eq!(extensions[0].name, "adblock");
}

#[tokio::test]
async fn test_web_fetch_is_synchronous() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/web/fetch"))
        .and(body_json(json!({
            "url": "https://example.com",
            "outputs": {"formats": [{"type": "markdown"}, {"type": "links"}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobId": "fetch-1",
            "status": "completed",
            "data": {"markdown": "# Example", "links": ["https://iana.org"]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = FetchParams {
        outputs: Some(FetchOutputOptions {
            formats: Some(vec![FetchOutputFormat::Markdown, FetchOutputFormat::Links]),
            ..Default::default()
        }),
        ..FetchParams::new("https://example.com")
    };
    let resp = client(&server).web().fetch(&params).await.unwrap();

    let data = resp.data.unwrap();
    assert_eq!(data.markdown.as_deref(), Some("# Example"));
    assert_eq!(hits(&server, "/api/web/fetch/fetch-1/status").await, 0);
}

#[tokio::test]
async fn test_web_search() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/web/search"))
        .and(body_json(json!({"query": "rust async runtimes", "page": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobId": "search-1",
            "status": "completed",
            "data": {
                "query": "rust async runtimes",
                "results": [
                    {"title": "Tokio", "url": "https://tokio.rs", "description": "An asynchronous runtime"}
                ]
            }
        })))
        .mount(&server)
        .await;

    let params = WebSearchParams {
        page: Some(2),
        ..WebSearchParams::new("rust async runtimes")
    };
    let resp = client(&server).web().search(&params).await.unwrap();

    let results = resp.data.unwrap().results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "https://tokio.rs");
}

fn session_with_endpoint(server: &MockServer, id: &str) -> serde_json::Value {
    let mut body = session_json(id, "active");
    body["computerActionEndpoint"] = json!(format!("{}/computer-action/{id}", server.uri()));
    body
}

#[tokio::test]
async fn test_computer_action_by_session_id() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/sess-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_with_endpoint(&server, "sess-1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/computer-action/sess-1"))
        .and(header("x-api-key", API_KEY))
        .and(body_json(json!({
            "action": "click",
            "x": 120,
            "y": 45,
            "button": "right",
            "numClicks": 1,
            "returnScreenshot": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "screenshot": "iVBORw0KGgo="
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resp = client(&server)
        .computer_action()
        .click("sess-1", 120, 45, MouseButton::Right, 1, true)
        .await
        .unwrap();

    assert!(resp.success);
    assert_eq!(resp.screenshot.as_deref(), Some("iVBORw0KGgo="));
}

#[tokio::test]
async fn test_computer_action_with_session_detail_skips_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/sess-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_with_endpoint(&server, "sess-2")))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/computer-action/sess-2"))
        .and(body_json(json!({"action": "get_clipboard_text", "returnScreenshot": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"clipboardText": "copied"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let detail: SessionDetail =
        serde_json::from_value(session_with_endpoint(&server, "sess-2")).unwrap();
    let resp = client(&server)
        .computer_action()
        .get_clipboard_text(&detail, false)
        .await
        .unwrap();

    assert_eq!(resp.data.unwrap().clipboard_text.as_deref(), Some("copied"));
}

#[tokio::test]
async fn test_computer_action_requires_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/session/sess-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_json("sess-3", "active")))
        .mount(&server)
        .await;

    let err = client(&server)
        .computer_action()
        .type_text("sess-3", "hello", false)
        .await
        .unwrap_err();

    assert!(matches!(err, HyperbrowserError::InvalidParams(_)));
    assert!(err.to_string().contains("sess-3"));
    let posts = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .count();
    assert_eq!(posts, 0);
}
