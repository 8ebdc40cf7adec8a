mod common;

use chatconnect::api::{ApiClient, ApiError, FriendRequest, ProfileTarget};
use chatconnect::fetch::{Fetcher, SearchOutcome};
use chatconnect::slices::profile::{ProfileTab, ProfileViewState};
use chatconnect::store::{AppState, Store};
use common::{api_config, fetcher_for, record_snapshots, MockResponse, MockServer, TEST_TOKEN};

fn request(id: &str, username: &str) -> FriendRequest {
    FriendRequest {
        id: id.to_string(),
        username: username.to_string(),
    }
}

// -- Notifications --------------------------------------------------------------

#[tokio::test]
async fn load_notifications_populates_friends_slice() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(
            r#"{"profile":{"profilePicture":"p.png"},"request":[{"_id":"1","username":"bob"}]}"#,
        ))
        .await;
    let fetcher = fetcher_for(&server, "alice");

    fetcher.load_notifications().await.unwrap();

    let friends = fetcher.store().select(|s| s.friends.clone());
    assert_eq!(friends.profile_picture.as_deref(), Some("p.png"));
    assert_eq!(friends.requests, vec![request("1", "bob")]);

    let captured = server.captured_requests().await;
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].method, "GET");
    assert_eq!(captured[0].path, "/v1/user/profile");
    assert_eq!(
        captured[0].header("authorization"),
        Some(format!("Bearer {}", TEST_TOKEN).as_str())
    );
}

#[tokio::test]
async fn reloading_notifications_replaces_requests() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(
            r#"{"request":[{"_id":"1","username":"bob"},{"_id":"2","username":"carol"}]}"#,
        ))
        .await;
    server
        .enqueue_response(MockResponse::json(r#"{"request":[{"_id":"2","username":"carol"}]}"#))
        .await;
    let fetcher = fetcher_for(&server, "alice");

    fetcher.load_notifications().await.unwrap();
    fetcher.load_notifications().await.unwrap();

    let friends = fetcher.store().select(|s| s.friends.clone());
    assert_eq!(friends.requests, vec![request("2", "carol")]);
    assert_eq!(friends.profile_picture, None);
}

#[tokio::test]
async fn failed_notifications_leave_state_untouched() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::error(500, "database down"))
        .await;
    let fetcher = fetcher_for(&server, "alice");
    let before = fetcher.store().state();

    let err = fetcher.load_notifications().await.unwrap_err();
    assert_eq!(err.to_string(), "database down");
    assert_eq!(fetcher.store().state(), before);
}

// -- Search -----------------------------------------------------------------------

#[tokio::test]
async fn search_returns_users() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(
            r#"[{"username":"Alice","profile":{"profilePicture":"a.png"}},{"username":"Alina"}]"#,
        ))
        .await;
    let fetcher = fetcher_for(&server, "bob");

    let outcome = fetcher.search_users("Ali").await;
    let SearchOutcome::Users(users) = outcome else {
        panic!("expected users, got {:?}", outcome);
    };
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].profile_picture(), Some("a.png"));
    assert_eq!(users[1].profile_picture(), None);

    let captured = server.captured_requests().await;
    assert_eq!(captured[0].path, "/v1/user/search");
    assert_eq!(captured[0].query.as_deref(), Some("username=Ali"));
}

#[tokio::test]
async fn search_error_body_becomes_failure_value() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(r#"{"error":"no user found"}"#))
        .await;
    let fetcher = fetcher_for(&server, "bob");

    assert_eq!(
        fetcher.search_users("zzz").await,
        SearchOutcome::Failed {
            message: "no user found".to_string()
        }
    );
}

#[tokio::test]
async fn empty_search_result_is_not_a_failure() {
    let server = MockServer::start().await;
    server.enqueue_response(MockResponse::json("[]")).await;
    let fetcher = fetcher_for(&server, "bob");

    assert_eq!(fetcher.search_users("nobody").await, SearchOutcome::Users(Vec::new()));
}

#[tokio::test]
async fn blank_search_makes_no_request() {
    let server = MockServer::start().await;
    let fetcher = fetcher_for(&server, "bob");

    assert_eq!(fetcher.search_users("   ").await, SearchOutcome::Users(Vec::new()));
    assert!(server.captured_requests().await.is_empty());
}

#[tokio::test]
async fn search_never_touches_the_store() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(r#"[{"username":"Alice"}]"#))
        .await;
    server
        .enqueue_response(MockResponse::json(r#"{"error":"no user found"}"#))
        .await;
    let fetcher = fetcher_for(&server, "bob");
    let (_sub, seen) = record_snapshots(fetcher.store());

    fetcher.search_users("Ali").await;
    fetcher.search_users("Zed").await;

    assert!(seen.lock().is_empty());
}

#[tokio::test]
async fn unreachable_server_is_a_failure_value() {
    let api = ApiClient::new(&api_config("http://127.0.0.1:1/v1")).unwrap();
    let fetcher = Fetcher::new(api, common::logged_in_store("bob"));

    let outcome = fetcher.search_users("Ali").await;
    assert!(matches!(outcome, SearchOutcome::Failed { .. }));
}

// -- Profiles ---------------------------------------------------------------------

#[tokio::test]
async fn other_profile_uses_username_path() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(
            r#"{"username":"carol","name":"Carol","friends":[{"user":{"username":"alice"}}]}"#,
        ))
        .await;
    let fetcher = fetcher_for(&server, "alice");

    let profile = fetcher
        .get_user_profile(ProfileTarget::User("carol".to_string()))
        .await
        .unwrap();
    assert_eq!(profile.name, "Carol");
    assert_eq!(profile.friends[0].username(), "alice");

    let captured = server.captured_requests().await;
    assert_eq!(captured[0].path, "/v1/user/profile/carol");
}

#[tokio::test]
async fn concurrent_profile_fetches_share_one_request() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(r#"{"username":"alice","name":"Alice"}"#).with_delay(100))
        .await;
    let fetcher = fetcher_for(&server, "alice");

    let (a, b) = tokio::join!(
        fetcher.get_user_profile(ProfileTarget::Own),
        fetcher.get_user_profile(ProfileTarget::Own)
    );

    assert_eq!(a.unwrap().name, "Alice");
    assert_eq!(b.unwrap().name, "Alice");
    assert_eq!(server.captured_requests().await.len(), 1);
}

#[tokio::test]
async fn show_about_success_balances_loading() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(r#"{"username":"alice","name":"Alice"}"#))
        .await;
    let fetcher = fetcher_for(&server, "alice");
    let (_sub, seen) = record_snapshots(fetcher.store());

    fetcher.show_about(ProfileTarget::Own).await.unwrap();

    let loading: Vec<bool> = seen.lock().iter().map(|s| s.profile.loading).collect();
    assert_eq!(loading, vec![true, false, false]);

    let profile = fetcher.store().select(|s| s.profile.clone());
    assert_eq!(profile.active_tab, ProfileTab::About);
    assert!(!profile.loading);
    assert!(!profile.can_retry_about());
}

#[tokio::test]
async fn show_about_failure_offers_retry() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::error(404, "user not found"))
        .await;
    server
        .enqueue_response(MockResponse::json(r#"{"username":"ghost","name":"Ghost"}"#))
        .await;
    let fetcher = fetcher_for(&server, "alice");
    let target = ProfileTarget::User("ghost".to_string());

    let err = fetcher.show_about(target.clone()).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Server {
            status: 404,
            message: "user not found".to_string()
        }
    );

    let profile = fetcher.store().select(|s| s.profile.clone());
    assert!(!profile.loading);
    assert_eq!(profile.active_tab, ProfileTab::Timeline);
    assert!(profile.can_retry_about());

    fetcher.show_about(target).await.unwrap();
    let profile = fetcher.store().select(|s| s.profile.clone());
    assert_eq!(profile.active_tab, ProfileTab::About);
    assert!(!profile.can_retry_about());
}

// -- Friend requests --------------------------------------------------------------

#[tokio::test]
async fn accept_removes_pending_request() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(
            r#"{"request":[{"_id":"1","username":"bob"},{"_id":"2","username":"carol"}]}"#,
        ))
        .await;
    server
        .enqueue_response(MockResponse::json(r#"{"message":"Friend request accepted"}"#))
        .await;
    let fetcher = fetcher_for(&server, "alice");

    fetcher.load_notifications().await.unwrap();
    fetcher.accept_request("bob").await.unwrap();

    let friends = fetcher.store().select(|s| s.friends.clone());
    assert_eq!(friends.requests, vec![request("2", "carol")]);
    assert_eq!(friends.last_error, None);

    let captured = server.captured_requests().await;
    assert_eq!(captured[1].method, "POST");
    assert_eq!(captured[1].path, "/v1/request/accept");
    assert_eq!(captured[1].json(), serde_json::json!({"username": "bob"}));
}

#[tokio::test]
async fn decline_uses_cancel_endpoint() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(r#"{"request":[{"_id":"1","username":"bob"}]}"#))
        .await;
    server.enqueue_response(MockResponse::default()).await;
    let fetcher = fetcher_for(&server, "alice");

    fetcher.load_notifications().await.unwrap();
    fetcher.cancel_request("bob").await.unwrap();

    assert!(!fetcher.store().select(|s| s.friends.has_pending_requests()));
    assert_eq!(server.captured_requests().await[1].path, "/v1/request/cancel");
}

#[tokio::test]
async fn send_request_records_outgoing() {
    let server = MockServer::start().await;
    server.enqueue_response(MockResponse::default()).await;
    let fetcher = fetcher_for(&server, "alice");

    fetcher.send_request("dave").await.unwrap();

    assert!(fetcher.store().select(|s| s.friends.has_sent_to("dave")));
    assert_eq!(server.captured_requests().await[0].path, "/v1/request/send");
}

#[tokio::test]
async fn failed_accept_keeps_request_and_records_error() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(r#"{"request":[{"_id":"1","username":"bob"}]}"#))
        .await;
    server
        .enqueue_response(MockResponse::error(400, "request not found"))
        .await;
    let fetcher = fetcher_for(&server, "alice");

    fetcher.load_notifications().await.unwrap();
    let err = fetcher.accept_request("bob").await.unwrap_err();
    assert_eq!(err.to_string(), "request not found");

    let friends = fetcher.store().select(|s| s.friends.clone());
    assert_eq!(friends.requests, vec![request("1", "bob")]);
    assert_eq!(friends.last_error.as_deref(), Some("request not found"));
}

#[tokio::test]
async fn error_in_success_body_is_a_failure() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(r#"{"error":"already friends"}"#))
        .await;
    let fetcher = fetcher_for(&server, "alice");

    let err = fetcher.send_request("bob").await.unwrap_err();
    assert_eq!(err.to_string(), "already friends");
    assert!(!fetcher.store().select(|s| s.friends.has_sent_to("bob")));
}

#[tokio::test]
async fn logged_out_requests_carry_no_bearer() {
    let server = MockServer::start().await;
    server.enqueue_response(MockResponse::json("[]")).await;
    let api = ApiClient::new(&api_config(&server.base_url())).unwrap();
    let fetcher = Fetcher::new(api, Store::new(AppState::default()));

    fetcher.search_users("Ali").await;

    let captured = server.captured_requests().await;
    assert_eq!(captured[0].header("authorization"), None);
}

// -- Races and cancellation ---------------------------------------------------------

#[tokio::test]
async fn racing_fetches_each_land_in_their_own_place() {
    let server = MockServer::start().await;
    server
        .enqueue_for(
            "/v1/user/search",
            MockResponse::json(r#"[{"username":"Alice"}]"#).with_delay(150),
        )
        .await;
    server
        .enqueue_for(
            "/v1/user/profile",
            MockResponse::json(r#"{"request":[{"_id":"1","username":"bob"}]}"#).with_delay(20),
        )
        .await;
    let fetcher = fetcher_for(&server, "carol");
    let (_sub, seen) = record_snapshots(fetcher.store());

    let (outcome, loaded) = tokio::join!(fetcher.search_users("Ali"), fetcher.load_notifications());

    loaded.unwrap();
    let SearchOutcome::Users(users) = outcome else {
        panic!("expected users, got {:?}", outcome);
    };
    assert_eq!(users[0].username, "Alice");

    // Only the notification load reached the store; the search result stays with its caller.
    let snapshots = seen.lock();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].friends.requests, vec![request("1", "bob")]);
    assert_eq!(snapshots[0].profile, ProfileViewState::default());
}

#[tokio::test]
async fn abandoned_show_about_still_clears_loading() {
    let server = MockServer::start().await;
    server
        .enqueue_response(MockResponse::json(r#"{"username":"alice","name":"Alice"}"#).with_delay(500))
        .await;
    let fetcher = fetcher_for(&server, "alice");

    let result = tokio::time::timeout(
        std::time::Duration::from_millis(50),
        fetcher.show_about(ProfileTarget::Own),
    )
    .await;
    assert!(result.is_err());

    let profile = fetcher.store().select(|s| s.profile.clone());
    assert!(!profile.loading);
    assert_eq!(profile.active_tab, ProfileTab::Timeline);
    assert!(!profile.can_retry_about());
}

#[tokio::test]
async fn stalled_body_is_reported_as_timeout() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Headers arrive, then the body never finishes.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let _ = socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{",
            )
            .await;
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
    });

    let config = chatconnect::config::ApiConfig {
        timeout_seconds: 1,
        ..api_config(&format!("http://{}/v1", addr))
    };
    let fetcher = Fetcher::new(ApiClient::new(&config).unwrap(), common::logged_in_store("alice"));

    let err = fetcher.get_user_profile(ProfileTarget::Own).await.unwrap_err();
    assert_eq!(err, ApiError::Timeout { duration: 1 });
}
