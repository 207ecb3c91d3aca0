use httpmock::prelude::*;
use session_signup::config::BackendConfig;
use session_signup::domain::model::SessionInsert;
use session_signup::{RestBackend, SessionBackend, Signup, SignupError};

fn backend_config(server: &MockServer, access_token: Option<&str>) -> BackendConfig {
    BackendConfig {
        url: format!("{}/", server.base_url()),
        api_key: "anon-key".to_string(),
        access_token: access_token.map(str::to_string),
        timeout_seconds: Some(5),
    }
}

fn session_row(id: i64, date: &str, max_players: u32) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": format!("Session {}", id),
        "description": null,
        "game_master_id": "gm-1",
        "session_date": date,
        "start_time": "18:30",
        "location": "Back room",
        "max_players": max_players
    })
}

#[tokio::test]
async fn test_list_sessions_sends_keys_and_ordering() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/sessions")
            .query_param("select", "*")
            .query_param("order", "session_date.asc")
            .header("apikey", "anon-key")
            .header("authorization", "Bearer user-jwt");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                session_row(1, "2024-06-20", 4),
                session_row(2, "2024-07-01", 6)
            ]));
    });

    let backend = RestBackend::new(&backend_config(&server, Some("user-jwt"))).unwrap();
    let sessions = backend.list_sessions().await.unwrap();

    api_mock.assert();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[1].max_players, 6);
    assert_eq!(sessions[0].location.as_deref(), Some("Back room"));
}

#[tokio::test]
async fn test_anon_key_used_as_bearer_without_token() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/sessions")
            .query_param("id", "eq.9")
            .header("authorization", "Bearer anon-key");
        then.status(200).json_body(serde_json::json!([]));
    });

    let backend = RestBackend::new(&backend_config(&server, None)).unwrap();
    let session = backend.get_session(9).await.unwrap();

    api_mock.assert();
    assert!(session.is_none());
}

#[tokio::test]
async fn test_list_signups_filters_by_session() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/signups")
            .query_param("session_id", "eq.3");
        then.status(200).json_body(serde_json::json!([
            {"id": 10, "session_id": 3, "user_id": "a"},
            {"id": 11, "session_id": 3, "user_id": "b"}
        ]));
    });

    let backend = RestBackend::new(&backend_config(&server, None)).unwrap();
    let signups = backend.list_signups(Some(3)).await.unwrap();

    api_mock.assert();
    assert_eq!(signups.len(), 2);
    assert_eq!(signups[0].id, Some(10));
}

#[tokio::test]
async fn test_insert_signup_requests_representation() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rest/v1/signups")
            .header("prefer", "return=representation")
            .json_body(serde_json::json!({"session_id": 3, "user_id": "a"}));
        then.status(201)
            .json_body(serde_json::json!([{"id": 12, "session_id": 3, "user_id": "a"}]));
    });

    let backend = RestBackend::new(&backend_config(&server, None)).unwrap();
    let stored = backend
        .insert_signup(&Signup {
            id: None,
            session_id: 3,
            user_id: "a".to_string(),
        })
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(stored.id, Some(12));
}

#[tokio::test]
async fn test_insert_session_returns_created_row() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/sessions").json_body(serde_json::json!({
            "title": "Session 5",
            "game_master_id": "gm-1",
            "session_date": "2024-07-01",
            "max_players": 4
        }));
        then.status(201)
            .json_body(serde_json::json!([session_row(5, "2024-07-01", 4)]));
    });

    let backend = RestBackend::new(&backend_config(&server, None)).unwrap();
    let created = backend
        .insert_session(&SessionInsert {
            title: "Session 5".to_string(),
            description: None,
            game_master_id: "gm-1".to_string(),
            session_date: "2024-07-01".to_string(),
            start_time: None,
            location: None,
            max_players: 4,
        })
        .await
        .unwrap();

    api_mock.assert();
    assert_eq!(created.id, 5);
}

#[tokio::test]
async fn test_delete_signup_filters_session_and_user() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/rest/v1/signups")
            .query_param("session_id", "eq.3")
            .query_param("user_id", "eq.a");
        then.status(204);
    });

    let backend = RestBackend::new(&backend_config(&server, None)).unwrap();
    backend.delete_signup(3, "a").await.unwrap();

    api_mock.assert();
}

#[tokio::test]
async fn test_error_status_maps_to_backend_error() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/rest/v1/signups");
        then.status(401)
            .json_body(serde_json::json!({"code": "PGRST301", "message": "JWT expired"}));
    });

    let backend = RestBackend::new(&backend_config(&server, Some("stale"))).unwrap();
    let err = backend.list_signups(None).await.unwrap_err();

    api_mock.assert();
    match err {
        SignupError::BackendError { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "JWT expired");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_insert_representation_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/rest/v1/signups");
        then.status(201).json_body(serde_json::json!([]));
    });

    let backend = RestBackend::new(&backend_config(&server, None)).unwrap();
    let err = backend
        .insert_signup(&Signup {
            id: None,
            session_id: 1,
            user_id: "a".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SignupError::BackendError { status: 201, .. }));
}
