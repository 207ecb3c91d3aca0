use anyhow::Result;
use chrono::{TimeZone, Utc};
use httpmock::prelude::*;
use session_signup::{
    AppConfig, FixedClock, GameSession, InMemoryBackend, NewSession, RestBackend, Role,
    SessionBackend, SignupError, SignupService, User,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 6, 15, 10, 0, 0).unwrap())
}

fn player(id: &str) -> User {
    User {
        id: id.to_string(),
        display_name: id.to_string(),
        role: Role::Player,
    }
}

fn seeded_session(id: i64, max_players: u32) -> GameSession {
    GameSession {
        id,
        title: "Dragon Heist".to_string(),
        description: Some("Waterdeep intrigue".to_string()),
        game_master_id: "gm".to_string(),
        session_date: "2024-06-22".to_string(),
        start_time: Some("19:00".to_string()),
        location: Some("Game store".to_string()),
        max_players,
    }
}

#[tokio::test]
async fn test_group_evening_in_memory() -> Result<()> {
    let backend = InMemoryBackend::with_sessions(vec![seeded_session(4, 2)]).await;
    let service = SignupService::new(backend.clone(), clock());

    service.sign_up(&player("ana"), 4).await?;
    service.sign_up(&player("ben"), 4).await?;
    let err = service.sign_up(&player("cy"), 4).await.unwrap_err();
    assert!(matches!(err, SignupError::SessionFull { .. }));

    service.cancel(&player("ben"), 4).await?;
    service.sign_up(&player("cy"), 4).await?;

    let views = service.list_sessions(&player("cy")).await?;
    assert_eq!(views.len(), 1);
    assert!(views[0].is_full);
    assert!(views[0].is_signed_up);
    assert_eq!(backend.list_signups(Some(4)).await?.len(), 2);

    // New sessions continue the seeded numbering.
    let gm = User {
        id: "gm".to_string(),
        display_name: "GM".to_string(),
        role: Role::GameMaster,
    };
    let created = service
        .create_session(
            &gm,
            NewSession {
                title: "Session zero".to_string(),
                session_date: Some("2024-06-16".to_string()),
                max_players: 6,
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(created.id, 5);
    Ok(())
}

#[tokio::test]
async fn test_full_session_over_rest_never_posts() -> Result<()> {
    let server = MockServer::start();
    let session_rows = serde_json::to_value(vec![seeded_session(4, 1)])?;
    let session_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/sessions")
            .query_param("id", "eq.4");
        then.status(200)
            .json_body(session_rows);
    });
    let signups_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rest/v1/signups")
            .query_param("session_id", "eq.4");
        then.status(200)
            .json_body(serde_json::json!([{"id": 1, "session_id": 4, "user_id": "ana"}]));
    });
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/signups");
        then.status(201).json_body(serde_json::json!([]));
    });

    let mut config_file = NamedTempFile::new()?;
    write!(
        config_file,
        r#"
[backend]
url = "{}"
api_key = "anon-key"

[user]
id = "ben"
"#,
        server.base_url()
    )?;
    let config = AppConfig::from_file(config_file.path())?;
    let user = config.current_user()?;

    let service = SignupService::new(RestBackend::new(&config.backend)?, clock());
    let err = service.sign_up(&user, 4).await.unwrap_err();

    session_mock.assert();
    signups_mock.assert();
    assert_eq!(insert_mock.hits(), 0);
    assert!(matches!(err, SignupError::SessionFull { max_players: 1, .. }));
    Ok(())
}

#[tokio::test]
async fn test_past_date_rejected_before_backend_call() -> Result<()> {
    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path("/rest/v1/sessions");
        then.status(201);
    });

    let config = AppConfig::from_toml_str(&format!(
        r#"
[backend]
url = "{}"
api_key = "anon-key"

[user]
id = "gm"
role = "game_master"
"#,
        server.base_url()
    ))?;
    let service = SignupService::new(RestBackend::new(&config.backend)?, clock());

    let err = service
        .create_session(
            &config.current_user()?,
            NewSession {
                title: "Too late".to_string(),
                session_date: Some("2024-06-15".to_string()),
                max_players: 4,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SignupError::PastDate { .. }));
    assert_eq!(insert_mock.hits(), 0);
    Ok(())
}
