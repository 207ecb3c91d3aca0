use crate::config::toml_config::BackendConfig;
use crate::domain::model::{GameSession, SessionInsert, Signup};
use crate::domain::ports::SessionBackend;
use crate::utils::error::{Result, SignupError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const SESSIONS_TABLE: &str = "sessions";
const SIGNUPS_TABLE: &str = "signups";

/// Talks to the hosted PostgREST endpoint under `{url}/rest/v1`.
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            access_token: config.access_token().map(str::to_string),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.api_key);
        request
            .header("apikey", self.api_key.as_str())
            .bearer_auth(bearer)
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.table_url(table);
        tracing::debug!("GET {} {:?}", url, filters);

        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());

        let response = self
            .authorize(self.client.get(&url))
            .query(&query)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn insert_row<B: serde::Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.table_url(table);
        tracing::debug!("POST {}", url);

        let response = self
            .authorize(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let response = ensure_success(response).await?;

        let mut rows: Vec<T> = response.json().await?;
        if rows.is_empty() {
            return Err(SignupError::BackendError {
                status,
                message: format!("insert into {} returned no rows", table),
            });
        }
        Ok(rows.swap_remove(0))
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("Backend response status: {}", status);
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(body);

    Err(SignupError::BackendError {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl SessionBackend for RestBackend {
    async fn list_sessions(&self) -> Result<Vec<GameSession>> {
        self.fetch_rows(
            SESSIONS_TABLE,
            &[("order", "session_date.asc".to_string())],
        )
        .await
    }

    async fn get_session(&self, session_id: i64) -> Result<Option<GameSession>> {
        let rows: Vec<GameSession> = self
            .fetch_rows(SESSIONS_TABLE, &[("id", format!("eq.{}", session_id))])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_signups(&self, session_id: Option<i64>) -> Result<Vec<Signup>> {
        let filters: Vec<(&str, String)> = session_id
            .map(|id| vec![("session_id", format!("eq.{}", id))])
            .unwrap_or_default();
        self.fetch_rows(SIGNUPS_TABLE, &filters).await
    }

    async fn insert_signup(&self, signup: &Signup) -> Result<Signup> {
        self.insert_row(SIGNUPS_TABLE, signup).await
    }

    async fn delete_signup(&self, session_id: i64, user_id: &str) -> Result<()> {
        let url = self.table_url(SIGNUPS_TABLE);
        tracing::debug!("DELETE {} session={} user={}", url, session_id, user_id);

        let response = self
            .authorize(self.client.delete(&url))
            .query(&[
                ("session_id", format!("eq.{}", session_id)),
                ("user_id", format!("eq.{}", user_id)),
            ])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn insert_session(&self, session: &SessionInsert) -> Result<GameSession> {
        self.insert_row(SESSIONS_TABLE, session).await
    }
}
