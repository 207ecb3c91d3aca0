use crate::domain::model::{GameSession, SessionInsert, Signup};
use crate::domain::ports::SessionBackend;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Tables {
    sessions: Vec<GameSession>,
    signups: Vec<Signup>,
    next_session_id: i64,
    next_signup_id: i64,
}

/// Backend kept in process memory; clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_sessions(sessions: Vec<GameSession>) -> Self {
        let backend = Self::new();
        {
            let mut tables = backend.tables.lock().await;
            tables.next_session_id = sessions.iter().map(|s| s.id).max().unwrap_or(0);
            tables.sessions = sessions;
        }
        backend
    }
}

#[async_trait]
impl SessionBackend for InMemoryBackend {
    async fn list_sessions(&self) -> Result<Vec<GameSession>> {
        Ok(self.tables.lock().await.sessions.clone())
    }

    async fn get_session(&self, session_id: i64) -> Result<Option<GameSession>> {
        let tables = self.tables.lock().await;
        Ok(tables.sessions.iter().find(|s| s.id == session_id).cloned())
    }

    async fn list_signups(&self, session_id: Option<i64>) -> Result<Vec<Signup>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .signups
            .iter()
            .filter(|s| session_id.map_or(true, |id| s.session_id == id))
            .cloned()
            .collect())
    }

    async fn insert_signup(&self, signup: &Signup) -> Result<Signup> {
        let mut tables = self.tables.lock().await;
        tables.next_signup_id += 1;
        let stored = Signup {
            id: Some(tables.next_signup_id),
            ..signup.clone()
        };
        tables.signups.push(stored.clone());
        Ok(stored)
    }

    async fn delete_signup(&self, session_id: i64, user_id: &str) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables
            .signups
            .retain(|s| !(s.session_id == session_id && s.user_id == user_id));
        Ok(())
    }

    async fn insert_session(&self, session: &SessionInsert) -> Result<GameSession> {
        let mut tables = self.tables.lock().await;
        tables.next_session_id += 1;
        let stored = GameSession {
            id: tables.next_session_id,
            title: session.title.clone(),
            description: session.description.clone(),
            game_master_id: session.game_master_id.clone(),
            session_date: session.session_date.clone(),
            start_time: session.start_time.clone(),
            location: session.location.clone(),
            max_players: session.max_players,
        };
        tables.sessions.push(stored.clone());
        Ok(stored)
    }
}
