use crate::domain::model::{GameSession, SessionInsert, Signup};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The hosted database that owns sessions and signups.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    async fn list_sessions(&self) -> Result<Vec<GameSession>>;
    async fn get_session(&self, session_id: i64) -> Result<Option<GameSession>>;
    /// All signups, or only those of one session.
    async fn list_signups(&self, session_id: Option<i64>) -> Result<Vec<Signup>>;
    async fn insert_signup(&self, signup: &Signup) -> Result<Signup>;
    async fn delete_signup(&self, session_id: i64, user_id: &str) -> Result<()>;
    async fn insert_session(&self, session: &SessionInsert) -> Result<GameSession>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
