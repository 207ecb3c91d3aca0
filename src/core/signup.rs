use crate::core::{Clock, SessionBackend};
use crate::domain::dates::{canonical_date, is_future_date_in_mst};
use crate::domain::model::{GameSession, NewSession, SessionInsert, SessionView, Signup, User};
use crate::utils::error::{Result, SignupError};

pub const MAX_PLAYERS_LIMIT: u32 = 20;

pub struct SignupService<B: SessionBackend, C: Clock> {
    backend: B,
    clock: C,
}

impl<B: SessionBackend, C: Clock> SignupService<B, C> {
    pub fn new(backend: B, clock: C) -> Self {
        Self { backend, clock }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Every session with its derived state for `user`, earliest first.
    pub async fn list_sessions(&self, user: &User) -> Result<Vec<SessionView>> {
        let mut sessions = self.backend.list_sessions().await?;
        let signups = self.backend.list_signups(None).await?;
        tracing::debug!(
            "Loaded {} sessions and {} signups",
            sessions.len(),
            signups.len()
        );

        sessions.sort_by_cached_key(|s| (canonical_date(&s.session_date), s.id));

        Ok(sessions
            .into_iter()
            .map(|session| SessionView::from_signups(session, &signups, &user.id))
            .collect())
    }

    pub async fn session_view(&self, user: &User, session_id: i64) -> Result<SessionView> {
        let session = self.require_session(session_id).await?;
        let signups = self.backend.list_signups(Some(session_id)).await?;
        Ok(SessionView::from_signups(session, &signups, &user.id))
    }

    pub async fn sign_up(&self, user: &User, session_id: i64) -> Result<Signup> {
        let view = self.session_view(user, session_id).await?;

        if view.is_signed_up {
            tracing::warn!("{} already signed up for session {}", user.id, session_id);
            return Err(SignupError::AlreadySignedUp {
                session_id,
                user_id: user.id.clone(),
            });
        }
        if view.is_full {
            tracing::warn!("Session {} is full, rejecting {}", session_id, user.id);
            return Err(SignupError::SessionFull {
                session_id,
                max_players: view.session.max_players,
            });
        }

        let signup = self
            .backend
            .insert_signup(&Signup {
                id: None,
                session_id,
                user_id: user.id.clone(),
            })
            .await?;
        tracing::info!("✅ {} signed up for '{}'", user.display_name, view.session.title);
        Ok(signup)
    }

    pub async fn cancel(&self, user: &User, session_id: i64) -> Result<()> {
        let view = self.session_view(user, session_id).await?;
        if !view.is_signed_up {
            tracing::warn!("{} has no signup for session {}", user.id, session_id);
            return Err(SignupError::NotSignedUp {
                session_id,
                user_id: user.id.clone(),
            });
        }

        self.backend.delete_signup(session_id, &user.id).await?;
        tracing::info!("🗑️ {} cancelled '{}'", user.display_name, view.session.title);
        Ok(())
    }

    pub async fn create_session(&self, user: &User, draft: NewSession) -> Result<GameSession> {
        if !user.is_game_master() {
            tracing::warn!("{} tried to create a session without the game master role", user.id);
            return Err(SignupError::NotGameMaster {
                user_id: user.id.clone(),
            });
        }

        if draft.title.trim().is_empty() {
            return Err(SignupError::ValidationError {
                message: "title cannot be empty".to_string(),
            });
        }
        if !(1..=MAX_PLAYERS_LIMIT).contains(&draft.max_players) {
            return Err(SignupError::ValidationError {
                message: format!(
                    "max_players must be between 1 and {}, got {}",
                    MAX_PLAYERS_LIMIT, draft.max_players
                ),
            });
        }

        let date = draft.session_date.unwrap_or_default();
        let day = match canonical_date(&date) {
            Some(day) if is_future_date_in_mst(&date, self.clock.now()) => day,
            _ => {
                tracing::warn!("Rejected session date '{}'", date);
                return Err(SignupError::PastDate { date });
            }
        };

        let insert = SessionInsert {
            title: draft.title.trim().to_string(),
            description: draft.description,
            game_master_id: user.id.clone(),
            session_date: day.format("%Y-%m-%d").to_string(),
            start_time: draft.start_time,
            location: draft.location,
            max_players: draft.max_players,
        };
        let created = self.backend.insert_session(&insert).await?;
        tracing::info!("📅 Created session #{} '{}'", created.id, created.title);
        Ok(created)
    }

    async fn require_session(&self, session_id: i64) -> Result<GameSession> {
        self.backend
            .get_session(session_id)
            .await?
            .ok_or(SignupError::SessionNotFound { session_id })
    }
}
