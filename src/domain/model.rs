use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Player,
    GameMaster,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub role: Role,
}

impl User {
    pub fn is_game_master(&self) -> bool {
        self.role == Role::GameMaster
    }
}

/// A scheduled session row as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub game_master_id: String,
    /// `YYYY-MM-DD`, interpreted in MST.
    pub session_date: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub max_players: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub session_id: i64,
    pub user_id: String,
}

/// Session fields entered by a game master, before the backend assigns an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub session_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub max_players: u32,
}

/// Row sent to the backend when a session is created.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInsert {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub game_master_id: String,
    pub session_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub max_players: u32,
}

/// A session together with the state derived from its signups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub session: GameSession,
    pub signup_count: usize,
    pub seats_left: u32,
    pub is_full: bool,
    pub is_signed_up: bool,
}

impl SessionView {
    pub fn from_signups(session: GameSession, signups: &[Signup], user_id: &str) -> Self {
        let mine: Vec<&Signup> = signups
            .iter()
            .filter(|s| s.session_id == session.id)
            .collect();
        let signup_count = mine.len();
        let is_signed_up = mine.iter().any(|s| s.user_id == user_id);
        let taken = u32::try_from(signup_count).unwrap_or(u32::MAX);
        let seats_left = session.max_players.saturating_sub(taken);

        Self {
            is_full: taken >= session.max_players,
            seats_left,
            signup_count,
            is_signed_up,
            session,
        }
    }
}
