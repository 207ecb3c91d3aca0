pub mod signup;

pub use crate::domain::model::{GameSession, NewSession, SessionView, Signup, User};
pub use crate::domain::ports::{Clock, SessionBackend};
pub use crate::utils::error::Result;
