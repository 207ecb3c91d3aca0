pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{InMemoryBackend, RestBackend};
pub use config::AppConfig;
pub use core::signup::SignupService;
pub use domain::dates::{is_future_date, is_future_date_in_mst, CalendarDate};
pub use domain::model::{GameSession, NewSession, Role, SessionView, Signup, User};
pub use domain::ports::{Clock, FixedClock, SessionBackend, SystemClock};
pub use utils::error::{Result, SignupError};
