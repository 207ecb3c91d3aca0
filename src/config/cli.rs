use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "session-signup")]
#[command(about = "Browse and sign up for tabletop game sessions")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "signup.toml")]
    pub config: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all sessions with seats left and your signup status
    Sessions,

    /// Show a single session
    Show { session_id: i64 },

    /// Sign up for a session
    Signup { session_id: i64 },

    /// Cancel your signup for a session
    Cancel { session_id: i64 },

    /// Create a new session (game masters only)
    Create {
        #[arg(long)]
        title: String,

        /// Session date as YYYY-MM-DD, must be after today in MST
        #[arg(long)]
        date: String,

        #[arg(long, default_value = "5")]
        max_players: u32,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        start_time: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Check whether a date is in the future in MST (no config needed)
    CheckDate { date: String },
}
