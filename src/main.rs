use anyhow::Context;
use clap::Parser;
use session_signup::utils::{logger, validation::Validate};
use session_signup::{
    is_future_date, AppConfig, CliConfig, Command, NewSession, RestBackend, SessionView,
    SignupError, SignupService, SystemClock, User,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if let Command::CheckDate { date } = &cli.command {
        logger::init_cli_logger(cli.verbose, None);
        let future = is_future_date(date);
        tracing::debug!("check-date {} -> {}", date, future);
        if future {
            println!("✅ {} is in the future (MST)", date);
        } else {
            println!("❌ {} is not a future date (MST)", date);
            std::process::exit(1);
        }
        return Ok(());
    }

    // 載入配置
    let config = match AppConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load config file '{}'", cli.config))
    {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logging() {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }
    tracing::info!("🚀 Starting session-signup");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = match (config.current_user(), RestBackend::new(&config.backend)) {
        (Ok(user), Ok(backend)) => {
            let service = SignupService::new(backend, SystemClock);
            run_command(&service, &user, cli.command).await
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run_command(
    service: &SignupService<RestBackend, SystemClock>,
    user: &User,
    command: Command,
) -> Result<(), SignupError> {
    match command {
        Command::Sessions => {
            let views = service.list_sessions(user).await?;
            if views.is_empty() {
                println!("No sessions scheduled yet.");
            }
            for view in &views {
                print_view(view);
            }
        }
        Command::Show { session_id } => {
            let view = service.session_view(user, session_id).await?;
            print_view(&view);
            if let Some(description) = &view.session.description {
                println!("    {}", description);
            }
        }
        Command::Signup { session_id } => {
            service.sign_up(user, session_id).await?;
            println!("✅ Signed up for session #{}", session_id);
        }
        Command::Cancel { session_id } => {
            service.cancel(user, session_id).await?;
            println!("✅ Cancelled signup for session #{}", session_id);
        }
        Command::Create {
            title,
            date,
            max_players,
            description,
            start_time,
            location,
        } => {
            let draft = NewSession {
                title,
                description,
                session_date: Some(date),
                start_time,
                location,
                max_players,
            };
            let created = service.create_session(user, draft).await?;
            println!(
                "✅ Created session #{} '{}' on {}",
                created.id, created.title, created.session_date
            );
        }
        Command::CheckDate { .. } => {}
    }
    Ok(())
}

fn print_view(view: &SessionView) {
    let session = &view.session;
    let status = match (view.is_signed_up, view.is_full) {
        (true, _) => "signed up",
        (false, true) => "full",
        (false, false) => "open",
    };
    println!(
        "#{:<4} {} {:<30} {}/{} players, {} seat(s) left [{}]",
        session.id,
        session.session_date,
        session.title,
        view.signup_count,
        session.max_players,
        view.seats_left,
        status
    );
    if let Some(location) = &session.location {
        let time = session.start_time.as_deref().unwrap_or("TBD");
        println!("      {} @ {}", time, location);
    }
}
