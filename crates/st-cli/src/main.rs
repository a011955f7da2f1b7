use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use st_cli::commands::{dashboard, goal, log, progress, subject};
use st_cli::{Cli, Commands, Config, GoalAction, SubjectAction};
use st_core::UserId;

/// Load config and open the database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(st_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = st_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

/// The engine takes no ambient user; every command resolves one explicitly,
/// from `--user` or the configured `default_user`.
fn resolve_user(cli_user: Option<&str>, config: &Config) -> Result<UserId> {
    let raw = cli_user
        .map(str::to_string)
        .or_else(|| config.default_user.clone())
        .context("no user given: pass --user or set default_user in the config")?;
    UserId::new(raw).context("invalid user ID")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Subject { action }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let user = resolve_user(cli.user.as_deref(), &config)?;
            match action {
                SubjectAction::Add {
                    name,
                    color,
                    icon,
                    goal_hours,
                } => subject::add(&db, &user, name, color, icon, *goal_hours)?,
                SubjectAction::List { json } => subject::list(&db, &user, *json)?,
                SubjectAction::Delete { id } => subject::delete(&db, &user, id)?,
            }
        }
        Some(Commands::Log {
            subject_id,
            minutes,
        }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let user = resolve_user(cli.user.as_deref(), &config)?;
            log::run(&db, &user, subject_id, *minutes)?;
        }
        Some(Commands::Dashboard { json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let user = resolve_user(cli.user.as_deref(), &config)?;
            dashboard::run(&db, &user, *json)?;
        }
        Some(Commands::Progress { json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let user = resolve_user(cli.user.as_deref(), &config)?;
            progress::run(&db, &user, *json)?;
        }
        Some(Commands::Goal { action }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let user = resolve_user(cli.user.as_deref(), &config)?;
            match action {
                GoalAction::Add {
                    title,
                    description,
                    target_date,
                } => goal::add(&db, &user, title, description.as_deref(), *target_date)?,
                GoalAction::List { json } => goal::list(&db, &user, *json)?,
                GoalAction::Complete { id } => goal::complete(&db, &user, id)?,
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
