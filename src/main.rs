//! Taskora - task-management client CLI
//!
#![doc = "Taskora - task-management client CLI"]
#![doc = "Main entry point for the Taskora application."]

use anyhow::Result;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use taskora::api::ApiClient;
use taskora::cli::{Cli, Commands, ThemeCommand};
use taskora::commands;
use taskora::config::Config;
use taskora::session::SessionStore;
use taskora::storage::LocalStore;
use taskora::theme::ThemeStore;
use taskora::todos::{create_repository, TodoRepository};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Compose the stores; each owns its own handle to the data directory
    let sessions = Arc::new(SessionStore::new(LocalStore::new()?));
    let mut themes = ThemeStore::new(LocalStore::new()?);
    let palette = themes.palette();

    // Execute command
    match cli.command {
        Commands::Login { email, password } => {
            tracing::info!("Starting login");
            commands::auth::run_login(sessions, &palette, email, password).await
        }
        Commands::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            tracing::info!("Starting signup");
            commands::auth::run_signup(sessions, &palette, name, email, password, confirm_password)
                .await
        }
        Commands::Logout => commands::auth::run_logout(sessions, &palette),
        Commands::Whoami => commands::auth::run_whoami(sessions, &palette),
        Commands::Add {
            title,
            description,
            priority,
            due,
            category,
            tag,
            subtask,
        } => {
            let repo = build_repository(&config, sessions)?;
            commands::tasks::run_add(
                repo.as_ref(),
                &palette,
                title,
                description,
                priority,
                due,
                category,
                tag,
                subtask,
            )
            .await
        }
        Commands::List { pending, json } => {
            let repo = build_repository(&config, sessions)?;
            commands::tasks::run_list(repo.as_ref(), &palette, pending, json).await
        }
        Commands::Show { id } => {
            let repo = build_repository(&config, sessions)?;
            commands::tasks::run_show(repo.as_ref(), &palette, id).await
        }
        Commands::Edit {
            id,
            title,
            description,
            priority,
        } => {
            let repo = build_repository(&config, sessions)?;
            commands::tasks::run_edit(repo.as_ref(), &palette, id, title, description, priority)
                .await
        }
        Commands::Done { id } => {
            let repo = build_repository(&config, sessions)?;
            commands::tasks::run_done(repo.as_ref(), &palette, id).await
        }
        Commands::Rm { id } => {
            let repo = build_repository(&config, sessions)?;
            commands::tasks::run_rm(repo.as_ref(), &palette, id).await
        }
        Commands::CompleteAll => {
            let repo = build_repository(&config, sessions)?;
            commands::tasks::run_complete_all(repo.as_ref(), &palette).await
        }
        Commands::Theme { command } => match command {
            ThemeCommand::Show => commands::theme::run_show(&themes),
            ThemeCommand::Set { name } => commands::theme::run_set(&mut themes, name),
            ThemeCommand::Next => commands::theme::run_next(&mut themes),
        },
    }
}

/// Compose the configured repository over the shared session store
fn build_repository(
    config: &Config,
    sessions: Arc<SessionStore>,
) -> Result<Box<dyn TodoRepository>> {
    let user_id = sessions.get().map(|s| s.id);
    let api = Arc::new(ApiClient::new(&config.api, sessions)?);
    create_repository(
        config,
        api,
        user_id.as_deref(),
        commands::tasks::sample_tasks(),
    )
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskora=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
