//! Sheetkeeper Engine - Main entry point.
//!
//! Reads one slash command per stdin line and prints the reply. A line
//! starting with `?` asks for suggestions for the option being typed.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetkeeper_engine::{
    api::{Autocomplete, CommandRegistry, Dispatcher},
    infrastructure::{
        character_store::SqliteCharacterRepo,
        clock::SystemClock,
        config::EngineConfig,
        ports::{CharacterRepo, ClockPort},
    },
    App,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging. Logs go to stderr so replies on stdout stay clean.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetkeeper_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Sheetkeeper Engine");

    let config = EngineConfig::from_env();
    tracing::info!(
        database_path = %config.database_path,
        user_id = %config.local_user_id,
        "Loaded configuration"
    );

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
    let character_repo: Arc<dyn CharacterRepo> =
        Arc::new(SqliteCharacterRepo::new(&config.database_path, clock.clone()).await?);

    let user_id = config.local_user_id.clone();
    let app = Arc::new(App::new(character_repo, clock, config));
    let dispatcher = Dispatcher::new(app.clone(), CommandRegistry::standard()?);
    let autocomplete = Autocomplete::new(app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(partial) = line.strip_prefix('?') {
            let suggestions = autocomplete
                .complete_line(&user_id, dispatcher.registry(), partial)
                .await;
            println!("{}", suggestions.join("\n"));
            continue;
        }

        let response = dispatcher.dispatch_line(&user_id, line).await;
        if response.ephemeral {
            println!("(only you) {}", response.content);
        } else {
            println!("{}", response.content);
        }
    }

    tracing::info!("Input closed, shutting down");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
