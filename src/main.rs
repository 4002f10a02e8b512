use clap::Parser;
use krua::{
    cli::{commands, Cli, Commands},
    config::Settings,
    Result,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,krua=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Dataset-shape and search errors become a user-facing message and a
    // nonzero exit code; they never panic the process.
    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Preprocess { input, output } => {
            commands::preprocess(&settings, &input, &output)
        }
        Commands::Search { query, json } => commands::search(&settings, &query, json),
        Commands::Recommend { ingredients, json } => {
            commands::recommend(&settings, &ingredients, json)
        }
        Commands::Ask { query, top_k, json } => commands::ask(&settings, &query, top_k, json),
    }
}
