use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;
mod console;

use commands::context::ContextOptions;

#[derive(Parser)]
#[command(name = "clipsy")]
#[command(about = "Clipsy CLI - save recipes from shared social media links", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the app shell: every stdin line is handled as an incoming URL
    Listen {
        /// URL the app was launched with
        #[arg(long)]
        launch_url: Option<String>,
    },
    /// Handle a single shared URL
    Share {
        url: String,
    },
    /// Print the content URL found in shared text (offline)
    ExtractUrl {
        text: String,
    },
    /// Sign in with an identity-provider profile
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        photo: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Refresh the stored session
    Refresh,
    /// List saved recipes
    Recipes,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    let options = ContextOptions {
        config_path: cli.config,
        backend_url: cli.backend_url,
    };

    match cli.command {
        Commands::Listen { launch_url } => commands::listen::run(&options, launch_url).await?,
        Commands::Share { url } => commands::share::run(&options, &url).await?,
        Commands::ExtractUrl { text } => commands::share::extract_url(&options, &text)?,
        Commands::Login { email, name, photo } => {
            commands::auth::login(&options, email, name, photo).await?
        }
        Commands::Logout => commands::auth::logout(&options).await?,
        Commands::Refresh => commands::auth::refresh(&options).await?,
        Commands::Recipes => commands::recipes::run(&options).await?,
    }

    Ok(())
}
