//! Family deposit scheme CLI: database migrations and admin management.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending migrations
//! fds-cli migrate
//!
//! # Create the default admin (admin / admin123)
//! fds-cli admin create
//!
//! # Create a named admin
//! fds-cli admin create -u treasurer -p 's3cret-pass' -n "Treasurer"
//!
//! # Reset an admin password
//! fds-cli admin reset-password -u treasurer -p 'new-pass-123'
//! ```
//!
//! The database is taken from `DATABASE_URL` (default `sqlite://fds.db`).

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fds-cli")]
#[command(author, version, about = "Family deposit scheme management tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Login name
        #[arg(short, long, default_value = "admin")]
        username: String,

        /// Initial password
        #[arg(short, long, default_value = "admin123")]
        password: String,

        /// Display name
        #[arg(short, long, default_value = "System Administrator")]
        name: String,
    },
    /// Replace an admin's password
    ResetPassword {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fds_cli=info,fds_db=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let pool = commands::connect().await?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&pool).await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                password,
                name,
            } => {
                commands::admin::create(&pool, &username, &password, &name).await?;
            }
            AdminAction::ResetPassword { username, password } => {
                commands::admin::reset_password(&pool, &username, &password).await?;
            }
        },
    }

    pool.close().await;
    Ok(())
}
