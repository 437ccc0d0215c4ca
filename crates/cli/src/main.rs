//! Tomato Mall CLI - talk to the bookstore API from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in; the token is kept under $TOMATO_DATA_DIR
//! tomato login -u alice -p secret
//!
//! # Show the logged-in profile
//! tomato whoami
//!
//! # Browse
//! tomato products
//! tomato notes --product 3
//!
//! # Account
//! tomato cart
//! tomato orders
//! tomato logout
//! ```
//!
//! # Environment Variables
//!
//! - `TOMATO_API_BASE_URL` - API base URL (default `http://localhost:8080/api`)
//! - `TOMATO_API_TIMEOUT_SECS` - Request timeout in seconds (default 10)
//! - `TOMATO_DATA_DIR` - Directory for the session token (default `.tomato`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tomato_storefront::{ApiClient, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "tomato")]
#[command(author, version, about = "Tomato Mall bookstore CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the logged-in user
    Whoami,
    /// List all products
    Products,
    /// Show the cart
    Cart,
    /// List orders
    Orders,
    /// List reading notes of a product
    Notes {
        /// Product ID
        #[arg(long)]
        product: i64,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tomato_storefront=info,tomato_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let client = ApiClient::from_config(&config)?;

    match cli.command {
        Commands::Login { username, password } => {
            commands::account::login(client, &username, &password).await?;
        }
        Commands::Logout => commands::account::logout(client),
        Commands::Whoami => commands::account::whoami(client).await?,
        Commands::Products => commands::catalog::products(client).await?,
        Commands::Cart => commands::account::cart(client).await?,
        Commands::Orders => commands::account::orders(client).await?,
        Commands::Notes { product } => commands::catalog::notes(client, product).await?,
    }
    Ok(())
}
