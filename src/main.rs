use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use securelink::config::Config;
use securelink::safebrowsing::client::SafeBrowsingClient;
use securelink::safebrowsing::traits::{CheckError, ThreatChecker};

/// SecureLink: check URLs against Google Safe Browsing.
///
/// Serves a small web page that accepts a link and reports whether it is
/// known to host malware or phishing, or checks a single URL from the terminal.
#[derive(Parser)]
#[command(name = "securelink", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web front-end
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: PORT env var, then 8080)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Check a single URL and print the verdict
    Check {
        /// The URL to check (e.g. https://example.com)
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("securelink=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.require_api_key()?;
    let client = SafeBrowsingClient::with_endpoint(
        &config.safe_browsing_url,
        &config.google_api_key,
        &config.google_client_id,
    );

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            use std::sync::Arc;

            let port = port.unwrap_or(config.port);
            info!(
                client_id = %config.google_client_id,
                timeout_secs = config.check_timeout.as_secs(),
                "Starting web front-end"
            );
            let state = securelink::web::AppState::new(Arc::new(client), config.check_timeout);
            securelink::web::run_server(state, port, &bind).await?;
        }

        Commands::Check { url } => {
            let outcome = match securelink::validator::validate_url(&url) {
                Ok(_) => {
                    info!(url = %url, "Checking URL");
                    client.check(&url, config.check_timeout).await
                }
                Err(e) => Err(e),
            };

            match &outcome {
                Ok(result) => {
                    securelink::output::terminal::display_verdict(&url, result);
                    if !result.safe() {
                        println!("\n{}", "Do not open this link.".red().bold());
                    }
                }
                Err(CheckError::InvalidInput(reason)) => {
                    eprintln!("{} {reason}", "Invalid URL:".red());
                }
                Err(e) => {
                    warn!(error = %e, "Threat check failed");
                    eprintln!("{}", "Check unavailable, please try again later".red());
                }
            }

            std::process::exit(securelink::output::exit_code(&outcome));
        }
    }

    Ok(())
}
