use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::SummaryClient;
use crate::infra::{config, ClientConfig, SessionStore};
use crate::view::ViewState;

#[derive(Parser)]
#[command(name = "briefly")]
#[command(about = "Summarize text through the Briefly backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter configuration file
    Init,

    /// Sign in and store the session token
    Login {
        /// Account username
        #[arg(short, long)]
        username: String,

        /// Account password; falls back to BRIEFLY_PASSWORD
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Condense a document into a short summary
    Summarize {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Extract the key points of a document as an ordered list
    Bullets {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Invalidate the server session and forget the stored token
    Logout,

    /// Show client configuration and session state
    Status,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => init_command(),
        Commands::Login { username, password } => login_command(&username, password).await,
        Commands::Summarize { file } => summarize_command(file).await,
        Commands::Bullets { file } => bullets_command(file).await,
        Commands::Logout => logout_command().await,
        Commands::Status => status_command(),
    }
}

/// Collaborator-side guard: the backend never sees blank input.
pub fn validate_document(text: &str) -> Result<&str> {
    if text.trim().is_empty() {
        anyhow::bail!("document is empty");
    }
    Ok(text)
}

fn init_command() -> Result<()> {
    let dir = config::config_dir()?;
    ClientConfig::create_default(&dir)?;
    println!("{}", "✓ Briefly is ready".green());
    Ok(())
}

async fn login_command(username: &str, password: Option<String>) -> Result<()> {
    let password = password
        .or_else(|| std::env::var("BRIEFLY_PASSWORD").ok())
        .context("No password given. Pass --password or set BRIEFLY_PASSWORD")?;

    let client = build_client(false)?;
    println!("{}", "Signing in...".dimmed());

    match client.login(username, &password).await {
        Ok(token) => {
            SessionStore::new()?.save(&token)?;
            println!("{} Signed in as {}", "✓".green(), username.bold());
            Ok(())
        }
        Err(err) => {
            println!("{} Login failed", "✗".red());
            debug_detail(&err);
            std::process::exit(1);
        }
    }
}

async fn summarize_command(file: Option<PathBuf>) -> Result<()> {
    let text = read_document(file.as_deref())?;
    if validate_document(&text).is_err() {
        println!("{} Please enter some text first", "✗".red());
        std::process::exit(1);
    }

    let client = build_client(true)?;
    let state = ViewState::new().with_input(text).begin();
    println!("{}", "Generating summary...".dimmed());

    let state = match client.generate_summary(&state.input).await {
        Ok(response) => state.finish_summary(response),
        Err(err) => {
            debug_detail(&err);
            state.fail(err.to_string())
        }
    };

    render(&state);

    if state.failure().is_some() {
        println!("{} Failed to generate summary", "✗".red());
        std::process::exit(1);
    }
    Ok(())
}

async fn bullets_command(file: Option<PathBuf>) -> Result<()> {
    let text = read_document(file.as_deref())?;
    if validate_document(&text).is_err() {
        println!("{} Please enter some text first", "✗".red());
        std::process::exit(1);
    }

    let client = build_client(true)?;
    let state = ViewState::new().with_input(text).begin();
    println!("{}", "Generating bullet points...".dimmed());

    let state = match client.generate_bullet_points(&state.input).await {
        Ok(response) => state.finish_bullet_points(response),
        Err(err) => {
            debug_detail(&err);
            state.fail(err.to_string())
        }
    };

    render(&state);

    if state.failure().is_some() {
        println!("{} Failed to generate bullet points", "✗".red());
        std::process::exit(1);
    }
    Ok(())
}

async fn logout_command() -> Result<()> {
    let client = build_client(true)?;

    match client.logout().await {
        Ok(()) => {
            // Only a confirmed server-side logout may discard the token
            SessionStore::new()?.clear()?;
            println!("{} Signed out", "✓".green());
            Ok(())
        }
        Err(err) => {
            println!("{} Failed to logout", "✗".red());
            debug_detail(&err);
            std::process::exit(1);
        }
    }
}

fn status_command() -> Result<()> {
    println!("{}", "Briefly client status".bold());

    let config = ClientConfig::load()?;
    println!("✓ Backend: {}", config.api_url);
    println!("  Request timeout: {}s", config.timeout_secs);

    let store = SessionStore::new()?;
    match store.load() {
        Ok(Some(token)) if token.is_probably_expired() => {
            println!(
                "{} Session token stored, but older than the server token lifetime",
                "⚠️".yellow()
            );
        }
        Ok(Some(_)) => println!("✓ Session token stored"),
        Ok(None) => println!("{} Not signed in; run `briefly login`", "⚠️".yellow()),
        Err(err) => println!("{} Session store error: {}", "✗".red(), err),
    }

    Ok(())
}

// Helper functions

fn build_client(with_session: bool) -> Result<SummaryClient> {
    let config = ClientConfig::load()?;
    let mut client = SummaryClient::with_timeout(
        config.api_url.as_str(),
        Duration::from_secs(config.timeout_secs),
    );

    if with_session {
        if let Some(token) = SessionStore::new()?.load()? {
            if token.is_probably_expired() {
                println!(
                    "{} Stored session is probably expired; log in again if the request fails",
                    "⚠️".yellow()
                );
            }
            client = client.with_token(token.access_token);
        }
    }

    Ok(client)
}

fn read_document(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn render(state: &ViewState) {
    if let Some(summary) = &state.summary {
        println!("\n{}", "Summary".bold());
        println!("{}", "─".repeat(60));
        println!("{summary}");
    }

    if let Some(points) = &state.bullet_points {
        println!("\n{}", "Bullet points".bold());
        println!("{}", "─".repeat(60));
        if points.is_empty() {
            println!("(the service found no bullet points)");
        } else {
            for (index, point) in points.iter().enumerate() {
                println!("{}. {}", index + 1, point);
            }
        }
    }
}

fn debug_detail(err: &crate::api::RequestError) {
    if std::env::var("BRIEFLY_DEBUG").is_ok() {
        println!("{}", format!("  {err}").dimmed());
    }
}
