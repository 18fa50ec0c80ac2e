//! Credential Operator CLI
//!
//! Provisions, verifies and revokes credentials and evaluates the access
//! policy. Uses `anyhow` for startup errors; credential failures are
//! reported through `kernel::error::AppError`.

mod cli;

use std::env;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose;
use credential::{
    AccessPolicy, AuthConfig, Authenticator, CredentialStore, CredentialWriter,
    MemoryCredentialStore, PgCredentialStore, ProvisionInput, ProvisionUseCase,
};
use kernel::error::app_error::AppError;
use sqlx::postgres::PgPoolOptions;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Command, USAGE};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr, stdout carries command output)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credctl=info,credential=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match Command::parse(env::args().skip(1)) {
        Ok(command) => command,
        Err(msg) => {
            eprintln!("{msg}\n\n{USAGE}");
            return Ok(ExitCode::from(2));
        }
    };

    // A fresh in-memory store is always empty
    let database_url = env::var("DATABASE_URL").ok();
    if database_url.is_none() && command.needs_database() {
        eprintln!("this command needs DATABASE_URL; without it records do not outlive the process\n\n{USAGE}");
        return Ok(ExitCode::from(2));
    }

    let config = Arc::new(load_config()?);
    let policy = load_policy()?;

    let secret = if command.needs_secret() {
        read_secret().await?
    } else {
        String::new()
    };

    match database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(config.lookup_timeout)
                .connect(&database_url)
                .await
                .context("failed to connect to database")?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../database/migrations")
                .run(&pool)
                .await?;

            let store = Arc::new(PgCredentialStore::new(pool));
            Ok(run(command, secret, store, config, &policy).await)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, the provisioned record is not kept");
            let store = Arc::new(MemoryCredentialStore::new());
            Ok(run(command, secret, store, config, &policy).await)
        }
    }
}

/// Build `AuthConfig` from the environment
fn load_config() -> anyhow::Result<AuthConfig> {
    let mut config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    if let Ok(ms) = env::var("CREDENTIAL_LOOKUP_TIMEOUT_MS") {
        let ms: u64 = ms
            .trim()
            .parse()
            .context("CREDENTIAL_LOOKUP_TIMEOUT_MS must be a number of milliseconds")?;
        config = config.with_lookup_timeout(Duration::from_millis(ms));
    }

    if let Ok(pepper_b64) = env::var("CREDENTIAL_PEPPER") {
        let pepper = general_purpose::STANDARD
            .decode(pepper_b64.trim())
            .context("CREDENTIAL_PEPPER must be base64")?;
        config = config.with_pepper(pepper);
    }

    tracing::debug!(config = ?config, "Loaded configuration");
    Ok(config)
}

/// Load the access policy from `ACCESS_POLICY_PATH`, or the standard table
fn load_policy() -> anyhow::Result<AccessPolicy> {
    match env::var("ACCESS_POLICY_PATH") {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read access policy {path}"))?;
            let policy = AccessPolicy::from_json(&json)
                .with_context(|| format!("invalid access policy {path}"))?;
            tracing::info!(path = %path, "Loaded access policy");
            Ok(policy)
        }
        Err(_) => Ok(AccessPolicy::standard()),
    }
}

/// Read one line from stdin, without the line terminator
async fn read_secret() -> anyhow::Result<String> {
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read secret from stdin")?;

    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

async fn run<S>(
    command: Command,
    secret: String,
    store: Arc<S>,
    config: Arc<AuthConfig>,
    policy: &AccessPolicy,
) -> ExitCode
where
    S: CredentialStore + CredentialWriter + Send + Sync + 'static,
{
    match execute(command, secret, store, config, policy).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            // Distinguish "retry later" from a rejected request
            if err.is_server_error() {
                ExitCode::from(3)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

async fn execute<S>(
    command: Command,
    secret: String,
    store: Arc<S>,
    config: Arc<AuthConfig>,
    policy: &AccessPolicy,
) -> Result<String, AppError>
where
    S: CredentialStore + CredentialWriter + Send + Sync + 'static,
{
    let authenticator = Authenticator::new(store.clone(), config.clone());
    let provisioning = ProvisionUseCase::new(store, config);

    match command {
        Command::Provision { username, role } => {
            let output = provisioning
                .execute(ProvisionInput {
                    username,
                    secret,
                    role,
                })
                .await
                .inspect_err(|e| e.log())?;
            Ok(format!(
                "provisioned {} ({}) as {}",
                output.username, output.id, output.role
            ))
        }
        Command::Verify { username } => {
            let identity = authenticator
                .authenticate(&username, &secret)
                .await
                .inspect_err(|e| e.log())?;
            tracing::info!(username = %identity.username(), role = %identity.role(), "Verified");
            Ok(serde_json::to_string(&identity)?)
        }
        Command::Authorize {
            username,
            operation,
        } => {
            let identity = authenticator
                .authenticate(&username, &secret)
                .await
                .inspect_err(|e| e.log())?;
            policy
                .authorize(Some(&identity), operation)
                .inspect_err(|e| tracing::warn!(error = %e, "Access denied"))?;
            Ok(format!("{} may perform '{}'", identity.role(), operation))
        }
        Command::Revoke { username } => {
            provisioning
                .revoke(&username)
                .await
                .inspect_err(|e| e.log())?;
            Ok(format!("revoked {username}"))
        }
    }
}
