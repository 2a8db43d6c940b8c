//! HTTP server for the wijk payroll engine.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Duration;
use tracing_subscriber::EnvFilter;

use wijk_payroll::api::{AppState, ScheduleSource, create_router};
use wijk_payroll::auth::{CredentialStore, DEFAULT_SESSION_TTL_MINUTES};
use wijk_payroll::config::ConfigLoader;
use wijk_payroll::error::{PayrollError, PayrollResult};
use wijk_payroll::store::InMemoryAssignmentStore;

/// One year.
const MAX_SESSION_TTL_MINUTES: i64 = 525_600;

/// Server settings read from the environment.
#[derive(Debug, Clone)]
struct ServerConfig {
    config_dir: PathBuf,
    credentials_path: PathBuf,
    http_port: u16,
    log_level: String,
    schedule_source: ScheduleSource,
    session_ttl_minutes: i64,
}

impl ServerConfig {
    fn from_env() -> PayrollResult<Self> {
        let _ = dotenvy::dotenv();

        let config_dir = PathBuf::from(
            env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| "./config/delvero".to_string()),
        );
        let credentials_path = env::var("CREDENTIALS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir.join("credentials.yaml"));

        let settings = Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            schedule_source: parse_or_default("SCHEDULE_SOURCE", ScheduleSource::Static)?,
            session_ttl_minutes: parse_or_default(
                "SESSION_TTL_MINUTES",
                DEFAULT_SESSION_TTL_MINUTES,
            )?,
            config_dir,
            credentials_path,
        };
        if !(1..=MAX_SESSION_TTL_MINUTES).contains(&settings.session_ttl_minutes) {
            return Err(PayrollError::InvalidConfig {
                message: format!(
                    "SESSION_TTL_MINUTES must be between 1 and {}",
                    MAX_SESSION_TTL_MINUTES
                ),
            });
        }
        Ok(settings)
    }
}

fn parse_or_default<T>(key: &str, default: T) -> PayrollResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse::<T>().map_err(|err| PayrollError::InvalidConfig {
            message: format!("invalid {key}: {err}"),
        }),
        Err(_) => Ok(default),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = ServerConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(settings.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let config = ConfigLoader::load(&settings.config_dir)?;

    let credentials = if settings.credentials_path.exists() {
        CredentialStore::load(&settings.credentials_path)?
    } else {
        tracing::warn!(
            path = %settings.credentials_path.display(),
            "No credentials file; every login will be rejected"
        );
        CredentialStore::default()
    };

    let state = AppState::new(
        config,
        Arc::new(InMemoryAssignmentStore::new()),
        Arc::new(credentials),
        settings.schedule_source,
    )
    .with_session_ttl(Duration::minutes(settings.session_ttl_minutes));
    let app = create_router(state);

    let bind_addr = format!("0.0.0.0:{}", settings.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!(
        http_port = settings.http_port,
        schedule_source = ?settings.schedule_source,
        session_ttl_minutes = settings.session_ttl_minutes,
        "http server started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
