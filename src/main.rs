//! FakIng server entry point.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use faking::adapters::auth::{Argon2Hasher, JwtSessions, JwtTokenSigner};
use faking::adapters::email::{LoggingMailer, SmtpMailer};
use faking::adapters::http::{api_router, AppState};
use faking::adapters::postgres::{
    self, PostgresDecisionRepository, PostgresFacultyRepository, PostgresInvitationRepository,
    PostgresMembershipRepository, PostgresMenteeRepository, PostgresMentorRepository,
    PostgresTeamRepository, PostgresUserRepository, PostgresVoteLedger,
};
use faking::application::handlers::mentoring::MentoringSettings;
use faking::config::{AppConfig, ServerConfig};
use faking::ports::Mailer;

/// Waits for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let json = server.log_json;
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}

fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    let origins = server.cors_origins_list();
    if origins.is_empty() {
        // Permissive outside production when no origins are configured.
        return (!server.is_production()).then(|| CorsLayer::new().allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        environment = ?config.server.environment,
        "Starting FakIng server"
    );

    let pool = postgres::connect(&config.database).await?;
    info!("Connected to database");

    if config.database.run_migrations {
        info!("Running database migrations");
        postgres::migrate(&pool).await?;
    }

    let mailer: Arc<dyn Mailer> = if config.email.enabled {
        info!(host = %config.email.smtp_host, "Sending mail over SMTP");
        Arc::new(SmtpMailer::new(&config.email)?)
    } else {
        info!("Mail delivery disabled, logging outgoing mail");
        Arc::new(LoggingMailer::new())
    };

    let sessions = Arc::new(JwtSessions::new(
        &config.auth.session_secret,
        config.auth.session_ttl(),
    ));

    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        teams: Arc::new(PostgresTeamRepository::new(pool.clone())),
        memberships: Arc::new(PostgresMembershipRepository::new(pool.clone())),
        invitations: Arc::new(PostgresInvitationRepository::new(pool.clone())),
        decisions: Arc::new(PostgresDecisionRepository::new(pool.clone())),
        ledger: Arc::new(PostgresVoteLedger::new(pool.clone())),
        faculties: Arc::new(PostgresFacultyRepository::new(pool.clone())),
        mentors: Arc::new(PostgresMentorRepository::new(pool.clone())),
        mentees: Arc::new(PostgresMenteeRepository::new(pool)),
        mailer,
        hasher: Arc::new(Argon2Hasher::new()),
        session_issuer: sessions.clone(),
        session_validator: sessions,
        deletion_signer: Arc::new(JwtTokenSigner::new(&config.auth.deletion_token_secret)),
        allowed_email_domain: config.registration.allowed_email_domain.clone(),
        public_base_url: config.registration.base_url(),
        mentoring: MentoringSettings {
            allowed_email_domains: config.registration.mentoring_email_domains_list(),
            public_base_url: config.registration.base_url(),
            deletion_validity_days: config.auth.deletion_token_validity_days,
        },
    };

    let mut app: Router = api_router(state)
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http());
    if let Some(cors) = cors_layer(&config.server) {
        app = app.layer(cors);
    }

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
