//! AKX Token Server Binary
//!
//! Serves the `singleAuthToken` endpoint family over an in-memory
//! authorizer. Production deployments plug their own [`Authorizer`] in
//! behind the same routes.

use actix_web::{middleware, web, App, HttpServer};
use akx_server::{AppState, Principal, StaticKeyAuthorizer};
use anyhow::Result;
use std::env;
use std::sync::Arc;
use tracing::info;

/// Server configuration, read from the environment.
struct Config {
    host: String,
    port: u16,
    /// Optional pre-seeded session (bearer token + principal id)
    session: Option<(String, String)>,
}

impl Config {
    fn from_env() -> Result<Self> {
        let host = env::var("AKX_SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("AKX_SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        let session = match (
            env::var("AKX_SESSION_TOKEN").ok(),
            env::var("AKX_SESSION_PRINCIPAL").ok(),
        ) {
            (Some(token), Some(principal)) => Some((token, principal)),
            _ => None,
        };

        Ok(Self {
            host,
            port,
            session,
        })
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = Config::from_env()?;

    let authorizer = StaticKeyAuthorizer::new();
    if let Some((token, principal)) = &config.session {
        authorizer
            .insert_session(token.clone(), Principal::new(principal.clone()))
            .await;
        info!(principal = %principal, "seeded session from environment");
    }

    let state = AppState::new(Arc::new(authorizer));

    let bind_addr = format!("{}:{}", config.host, config.port);
    info!("Starting AKX token server on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::Logger::default())
            .configure(akx_server::routes::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
