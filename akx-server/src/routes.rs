//! Token Issuance Endpoints
//!
//! The `singleAuthToken` route family, one route per tenant kind:
//!
//! - `GET /singleAuthToken` — system database
//! - `GET /databases/{name}/singleAuthToken`
//! - `GET /fs/{name}/singleAuthToken`
//! - `GET /counters/{name}/singleAuthToken`
//!
//! Structurally identical: resolve the principal, delegate minting to the
//! Authorizer, shape the `{"Token": …}` envelope. `Unauthorized` propagates
//! verbatim.

use crate::authorizer::{Authorizer, TokenResponse};
use crate::error::Result;
use crate::tenant::TenantScope;
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;
use tracing::info;

/// Shared endpoint state: the Authorizer collaborator.
#[derive(Clone)]
pub struct AppState {
    /// Resolves principals and mints tokens
    pub authorizer: Arc<dyn Authorizer>,
}

impl AppState {
    /// Create state around an Authorizer.
    pub fn new(authorizer: Arc<dyn Authorizer>) -> Self {
        Self { authorizer }
    }
}

/// Register the issuance route family and the health endpoint.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(system_single_auth_token)
        .service(database_single_auth_token)
        .service(file_system_single_auth_token)
        .service(counter_single_auth_token)
        .service(health_check);
}

/// Resolve the caller and mint a token for `tenant`.
async fn issue_for(
    state: &AppState,
    req: &HttpRequest,
    tenant: TenantScope,
) -> Result<TokenResponse> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let principal = state.authorizer.resolve_principal(auth_header).await?;

    let token = state
        .authorizer
        .generate_single_use_token(&tenant, &principal)
        .await?;

    info!(
        tenant = %tenant.label(),
        principal = %principal,
        "issued single-use token"
    );

    Ok(TokenResponse { token })
}

#[get("/singleAuthToken")]
async fn system_single_auth_token(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder> {
    let response = issue_for(&state, &req, TenantScope::system_database()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/databases/{name}/singleAuthToken")]
async fn database_single_auth_token(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let response = issue_for(&state, &req, TenantScope::database(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/fs/{name}/singleAuthToken")]
async fn file_system_single_auth_token(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let response = issue_for(&state, &req, TenantScope::file_system(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/counters/{name}/singleAuthToken")]
async fn counter_single_auth_token(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<impl Responder> {
    let response = issue_for(&state, &req, TenantScope::counter_store(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Health check endpoint
#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
