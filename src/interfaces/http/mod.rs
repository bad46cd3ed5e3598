//! REST surface over the checkout workflow.

pub mod auth;
pub mod handlers;

use crate::application::checkout::CheckoutEngine;
use crate::config::Config;
use crate::error::{Result, StorefrontError};
use auth::{AdminCredentials, TokenSigner};
use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::ctrl_c;
use tower_http::cors::CorsLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<CheckoutEngine>,
    pub signer: Arc<TokenSigner>,
    pub admin: AdminCredentials,
    pub gateway_key_id: String,
    pub currency: String,
    pub allowed_origin: String,
}

impl AppState {
    pub fn new(engine: Arc<CheckoutEngine>, config: &Config) -> Self {
        Self {
            engine,
            signer: Arc::new(TokenSigner::new(
                config.admin_token_secret.clone(),
                config.admin_token_ttl_secs,
            )),
            admin: AdminCredentials {
                email: config.admin_email.clone(),
                password: config.admin_password.clone(),
            },
            gateway_key_id: config.razorpay_key_id.clone(),
            currency: config.currency.clone(),
            allowed_origin: config.allowed_origin.clone(),
        }
    }
}

pub fn build_router(state: AppState) -> Result<Router> {
    let origin: HeaderValue = state.allowed_origin.parse().map_err(|_| {
        StorefrontError::Config(format!("Invalid allowed origin: {}", state.allowed_origin))
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Ok(Router::new()
        .route("/api/create-order", post(handlers::create_intent))
        .route("/api/verify-payment", post(handlers::verify_payment))
        .route("/api/save-order", post(handlers::save_order))
        .route("/api/orders", get(handlers::list_orders))
        .route("/api/admin/login", post(handlers::admin_login))
        .layer(cors)
        .with_state(state))
}

pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = build_router(state)?;

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
