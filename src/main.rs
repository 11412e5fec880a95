// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use catalog_guard::{
    api::router,
    auth::{hash_password, Argon2Verifier, Role, TokenCodec},
    clock::SystemClock,
    config::{self, AuthConfig},
    state::AppState,
    store::{InMemoryContentStore, InMemoryUserStore, UserRecord},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER));
    let json = config::json_logs(std::env::var(config::LOG_FORMAT_ENV).ok().as_deref());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = AuthConfig::from_env().expect("Invalid configuration");
    tracing::info!(?config, "Configuration loaded");

    // Initialize stores
    let users = Arc::new(InMemoryUserStore::new());
    let content = Arc::new(InMemoryContentStore::new());

    if let Some(seed) = &config.seed_admin {
        let password_hash =
            hash_password(&seed.password).expect("Failed to hash seed admin password");
        users.insert(UserRecord {
            username: seed.username.clone(),
            role: Role::Admin,
            display_name: None,
            active: true,
            password_hash,
        });
        tracing::info!(username = %seed.username, "Seeded admin account");
    }

    let codec = TokenCodec::new(&config.token_secret).with_ttl(config.token_ttl);
    let state = AppState::from_parts(
        codec,
        users,
        content,
        Arc::new(Argon2Verifier),
        Arc::new(SystemClock),
    );
    let app = router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!(%addr, "Catalog Guard listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}
