// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoint.

use axum::{extract::State, Json};

use crate::{
    auth::AuthError,
    models::{LoginRequest, TokenResponse},
    state::AppState,
};

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials or disabled account"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let service = state.service.clone();
    // Password hashing is CPU bound
    let issued = tokio::task::spawn_blocking(move || {
        service.authenticate(&request.username, &request.password)
    })
    .await
    .map_err(|e| AuthError::Internal(e.to_string()))??;

    Ok(Json(TokenResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_at: issued.expires_at.timestamp(),
    }))
}
