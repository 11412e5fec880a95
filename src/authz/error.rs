// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::{AuthError, USER_DOES_NOT_EXIST};
use crate::store::StoreError;

/// Why a mutation was refused.
///
/// `Unauthorized`, `NotFound` and `Conflict` carry the caller-facing message
/// verbatim; `Display` prints it unchanged.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// Signature or structure of the bearer token is invalid
    #[error("Token is malformed")]
    TokenMalformed,
    /// Bearer token is past its expiry
    #[error("Token has expired")]
    TokenExpired,
    /// Identity, role or ownership check failed
    #[error("{0}")]
    Unauthorized(String),
    /// Edit/Delete target does not exist
    #[error("{0}")]
    NotFound(String),
    /// Add would duplicate an existing entry
    #[error("{0}")]
    Conflict(String),
    /// Request built with an empty principal or item
    #[error("Invalid authorization request: {0}")]
    InvalidRequest(String),
    /// Store failed
    #[error("Store error: {0}")]
    Store(StoreError),
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for authorization operations.
pub type AuthzResult<T> = Result<T, AuthzError>;

#[derive(Serialize)]
struct AuthzErrorBody {
    error: String,
    error_code: String,
}

impl AuthzError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AuthzError::Unauthorized(message.into())
    }

    /// Stable, machine-readable kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthzError::TokenMalformed => "token_malformed",
            AuthzError::TokenExpired => "token_expired",
            AuthzError::Unauthorized(_) => "unauthorized",
            AuthzError::NotFound(_) => "not_found",
            AuthzError::Conflict(_) => "conflict",
            AuthzError::InvalidRequest(_) => "invalid_request",
            AuthzError::Store(_) | AuthzError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthzError::TokenMalformed | AuthzError::TokenExpired | AuthzError::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthzError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthzError::Conflict(_) => StatusCode::CONFLICT,
            AuthzError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AuthzError::Store(_) | AuthzError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for AuthzError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::TokenMalformed => AuthzError::TokenMalformed,
            AuthError::TokenExpired => AuthzError::TokenExpired,
            AuthError::UserNotFound | AuthError::UserDeactivated => {
                AuthzError::unauthorized(USER_DOES_NOT_EXIST)
            }
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidCredentials
            | AuthError::UserDisabled => AuthzError::unauthorized(e.to_string()),
            AuthError::Store(e) => AuthzError::Store(e),
            AuthError::Internal(msg) => AuthzError::Internal(msg),
        }
    }
}

impl From<StoreError> for AuthzError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(msg) => AuthzError::NotFound(msg),
            other => AuthzError::Store(other),
        }
    }
}

impl IntoResponse for AuthzError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Authorization failed with internal error");
        }
        let body = Json(AuthzErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
