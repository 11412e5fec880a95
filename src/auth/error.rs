// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use super::token::TokenError;
use crate::store::StoreError;

/// Message shared by missing and deactivated accounts.
pub const USER_DOES_NOT_EXIST: &str = "User does not exist!";

/// Authentication error type.
///
/// Covers header parsing, token validation, principal resolution and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Header present but not exactly `Bearer <token>`
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Bad signature, wrong algorithm or unparseable token
    #[error("Token is malformed")]
    TokenMalformed,
    /// Token expiry is in the past
    #[error("Token has expired")]
    TokenExpired,
    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// Correct password, but the account is deactivated
    #[error("User account is disabled")]
    UserDisabled,
    /// Token subject has no account
    #[error("User does not exist!")]
    UserNotFound,
    /// Token subject's account is deactivated
    #[error("User does not exist!")]
    UserDeactivated,
    /// User store failed
    #[error("User store unavailable: {0}")]
    Store(#[from] StoreError),
    /// Internal error
    #[error("Internal authentication error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    ///
    /// Missing and deactivated accounts share a code on purpose.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::TokenMalformed => "token_malformed",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::UserDisabled => "user_disabled",
            AuthError::UserNotFound | AuthError::UserDeactivated => "user_does_not_exist",
            AuthError::Store(_) | AuthError::Internal(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::TokenMalformed
            | AuthError::TokenExpired
            | AuthError::InvalidCredentials
            | AuthError::UserDisabled
            | AuthError::UserNotFound
            | AuthError::UserDeactivated => StatusCode::UNAUTHORIZED,
            AuthError::Store(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Malformed => AuthError::TokenMalformed,
            TokenError::Expired => AuthError::TokenExpired,
            TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
