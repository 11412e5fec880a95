// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer header parsing and the Axum extractor for authenticated principals.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(principal): Auth) -> impl IntoResponse {
//!     // principal is Principal
//! }
//! ```
//!
//! The header must be exactly `Bearer <token>` with a single space. Anything
//! else is rejected before the token is looked at.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{AuthError, Principal};
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization` header value.
///
/// # Errors
/// Returns `AuthError::InvalidAuthHeader` unless the value is `"Bearer "`
/// followed by a non-empty token containing no whitespace.
pub fn parse_bearer(header: &str) -> Result<&str, AuthError> {
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::InvalidAuthHeader)?;

    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(token)
}

/// Read the raw `Authorization` header.
///
/// # Errors
/// - `MissingAuthHeader` if absent
/// - `InvalidAuthHeader` if not valid visible ASCII
pub fn authorization_header(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)
}

/// Extractor for authenticated principals.
///
/// Validates the bearer token and resolves it against the user store.
///
/// # Example
///
/// ```rust,ignore
/// async fn whoami(Auth(principal): Auth) -> Json<Principal> {
///     Json(principal)
/// }
/// ```
pub struct Auth(pub Principal);

/// A syntactically valid `Authorization: Bearer <token>` header, raw.
///
/// Token verification is left to the caller. List it before `Path` and
/// `Json` in a handler's arguments so a missing or malformed header is
/// rejected before the path or body is parsed.
#[derive(Debug, Clone)]
pub struct BearerHeader(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerHeader {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = authorization_header(&parts.headers)?;
        parse_bearer(header)?;
        Ok(BearerHeader(header.to_string()))
    }
}

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = authorization_header(&parts.headers)?;
        let token = parse_bearer(header)?;
        let principal = state.service.resolver().resolve(token)?;

        Ok(Auth(principal))
    }
}
