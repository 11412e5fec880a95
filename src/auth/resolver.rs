// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Principal resolution and credential login.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::password::PasswordVerifier;
use super::token::TokenCodec;
use super::{AuthError, Principal};
use crate::clock::Clock;
use crate::store::UserStore;

/// A freshly issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Turns bearer tokens into principals, and credentials into bearer tokens.
///
/// Read-only with respect to the user store.
#[derive(Clone)]
pub struct PrincipalResolver {
    codec: TokenCodec,
    users: Arc<dyn UserStore>,
    passwords: Arc<dyn PasswordVerifier>,
    clock: Arc<dyn Clock>,
}

impl PrincipalResolver {
    pub fn new(
        codec: TokenCodec,
        users: Arc<dyn UserStore>,
        passwords: Arc<dyn PasswordVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            codec,
            users,
            passwords,
            clock,
        }
    }

    /// Resolve a bearer token to the principal it names.
    ///
    /// # Errors
    /// - `TokenMalformed` / `TokenExpired` from token validation
    /// - `UserNotFound` if the subject has no account
    /// - `UserDeactivated` if the account is inactive
    pub fn resolve(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.codec.validate(token, self.clock.now())?;

        let record = self
            .users
            .find_by_username(&claims.sub)?
            .ok_or(AuthError::UserNotFound)?;

        if !record.active {
            return Err(AuthError::UserDeactivated);
        }

        if record.role != claims.role {
            tracing::debug!(
                username = %record.username,
                token_role = %claims.role,
                stored_role = %record.role,
                "Token role differs from stored role, using stored role"
            );
        }

        Ok(Principal::from_record(&record))
    }

    /// Exchange a username and password for a bearer token.
    ///
    /// The password is checked before the account status, so a disabled
    /// account is only reported to someone holding its password. Unknown
    /// usernames still go through the verifier.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        let Some(record) = self.users.find_by_username(username)? else {
            self.passwords.verify_absent(password);
            tracing::warn!(%username, "Login failed: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &record.password_hash)? {
            tracing::warn!(%username, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        if !record.active {
            tracing::warn!(%username, "Login refused: account disabled");
            return Err(AuthError::UserDisabled);
        }

        let principal = Principal::from_record(&record);
        let now = self.clock.now();
        let token = self.codec.issue(&principal, now)?;

        tracing::info!(%username, role = %principal.role, "Login succeeded");
        Ok(IssuedToken {
            token,
            expires_at: now + self.codec.ttl(),
        })
    }
}
