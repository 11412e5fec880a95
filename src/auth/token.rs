// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuance and validation.
//!
//! Tokens are compact HS256 JWTs: `base64url(header).base64url(payload).base64url(signature)`
//! with a `{sub, role, iat, exp}` payload.
//!
//! ## Expiry
//!
//! The library's own `exp` check reads the system clock, so it is disabled and
//! expiry is compared against the `now` passed in by the caller instead. A
//! token is expired once `now > exp`; there is no leeway.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use super::claims::{Claims, Principal};

/// Default token lifetime (24 hours).
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Token codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature, algorithm or structure is invalid
    #[error("token is malformed")]
    Malformed,
    /// `now > exp`
    #[error("token has expired")]
    Expired,
    /// Encoding failed while issuing
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issues and validates signed bearer tokens.
///
/// Stateless: a pure function of the shared secret and the supplied time.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec signing with `secret`.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `principal`, valid from `now` for the configured TTL.
    pub fn issue(&self, principal: &Principal, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: principal.username.clone(),
            role: principal.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Validate `token` and return its claims.
    ///
    /// # Errors
    /// - `TokenError::Malformed` for a bad signature, unexpected algorithm or
    ///   unparseable structure
    /// - `TokenError::Expired` if `now` is past the `exp` claim
    pub fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(kind = ?e.kind(), "Rejected malformed token");
            TokenError::Malformed
        })?;

        let claims = token_data.claims;
        if now.timestamp() > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &Algorithm::HS256)
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish_non_exhaustive()
    }
}
