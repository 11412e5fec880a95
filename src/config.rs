// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, default values, and the loader that turns
//! them into [`AuthConfig`] at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `AUTH_TOKEN_SECRET` | HS256 signing secret, at least 32 bytes | Required |
//! | `AUTH_TOKEN_TTL_HOURS` | Token lifetime in hours | `24` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `SEED_ADMIN_USERNAME` | Admin account created at startup | Optional |
//! | `SEED_ADMIN_PASSWORD` | Password for the seeded admin | Optional |

use chrono::Duration;
use thiserror::Error;

use crate::auth::token::DEFAULT_TOKEN_TTL_HOURS;

/// Environment variable name for the token signing secret.
pub const TOKEN_SECRET_ENV: &str = "AUTH_TOKEN_SECRET";

/// Environment variable name for the token lifetime, in whole hours.
pub const TOKEN_TTL_HOURS_ENV: &str = "AUTH_TOKEN_TTL_HOURS";

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const SEED_ADMIN_USERNAME_ENV: &str = "SEED_ADMIN_USERNAME";
pub const SEED_ADMIN_PASSWORD_ENV: &str = "SEED_ADMIN_PASSWORD";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Shortest accepted HS256 secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),
    #[error("AUTH_TOKEN_SECRET must be at least 32 bytes, got {0}")]
    SecretTooShort(usize),
    #[error("{var} has an invalid value: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Credentials for an admin account created at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedAdmin {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SeedAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedAdmin")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Everything the server needs from the environment.
#[derive(Clone)]
pub struct AuthConfig {
    pub token_secret: Vec<u8>,
    pub token_ttl: Duration,
    pub host: String,
    pub port: u16,
    pub seed_admin: Option<SeedAdmin>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_ttl", &self.token_ttl)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("seed_admin", &self.seed_admin)
            .finish_non_exhaustive()
    }
}

impl AuthConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through `lookup`, which returns a variable's value if set.
    ///
    /// # Errors
    /// - `MissingVar` if the secret is unset, or only one of the seed admin
    ///   variables is set
    /// - `SecretTooShort` if the secret is under [`MIN_SECRET_LEN`] bytes
    /// - `InvalidValue` for an unparsable TTL or port
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_secret = lookup(TOKEN_SECRET_ENV)
            .ok_or(ConfigError::MissingVar(TOKEN_SECRET_ENV))?
            .into_bytes();
        if token_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort(token_secret.len()));
        }

        let ttl_hours = match lookup(TOKEN_TTL_HOURS_ENV) {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(hours) if hours > 0 => hours,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: TOKEN_TTL_HOURS_ENV,
                        reason: format!("expected a positive number of hours, got {raw:?}"),
                    })
                }
            },
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: PORT_ENV,
                reason: format!("expected a port number, got {raw:?}"),
            })?,
            None => DEFAULT_PORT,
        };

        let seed_admin = match (
            lookup(SEED_ADMIN_USERNAME_ENV),
            lookup(SEED_ADMIN_PASSWORD_ENV),
        ) {
            (Some(username), Some(password)) => Some(SeedAdmin { username, password }),
            (Some(_), None) => return Err(ConfigError::MissingVar(SEED_ADMIN_PASSWORD_ENV)),
            (None, Some(_)) => return Err(ConfigError::MissingVar(SEED_ADMIN_USERNAME_ENV)),
            (None, None) => None,
        };

        Ok(Self {
            token_secret,
            token_ttl: Duration::hours(ttl_hours),
            host,
            port,
            seed_admin,
        })
    }

    /// `host:port`, suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Whether `LOG_FORMAT` asks for JSON output.
pub fn json_logs(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("json"))
}
