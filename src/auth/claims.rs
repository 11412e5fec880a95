// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and the resolved principal.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;
use crate::store::UserRecord;

/// Claims carried in a bearer token payload.
///
/// Timestamps are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Role at the time of issue
    pub role: Role,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Resolved identity of the requester.
///
/// This is the primary type used throughout the application to represent
/// the user making a request. It is built from the user store, never from
/// token claims alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    /// Unique login name
    pub username: String,
    /// User's role
    pub role: Role,
    /// Name as it appears in author lists (may be unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the account is active
    pub active: bool,
}

impl Principal {
    /// Create from a user store record.
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            username: record.username.clone(),
            role: record.role,
            display_name: record.display_name.clone(),
            active: record.active,
        }
    }

    /// Display name, if set and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|name| !name.is_empty())
    }
}
