// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// The set is closed: every principal has exactly one of these.
///
/// - `RegularUser` - Can read the catalog, never mutate it
/// - `Author` - Can add and edit entries that list them as author
/// - `Admin` - Can add, edit and delete any entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Reader with no mutation rights
    RegularUser,
    /// Content owner
    Author,
    /// Full administrative access
    Admin,
}

impl Role {
    /// Wire representation, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::RegularUser => "REGULAR_USER",
            Role::Author => "AUTHOR",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
