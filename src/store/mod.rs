// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Store Collaborators
//!
//! Narrow interfaces to user and catalog persistence. The authorization core
//! only ever talks to these traits; [`memory`] provides the in-process
//! implementations used by the server binary and tests.
//!
//! Stores are expected to give read-after-write consistency for single-key
//! lookups. Nothing here is transactional beyond a single save or delete.

pub mod memory;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Role;
use crate::models::ContentItem;

pub use memory::{InMemoryContentStore, InMemoryUserStore};

/// Error type for store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),
    /// Backend could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Account record as held by the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub role: Role,
    /// Name matched against catalog author lists
    pub display_name: Option<String>,
    /// False once the account is banned or deactivated
    pub active: bool,
    /// PHC-formatted password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Read access to user accounts.
pub trait UserStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>>;
}

/// Catalog persistence.
pub trait ContentStore: Send + Sync {
    /// All entries with exactly this title.
    fn find_by_title(&self, title: &str) -> StoreResult<Vec<ContentItem>>;

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ContentItem>>;

    /// Insert or overwrite by id.
    fn save(&self, item: &ContentItem) -> StoreResult<()>;

    /// # Errors
    /// Returns `StoreError::NotFound` if no entry has this id.
    fn delete(&self, id: Uuid) -> StoreResult<()>;
}
