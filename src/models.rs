// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Catalog entries and the request/response bodies used by the REST API.
//! All types derive `Serialize`, `Deserialize`, and `ToSchema` for JSON
//! handling and OpenAPI documentation.
//!
//! Only `id`, `title` and `author_names` of a [`ContentItem`] take part in
//! authorization; the rest is carried through to the store untouched.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// =============================================================================
// Catalog Models
// =============================================================================

/// A catalog entry (book).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ContentItem {
    /// Unique identifier.
    pub id: Uuid,
    /// Title of the book.
    pub title: String,
    /// Authors, in credit order. Matched against author display names.
    pub author_names: Vec<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Year of first publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
}

impl ContentItem {
    /// Create an entry with a fresh id.
    pub fn new<I, S>(title: impl Into<String>, author_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            author_names: author_names.into_iter().map(Into::into).collect(),
            description: None,
            published_year: None,
        }
    }

    /// A bare reference to an entry by id, used when the stored entry is unknown.
    pub fn reference(id: Uuid) -> Self {
        Self {
            id,
            title: String::new(),
            author_names: Vec::new(),
            description: None,
            published_year: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// True if both entries credit at least one common author.
    pub fn shares_author_with(&self, other: &ContentItem) -> bool {
        self.author_names
            .iter()
            .any(|name| other.author_names.contains(name))
    }

    /// Build an entry from a request body.
    pub fn from_request(id: Uuid, request: BookRequest) -> Self {
        Self {
            id,
            title: request.title,
            author_names: request.author_names,
            description: request.description,
            published_year: request.published_year,
        }
    }
}

/// Request to add or edit a book.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookRequest {
    /// Title of the book.
    pub title: String,
    /// Authors, in credit order.
    pub author_names: Vec<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Year of first publication.
    #[serde(default)]
    pub published_year: Option<i32>,
}

// =============================================================================
// Login Models
// =============================================================================

/// Request to exchange credentials for a bearer token.
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Compact signed token.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Expiry as a Unix timestamp (seconds).
    pub expires_at: i64,
}
