// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Catalog Guard - role- and ownership-based authorization for a book catalog
//!
//! Authors may add and edit books they are credited on, admins may do
//! anything, and everyone else may only read. Every mutation runs through a
//! fixed chain of checks before the store is touched.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Bearer tokens, passwords and principal resolution
//! - `authz` - Authorization chain and per-operation strategies
//! - `store` - User and catalog storage traits with in-memory backends

pub mod api;
pub mod auth;
pub mod authz;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
