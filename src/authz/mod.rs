// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! Decides whether an authenticated principal may add, edit or delete a
//! catalog entry, and performs the mutation when it may.
//!
//! ## Flow
//!
//! 1. The bearer token is validated and resolved to a [`Principal`](crate::auth::Principal)
//! 2. An [`AuthorizationRequest`] binds the principal, the item and the
//!    operation's static [`OperationStrategy`]
//! 3. The [`AuthorizationChain`] runs its gates in order; the first
//!    rejection wins
//! 4. The strategy's terminal action touches the content store
//!
//! Requests share no mutable state, so concurrent mutations cannot observe
//! each other's strategy.

pub mod chain;
pub mod error;
pub mod ownership;
pub mod request;
pub mod service;
pub mod strategy;

pub use chain::{AuthorizationChain, ExistenceGate, Gate, GateContext, OwnershipGate, RoleGate};
pub use error::{AuthzError, AuthzResult};
pub use ownership::{is_owner, AuthoredResource, OwnershipEnforcer};
pub use request::AuthorizationRequest;
pub use service::AuthorizationService;
pub use strategy::{Operation, OperationStrategy};
