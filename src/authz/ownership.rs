// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ownership of catalog entries.
//!
//! An author owns an entry when their display name appears in the entry's
//! author list (exact, case-sensitive). Admins own everything. A principal
//! without a display name owns nothing, even if the author list contains an
//! empty string.

use crate::auth::{Principal, Role};
use crate::models::ContentItem;

use super::{AuthzError, AuthzResult};

/// Trait for resources that credit a list of authors.
pub trait AuthoredResource {
    fn author_names(&self) -> &[String];
}

impl AuthoredResource for ContentItem {
    fn author_names(&self) -> &[String] {
        &self.author_names
    }
}

/// Decide whether `principal` owns `resource`.
pub fn is_owner<R: AuthoredResource + ?Sized>(principal: &Principal, resource: &R) -> bool {
    if principal.role == Role::Admin {
        return true;
    }

    match principal.display_name() {
        Some(name) => resource.author_names().iter().any(|author| author == name),
        None => false,
    }
}

/// Trait for enforcing ownership before a mutation.
pub trait OwnershipEnforcer {
    /// Verify that the principal owns this resource.
    ///
    /// # Errors
    /// Returns `AuthzError::Unauthorized(not_owner_message)` otherwise.
    fn verify_ownership(&self, principal: &Principal, not_owner_message: &str) -> AuthzResult<()>;
}

impl<T: AuthoredResource + ?Sized> OwnershipEnforcer for T {
    fn verify_ownership(&self, principal: &Principal, not_owner_message: &str) -> AuthzResult<()> {
        if is_owner(principal, self) {
            Ok(())
        } else {
            Err(AuthzError::unauthorized(not_owner_message))
        }
    }
}
