// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The value that flows through the authorization chain.

use super::strategy::OperationStrategy;
use super::{AuthzError, AuthzResult};
use crate::auth::Principal;
use crate::models::ContentItem;

/// One mutation attempt: who, on what, under which strategy.
///
/// Built once per incoming mutation and consumed by the chain. Fields are
/// private so nothing can swap the strategy or principal mid-flight.
#[derive(Debug)]
pub struct AuthorizationRequest {
    principal: Principal,
    item: ContentItem,
    strategy: &'static OperationStrategy,
}

impl AuthorizationRequest {
    /// # Errors
    /// Returns `AuthzError::InvalidRequest` if the principal has no username
    /// or the item has a nil id.
    pub fn new(
        principal: Principal,
        item: ContentItem,
        strategy: &'static OperationStrategy,
    ) -> AuthzResult<Self> {
        if principal.username.is_empty() {
            return Err(AuthzError::InvalidRequest(
                "principal has no username".to_string(),
            ));
        }
        if item.id.is_nil() {
            return Err(AuthzError::InvalidRequest("item has no id".to_string()));
        }

        Ok(Self {
            principal,
            item,
            strategy,
        })
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn item(&self) -> &ContentItem {
        &self.item
    }

    pub fn strategy(&self) -> &'static OperationStrategy {
        self.strategy
    }

    /// Give up the item for the terminal action.
    pub(crate) fn into_item(self) -> ContentItem {
        self.item
    }
}
