// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{PasswordVerifier, TokenCodec};
use crate::authz::AuthorizationService;
use crate::clock::Clock;
use crate::store::{ContentStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AuthorizationService>,
}

impl AppState {
    pub fn new(service: AuthorizationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    pub fn from_parts(
        codec: TokenCodec,
        users: Arc<dyn UserStore>,
        content: Arc<dyn ContentStore>,
        passwords: Arc<dyn PasswordVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(AuthorizationService::new(
            codec, users, content, passwords, clock,
        ))
    }
}
