// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer-token identity for the catalog API.
//!
//! ## Auth Flow
//!
//! 1. Client posts credentials to `/v1/auth/login`
//! 2. Server verifies the password hash and issues an HS256 token
//!    carrying `{sub, role, iat, exp}`
//! 3. Client sends `Authorization: Bearer <token>` on later requests
//! 4. Server:
//!    - Verifies signature and expiry against the injected clock
//!    - Looks the subject up in the user store
//!    - Rejects unknown and deactivated accounts identically
//!
//! ## Security
//!
//! - Tokens are signed with a shared secret (at least 32 bytes)
//! - The user store, not the token, is authoritative for role and status
//! - Token lifetime defaults to 24 hours with no clock-skew leeway

pub mod claims;
pub mod error;
pub mod extractor;
pub mod password;
pub mod resolver;
pub mod roles;
pub mod token;

pub use claims::{Claims, Principal};
pub use error::{AuthError, USER_DOES_NOT_EXIST};
pub use extractor::{parse_bearer, Auth, BearerHeader};
pub use password::{hash_password, Argon2Verifier, PasswordVerifier};
pub use resolver::{IssuedToken, PrincipalResolver};
pub use roles::Role;
pub use token::{TokenCodec, TokenError};
