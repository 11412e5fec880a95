// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password verification.
//!
//! Hashing lives behind [`PasswordVerifier`] so the account store can keep
//! whatever PHC format it likes. The default is Argon2id.

use std::sync::LazyLock;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier as _,
};

use super::AuthError;

/// Checks a plaintext password against a stored hash.
pub trait PasswordVerifier: Send + Sync {
    /// Returns `Ok(false)` on mismatch, `Err` only if the hash is unusable.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError>;

    /// Spend what a failed [`verify`](Self::verify) costs, for a username
    /// with no account. Unknown users must not be rejected faster than
    /// wrong passwords.
    fn verify_absent(&self, password: &str);
}

/// Stand-in hash checked when the account does not exist.
static ABSENT_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("absent-account-placeholder").ok());

/// Argon2id verifier for PHC-formatted hashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Verifier;

impl PasswordVerifier for Argon2Verifier {
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash format: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::Internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    fn verify_absent(&self, password: &str) {
        if let Some(hash) = ABSENT_ACCOUNT_HASH.as_deref() {
            let _ = self.verify(password, hash);
        }
    }
}

/// Hash a password with Argon2id and a random salt.
///
/// Used when seeding accounts; registration is handled elsewhere.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(rand::thread_rng());
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {e}")))
}
