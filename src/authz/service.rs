// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Entry points into the authorization core.

use std::sync::Arc;

use super::chain::AuthorizationChain;
use super::request::AuthorizationRequest;
use super::strategy::Operation;
use super::AuthzResult;
use crate::auth::{parse_bearer, AuthError, IssuedToken, PasswordVerifier, PrincipalResolver, TokenCodec};
use crate::clock::Clock;
use crate::models::ContentItem;
use crate::store::{ContentStore, UserStore};

/// Login plus token-gated catalog mutations.
#[derive(Clone)]
pub struct AuthorizationService {
    resolver: PrincipalResolver,
    chain: AuthorizationChain,
    content: Arc<dyn ContentStore>,
}

impl AuthorizationService {
    pub fn new(
        codec: TokenCodec,
        users: Arc<dyn UserStore>,
        content: Arc<dyn ContentStore>,
        passwords: Arc<dyn PasswordVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            resolver: PrincipalResolver::new(codec, users.clone(), passwords, clock),
            chain: AuthorizationChain::new(users, content.clone()),
            content,
        }
    }

    pub fn resolver(&self) -> &PrincipalResolver {
        &self.resolver
    }

    /// Read access for unauthenticated catalog queries.
    pub fn content(&self) -> &Arc<dyn ContentStore> {
        &self.content
    }

    /// # Errors
    /// `InvalidCredentials` or `UserDisabled`.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        self.resolver.authenticate(username, password)
    }

    /// Authorize and, if permitted, perform `operation` on `item`.
    ///
    /// The token is validated before anything else, so an expired or forged
    /// token never reaches the role or ownership checks.
    pub fn authorize(
        &self,
        token: &str,
        operation: Operation,
        item: ContentItem,
    ) -> AuthzResult<ContentItem> {
        let principal = self.resolver.resolve(token)?;
        let request = AuthorizationRequest::new(principal, item, operation.strategy())?;
        self.chain.process(request)
    }

    /// Same as [`authorize`](Self::authorize), starting from a raw
    /// `Authorization` header value.
    pub fn authorize_header(
        &self,
        header: &str,
        operation: Operation,
        item: ContentItem,
    ) -> AuthzResult<ContentItem> {
        let token = parse_bearer(header)?;
        self.authorize(token, operation, item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Principal, Role};
    use crate::authz::AuthzError;
    use crate::clock::FixedClock;
    use crate::store::{InMemoryContentStore, InMemoryUserStore, UserRecord};
    use chrono::Duration;

    const SECRET: &[u8] = b"test-secret-that-is-at-least-32-bytes!!";

    /// Compares plaintext; keeps these tests off the Argon2 cost.
    struct PlainVerifier;

    impl PasswordVerifier for PlainVerifier {
        fn verify(&self, password: &str, password_hash: &str) -> Result<bool, AuthError> {
            Ok(password == password_hash)
        }

        fn verify_absent(&self, _password: &str) {}
    }

    struct Fixture {
        users: Arc<InMemoryUserStore>,
        content: Arc<InMemoryContentStore>,
        clock: Arc<FixedClock>,
        service: AuthorizationService,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserStore::new());
        for (username, role, display_name) in [
            ("alice", Role::Author, Some("Alice Writer")),
            ("bob", Role::RegularUser, None),
            ("root", Role::Admin, Some("Site Admin")),
        ] {
            users.insert(UserRecord {
                username: username.to_string(),
                role,
                display_name: display_name.map(str::to_string),
                active: true,
                password_hash: format!("{username}-pw"),
            });
        }
        let content = Arc::new(InMemoryContentStore::new());
        let clock = Arc::new(FixedClock::at_timestamp(1_700_000_000));
        let service = AuthorizationService::new(
            TokenCodec::new(SECRET),
            users.clone(),
            content.clone(),
            Arc::new(PlainVerifier),
            clock.clone(),
        );
        Fixture {
            users,
            content,
            clock,
            service,
        }
    }

    impl Fixture {
        fn login(&self, username: &str) -> String {
            self.service
                .authenticate(username, &format!("{username}-pw"))
                .unwrap()
                .token
        }
    }

    #[test]
    fn alice_adds_and_edits_her_book_but_not_bobs() {
        let f = fixture();
        let token = f.login("alice");

        let book = ContentItem::new("Book A", ["Alice Writer"]);
        f.service.authorize(&token, Operation::Add, book.clone()).unwrap();
        f.service.authorize(&token, Operation::Edit, book.clone()).unwrap();

        let other = ContentItem::new("Book A", ["Bob Other"]).with_id(book.id);
        match f.service.authorize(&token, Operation::Edit, other) {
            Err(AuthzError::Unauthorized(msg)) => {
                assert_eq!(msg, "Only the authors of the book may edit it!")
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn expired_token_fails_before_any_gate() {
        let f = fixture();
        // A regular user would fail the role gate; expiry must win.
        let token = f.login("bob");
        f.clock.advance(Duration::hours(25));

        let result = f
            .service
            .authorize(&token, Operation::Delete, ContentItem::new("Book A", ["x"]));
        assert!(matches!(result, Err(AuthzError::TokenExpired)));
    }

    #[test]
    fn forged_token_is_malformed() {
        let f = fixture();
        let forger = TokenCodec::new(b"not-the-server-secret-but-long-enough");
        let root = Principal {
            username: "root".to_string(),
            role: Role::Admin,
            display_name: None,
            active: true,
        };
        let token = forger.issue(&root, f.clock.now()).unwrap();

        let result = f
            .service
            .authorize(&token, Operation::Add, ContentItem::new("Book A", ["x"]));
        assert!(matches!(result, Err(AuthzError::TokenMalformed)));
        assert!(f.content.is_empty());
    }

    #[test]
    fn deactivated_user_with_valid_token_does_not_exist() {
        let f = fixture();
        let token = f.login("alice");
        f.users.set_active("alice", false);

        match f
            .service
            .authorize(&token, Operation::Add, ContentItem::new("Book A", ["Alice Writer"]))
        {
            Err(AuthzError::Unauthorized(msg)) => assert_eq!(msg, "User does not exist!"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(f.content.is_empty());
    }

    #[test]
    fn admin_deletes_any_book() {
        let f = fixture();
        let book = ContentItem::new("Book A", ["Bob Other"]);
        f.content.save(&book).unwrap();

        let token = f.login("root");
        let deleted = f
            .service
            .authorize(&token, Operation::Delete, ContentItem::reference(book.id))
            .unwrap();
        assert_eq!(deleted, book);
        assert!(f.content.is_empty());
    }

    #[test]
    fn header_must_be_exact_bearer_form() {
        let f = fixture();
        let token = f.login("root");
        let item = ContentItem::new("Book A", ["x"]);

        for header in [
            token.clone(),
            format!("bearer {token}"),
            format!("Bearer  {token}"),
            format!("Bearer {token} "),
        ] {
            let result = f.service.authorize_header(&header, Operation::Add, item.clone());
            assert!(matches!(result, Err(AuthzError::Unauthorized(_))), "{header}");
        }
        assert!(f.content.is_empty());

        f.service
            .authorize_header(&format!("Bearer {token}"), Operation::Add, item)
            .unwrap();
        assert_eq!(f.content.len(), 1);
    }

    #[test]
    fn header_garbage_is_rejected_before_token_parsing() {
        let f = fixture();
        // Valid prefix, broken token: now it is the codec's turn.
        let result = f.service.authorize_header(
            "Bearer not.a.token",
            Operation::Add,
            ContentItem::new("Book A", ["x"]),
        );
        assert!(matches!(result, Err(AuthzError::TokenMalformed)));
    }
}
