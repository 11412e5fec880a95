// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The authorization chain.
//!
//! Three gates run in a fixed order against an [`AuthorizationRequest`]:
//!
//! 1. [`ExistenceGate`] - the principal's account still exists and is active
//! 2. [`RoleGate`] - the principal's role may ever perform this operation
//! 3. [`OwnershipGate`] - the principal owns this particular item
//!
//! If all pass, the strategy's terminal action runs. The first rejection
//! ends the request and the terminal action is never reached. Gates are
//! stateless unit structs; everything they need travels in the request.

use std::sync::Arc;

use super::ownership::OwnershipEnforcer;
use super::request::AuthorizationRequest;
use super::{AuthzError, AuthzResult};
use crate::auth::{Role, USER_DOES_NOT_EXIST};
use crate::models::ContentItem;
use crate::store::{ContentStore, UserStore};

/// Collaborators a gate may consult.
pub struct GateContext<'a> {
    pub users: &'a dyn UserStore,
}

/// One stage of the chain.
///
/// Returns `Ok(())` to forward the request to the next stage, or the
/// rejection that ends it.
pub trait Gate: Send + Sync {
    fn name(&self) -> &'static str;

    fn check(&self, request: &AuthorizationRequest, ctx: &GateContext<'_>) -> AuthzResult<()>;
}

/// Re-reads the principal's account, since the request may have been built
/// from stale data.
pub struct ExistenceGate;

impl Gate for ExistenceGate {
    fn name(&self) -> &'static str {
        "existence"
    }

    fn check(&self, request: &AuthorizationRequest, ctx: &GateContext<'_>) -> AuthzResult<()> {
        let principal = request.principal();
        if !principal.active {
            return Err(AuthzError::unauthorized(USER_DOES_NOT_EXIST));
        }

        match ctx.users.find_by_username(&principal.username)? {
            Some(record) if record.active => Ok(()),
            _ => Err(AuthzError::unauthorized(USER_DOES_NOT_EXIST)),
        }
    }
}

pub struct RoleGate;

impl Gate for RoleGate {
    fn name(&self) -> &'static str {
        "role"
    }

    fn check(&self, request: &AuthorizationRequest, _ctx: &GateContext<'_>) -> AuthzResult<()> {
        let strategy = request.strategy();
        if strategy.allows(request.principal().role) {
            Ok(())
        } else {
            Err(AuthzError::unauthorized(strategy.unauthorized_message))
        }
    }
}

/// Admins bypass ownership; everyone else must own the item.
///
/// Ownership is judged on the item carried by the request, as the caller
/// sent it. For Edit that is the incoming replacement, not the stored entry,
/// so an author who lists their own display name on someone else's book
/// passes this gate.
pub struct OwnershipGate;

impl Gate for OwnershipGate {
    fn name(&self) -> &'static str {
        "ownership"
    }

    fn check(&self, request: &AuthorizationRequest, _ctx: &GateContext<'_>) -> AuthzResult<()> {
        let principal = request.principal();
        match principal.role {
            Role::Admin => Ok(()),
            Role::Author | Role::RegularUser => request
                .item()
                .verify_ownership(principal, request.strategy().not_owner_message),
        }
    }
}

static STAGES: [&dyn Gate; 3] = [&ExistenceGate, &RoleGate, &OwnershipGate];

/// Runs requests through the gates and, on success, the terminal action.
#[derive(Clone)]
pub struct AuthorizationChain {
    users: Arc<dyn UserStore>,
    content: Arc<dyn ContentStore>,
}

impl AuthorizationChain {
    pub fn new(users: Arc<dyn UserStore>, content: Arc<dyn ContentStore>) -> Self {
        Self { users, content }
    }

    /// The gates, in the order they run.
    pub fn stages() -> &'static [&'static dyn Gate] {
        &STAGES
    }

    /// Process one request to completion.
    ///
    /// Returns the item as written (or removed) by the terminal action.
    pub fn process(&self, request: AuthorizationRequest) -> AuthzResult<ContentItem> {
        let ctx = GateContext {
            users: self.users.as_ref(),
        };
        let operation = request.strategy().operation;
        let username = request.principal().username.clone();

        for gate in Self::stages() {
            if let Err(e) = gate.check(&request, &ctx) {
                tracing::warn!(
                    %username,
                    %operation,
                    gate = gate.name(),
                    error_code = e.error_code(),
                    reason = %e,
                    "Authorization rejected"
                );
                return Err(e);
            }
            tracing::debug!(%username, %operation, gate = gate.name(), "Gate passed");
        }

        let strategy = request.strategy();
        let item_id = request.item().id;
        match strategy.execute(self.content.as_ref(), request.into_item()) {
            Ok(item) => {
                tracing::info!(%username, %operation, %item_id, "Catalog mutation applied");
                Ok(item)
            }
            Err(e) => {
                tracing::warn!(
                    %username,
                    %operation,
                    %item_id,
                    error_code = e.error_code(),
                    reason = %e,
                    "Catalog mutation failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Principal;
    use crate::authz::strategy::{Operation, OperationStrategy, ADD, DELETE, EDIT};
    use crate::store::{InMemoryContentStore, InMemoryUserStore, UserRecord};

    struct Fixture {
        users: Arc<InMemoryUserStore>,
        content: Arc<InMemoryContentStore>,
        chain: AuthorizationChain,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserStore::new());
        for (username, role, display_name) in [
            ("alice", Role::Author, Some("Alice Writer")),
            ("nameless", Role::Author, None),
            ("reader", Role::RegularUser, Some("Alice Writer")),
            ("root", Role::Admin, None),
        ] {
            users.insert(UserRecord {
                username: username.to_string(),
                role,
                display_name: display_name.map(str::to_string),
                active: true,
                password_hash: String::new(),
            });
        }
        let content = Arc::new(InMemoryContentStore::new());
        let chain = AuthorizationChain::new(users.clone(), content.clone());
        Fixture {
            users,
            content,
            chain,
        }
    }

    impl Fixture {
        fn principal(&self, username: &str) -> Principal {
            Principal::from_record(&self.users.find_by_username(username).unwrap().unwrap())
        }

        fn run(
            &self,
            username: &str,
            strategy: &'static OperationStrategy,
            item: ContentItem,
        ) -> AuthzResult<ContentItem> {
            let request = AuthorizationRequest::new(self.principal(username), item, strategy)?;
            self.chain.process(request)
        }

        fn stored(&self, title: &str, authors: &[&str]) -> ContentItem {
            let item = ContentItem::new(title, authors.iter().copied());
            self.content.save(&item).unwrap();
            item
        }
    }

    fn unauthorized_message(result: AuthzResult<ContentItem>) -> String {
        match result {
            Err(AuthzError::Unauthorized(msg)) => msg,
            other => panic!("expected Unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn stages_run_in_fixed_order() {
        let names: Vec<_> = AuthorizationChain::stages().iter().map(|g| g.name()).collect();
        assert_eq!(names, ["existence", "role", "ownership"]);
    }

    #[test]
    fn author_adds_and_edits_owned_item() {
        let f = fixture();
        let item = ContentItem::new("Book A", ["Alice Writer"]);

        let created = f.run("alice", &ADD, item.clone()).unwrap();
        assert_eq!(created, item);

        let mut change = item.clone();
        change.description = Some("Revised".to_string());
        let updated = f.run("alice", &EDIT, change).unwrap();
        assert_eq!(updated.description.as_deref(), Some("Revised"));
        assert_eq!(f.content.len(), 1);
    }

    #[test]
    fn author_cannot_edit_item_owned_by_someone_else() {
        let f = fixture();
        let other = f.stored("Book A", &["Bob Other"]);

        let msg = unauthorized_message(f.run("alice", &EDIT, other.clone()));
        assert_eq!(msg, "Only the authors of the book may edit it!");
        assert_eq!(f.content.find_by_id(other.id).unwrap(), Some(other));
    }

    #[test]
    fn edit_ownership_is_judged_on_the_incoming_item() {
        let f = fixture();
        let other = f.stored("Book A", &["Bob Other"]);

        let relisted = ContentItem::new("Book A", ["Alice Writer"]).with_id(other.id);
        let updated = f.run("alice", &EDIT, relisted).unwrap();
        assert_eq!(updated.author_names, ["Alice Writer"]);
        assert_eq!(f.content.find_by_id(other.id).unwrap(), Some(updated));
    }

    #[test]
    fn author_cannot_add_item_crediting_someone_else() {
        let f = fixture();
        let msg = unauthorized_message(f.run("alice", &ADD, ContentItem::new("Book A", ["Bob Other"])));
        assert_eq!(msg, ADD.not_owner_message);
        assert!(f.content.is_empty());
    }

    #[test]
    fn author_without_display_name_owns_nothing() {
        let f = fixture();
        let msg = unauthorized_message(f.run("nameless", &ADD, ContentItem::new("Book A", [""])));
        assert_eq!(msg, ADD.not_owner_message);
    }

    #[test]
    fn author_can_never_delete() {
        let f = fixture();
        let owned = f.stored("Book A", &["Alice Writer"]);

        let msg = unauthorized_message(f.run("alice", &DELETE, owned.clone()));
        assert_eq!(msg, "Only admins may delete books!");
        assert_eq!(f.content.len(), 1);
    }

    #[test]
    fn regular_user_is_always_rejected_by_role() {
        let f = fixture();
        // The reader's display name matches, which must not help.
        let owned = f.stored("Book A", &["Alice Writer"]);

        for strategy in [&ADD, &EDIT, &DELETE] {
            let item = if strategy.operation == Operation::Add {
                ContentItem::new("Book B", ["Alice Writer"])
            } else {
                owned.clone()
            };
            let msg = unauthorized_message(f.run("reader", strategy, item));
            assert_eq!(msg, strategy.unauthorized_message);
        }
        assert_eq!(f.content.list(), vec![owned]);
    }

    #[test]
    fn admin_bypasses_ownership_for_every_operation() {
        let f = fixture();
        let item = ContentItem::new("Book A", ["Bob Other"]);

        f.run("root", &ADD, item.clone()).unwrap();

        let mut change = item.clone();
        change.title = "Book A, Revised".to_string();
        f.run("root", &EDIT, change).unwrap();

        let deleted = f.run("root", &DELETE, ContentItem::reference(item.id)).unwrap();
        assert_eq!(deleted.title, "Book A, Revised");
        assert!(f.content.is_empty());
    }

    #[test]
    fn duplicate_add_is_conflict_without_write() {
        let f = fixture();
        f.stored("Book A", &["Alice Writer", "Carol Coauthor"]);

        let result = f.run("alice", &ADD, ContentItem::new("Book A", ["Alice Writer"]));
        assert!(matches!(result, Err(AuthzError::Conflict(_))));
        assert_eq!(f.content.len(), 1);
    }

    #[test]
    fn edit_and_delete_of_missing_item_are_not_found_after_gates() {
        let f = fixture();
        let ghost = ContentItem::new("Ghost", ["Alice Writer"]);

        assert!(matches!(f.run("alice", &EDIT, ghost.clone()), Err(AuthzError::NotFound(_))));
        assert!(matches!(f.run("root", &DELETE, ghost.clone()), Err(AuthzError::NotFound(_))));
        // Gates still win over the missing target.
        assert!(matches!(f.run("reader", &DELETE, ghost), Err(AuthzError::Unauthorized(_))));
    }

    #[test]
    fn stale_principal_is_rejected_before_role_check() {
        let f = fixture();
        let stale = f.principal("root");
        f.users.set_active("root", false);

        let request =
            AuthorizationRequest::new(stale, ContentItem::new("Book A", ["Alice Writer"]), &ADD).unwrap();
        let msg = unauthorized_message(f.chain.process(request));
        assert_eq!(msg, "User does not exist!");
        assert!(f.content.is_empty());
    }

    #[test]
    fn removed_or_inactive_principal_does_not_exist() {
        let f = fixture();
        let stale = f.principal("alice");
        f.users.remove("alice");

        let request =
            AuthorizationRequest::new(stale, ContentItem::new("Book A", ["Alice Writer"]), &ADD).unwrap();
        assert_eq!(unauthorized_message(f.chain.process(request)), USER_DOES_NOT_EXIST);

        let mut inactive = f.principal("root");
        inactive.active = false;
        let request =
            AuthorizationRequest::new(inactive, ContentItem::new("Book A", ["x"]), &ADD).unwrap();
        assert_eq!(unauthorized_message(f.chain.process(request)), USER_DOES_NOT_EXIST);
    }

    fn must_not_run(_store: &dyn ContentStore, _item: ContentItem) -> AuthzResult<ContentItem> {
        panic!("terminal action ran after a rejection");
    }

    static GUARDED: OperationStrategy = OperationStrategy {
        operation: Operation::Edit,
        allowed_roles: &[Role::Author],
        unauthorized_message: "role says no",
        not_owner_message: "owner says no",
        action: must_not_run,
    };

    #[test]
    fn rejection_never_reaches_terminal_action() {
        let f = fixture();
        let not_owned = ContentItem::new("Book A", ["Bob Other"]);

        assert_eq!(unauthorized_message(f.run("root", &GUARDED, not_owned.clone())), "role says no");
        assert_eq!(unauthorized_message(f.run("alice", &GUARDED, not_owned)), "owner says no");
    }

    #[test]
    fn concurrent_requests_keep_their_own_strategy() {
        let f = fixture();
        let owned = f.stored("Shared", &["Alice Writer"]);

        std::thread::scope(|scope| {
            for i in 0..8 {
                let f = &f;
                let owned = owned.clone();
                scope.spawn(move || {
                    for _ in 0..50 {
                        // Author delete must always be a role rejection.
                        let msg = unauthorized_message(f.run("alice", &DELETE, owned.clone()));
                        assert_eq!(msg, DELETE.unauthorized_message);

                        // Author edit of an owned item must always pass.
                        let mut change = owned.clone();
                        change.description = Some(format!("thread {i}"));
                        f.run("alice", &EDIT, change).unwrap();

                        // Author add of someone else's book is an ownership rejection.
                        let msg = unauthorized_message(f.run(
                            "alice",
                            &ADD,
                            ContentItem::new("Other", ["Bob Other"]),
                        ));
                        assert_eq!(msg, ADD.not_owner_message);
                    }
                });
            }
        });

        assert_eq!(f.content.len(), 1);
    }
}
