// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-operation authorization strategies.
//!
//! A strategy is plain data: which roles may attempt the operation, what to
//! say when they may not, and the terminal action to run once every gate has
//! passed. There is one `static` strategy per mutating operation.
//!
//! | Operation | Allowed roles | Ownership |
//! |-----------|---------------|-----------|
//! | Add | Author, Admin | required for Author |
//! | Edit | Author, Admin | required for Author |
//! | Delete | Admin | n/a |

use super::{AuthzError, AuthzResult};
use crate::auth::Role;
use crate::models::ContentItem;
use crate::store::ContentStore;

/// Mutating catalog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Edit,
    Delete,
}

impl Operation {
    /// The strategy that governs this operation.
    pub fn strategy(self) -> &'static OperationStrategy {
        match self {
            Operation::Add => &ADD,
            Operation::Edit => &EDIT,
            Operation::Delete => &DELETE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mutation run once all gates pass.
pub type TerminalAction = fn(&dyn ContentStore, ContentItem) -> AuthzResult<ContentItem>;

/// Immutable, operation-scoped authorization configuration.
pub struct OperationStrategy {
    pub operation: Operation,
    pub allowed_roles: &'static [Role],
    /// Returned verbatim when the role gate rejects
    pub unauthorized_message: &'static str,
    /// Returned verbatim when the ownership gate rejects
    pub not_owner_message: &'static str,
    pub action: TerminalAction,
}

impl OperationStrategy {
    /// Whether `role` may ever perform this operation.
    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }

    pub fn execute(&self, store: &dyn ContentStore, item: ContentItem) -> AuthzResult<ContentItem> {
        (self.action)(store, item)
    }
}

impl std::fmt::Debug for OperationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationStrategy")
            .field("operation", &self.operation)
            .field("allowed_roles", &self.allowed_roles)
            .field("unauthorized_message", &self.unauthorized_message)
            .field("not_owner_message", &self.not_owner_message)
            .finish_non_exhaustive()
    }
}

pub static ADD: OperationStrategy = OperationStrategy {
    operation: Operation::Add,
    allowed_roles: &[Role::Author, Role::Admin],
    unauthorized_message: "Only authors and admins may add books!",
    not_owner_message: "Only the authors of the book may add it!",
    action: add_item,
};

pub static EDIT: OperationStrategy = OperationStrategy {
    operation: Operation::Edit,
    allowed_roles: &[Role::Author, Role::Admin],
    unauthorized_message: "Only authors and admins may edit books!",
    not_owner_message: "Only the authors of the book may edit it!",
    action: edit_item,
};

pub static DELETE: OperationStrategy = OperationStrategy {
    operation: Operation::Delete,
    allowed_roles: &[Role::Admin],
    unauthorized_message: "Only admins may delete books!",
    not_owner_message: "Only admins may delete books!",
    action: delete_item,
};

const BOOK_NOT_FOUND: &str = "Book not found!";

/// Create the entry unless an entry with the same title shares an author.
fn add_item(store: &dyn ContentStore, item: ContentItem) -> AuthzResult<ContentItem> {
    let duplicate = store
        .find_by_title(&item.title)?
        .iter()
        .any(|existing| existing.shares_author_with(&item));

    if duplicate {
        return Err(AuthzError::Conflict(format!(
            "A book titled '{}' by the same author already exists!",
            item.title
        )));
    }

    store.save(&item)?;
    Ok(item)
}

/// Overwrite the mutable fields of an existing entry.
fn edit_item(store: &dyn ContentStore, item: ContentItem) -> AuthzResult<ContentItem> {
    let Some(mut existing) = store.find_by_id(item.id)? else {
        return Err(AuthzError::NotFound(BOOK_NOT_FOUND.to_string()));
    };

    existing.title = item.title;
    existing.author_names = item.author_names;
    existing.description = item.description;
    existing.published_year = item.published_year;

    store.save(&existing)?;
    Ok(existing)
}

/// Remove an existing entry, returning it.
fn delete_item(store: &dyn ContentStore, item: ContentItem) -> AuthzResult<ContentItem> {
    let Some(existing) = store.find_by_id(item.id)? else {
        return Err(AuthzError::NotFound(BOOK_NOT_FOUND.to_string()));
    };

    store.delete(existing.id)?;
    Ok(existing)
}
