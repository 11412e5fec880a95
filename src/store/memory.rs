// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory stores.
//!
//! Each store guards a `HashMap` with a `std::sync::RwLock`. Lock poisoning
//! is recovered from: every write is a single map operation, so a panicking
//! writer cannot leave an entry half-updated.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use super::{ContentStore, StoreError, StoreResult, UserRecord, UserStore};
use crate::models::ContentItem;

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account.
    pub fn insert(&self, record: UserRecord) {
        write(&self.users).insert(record.username.clone(), record);
    }

    /// Activate or deactivate an account. Returns false if it does not exist.
    pub fn set_active(&self, username: &str, active: bool) -> bool {
        match write(&self.users).get_mut(username) {
            Some(record) => {
                record.active = active;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, username: &str) -> Option<UserRecord> {
        write(&self.users).remove(username)
    }

    pub fn len(&self) -> usize {
        read(&self.users).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_username(&self, username: &str) -> StoreResult<Option<UserRecord>> {
        Ok(read(&self.users).get(username).cloned())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    items: RwLock<HashMap<Uuid, ContentItem>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, in no particular order.
    pub fn list(&self) -> Vec<ContentItem> {
        read(&self.items).values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        read(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentStore for InMemoryContentStore {
    fn find_by_title(&self, title: &str) -> StoreResult<Vec<ContentItem>> {
        Ok(read(&self.items)
            .values()
            .filter(|item| item.title == title)
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: Uuid) -> StoreResult<Option<ContentItem>> {
        Ok(read(&self.items).get(&id).cloned())
    }

    fn save(&self, item: &ContentItem) -> StoreResult<()> {
        write(&self.items).insert(item.id, item.clone());
        Ok(())
    }

    fn delete(&self, id: Uuid) -> StoreResult<()> {
        match write(&self.items).remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(format!("Book {id}"))),
        }
    }
}
