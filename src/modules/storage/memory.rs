//! In-memory storage doubles with switchable failures

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::modules::storage::{ObjectStore, OrphanLedger, OrphanedObject};

#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    fail_put: AtomicBool,
    fail_copy: AtomicBool,
    fail_delete: AtomicBool,
    undeletable: Mutex<BTreeSet<String>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn fail_copies(&self, fail: bool) {
        self.fail_copy.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Make deletes of one key fail until cleared
    pub fn fail_deletes_of(&self, key: &str, fail: bool) {
        let mut undeletable = self.undeletable.lock().unwrap();
        if fail {
            undeletable.insert(key.to_string());
        } else {
            undeletable.remove(key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    /// Stored keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, data: Vec<u8>, _content_type: &str) -> Result<()> {
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!("put '{}' failed", key)));
        }
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }

    async fn copy(&self, from_key: &str, to_key: &str) -> Result<()> {
        if self.fail_copy.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!("copy '{}' failed", from_key)));
        }
        let mut objects = self.objects.lock().unwrap();
        let data = objects
            .get(from_key)
            .cloned()
            .ok_or_else(|| AppError::Storage(format!("'{}' does not exist", from_key)))?;
        objects.insert(to_key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.fail_delete.load(Ordering::SeqCst)
            || self.undeletable.lock().unwrap().contains(key)
        {
            return Err(AppError::Storage(format!("delete '{}' failed", key)));
        }
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.contains(key))
    }
}

#[derive(Default)]
pub struct InMemoryOrphanLedger {
    entries: Mutex<Vec<OrphanedObject>>,
}

impl InMemoryOrphanLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.object_key.clone())
            .collect()
    }
}

#[async_trait]
impl OrphanLedger for InMemoryOrphanLedger {
    async fn record(&self, object_key: &str, reason: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.iter().all(|e| e.object_key != object_key) {
            entries.push(OrphanedObject {
                id: Uuid::new_v4(),
                object_key: object_key.to_string(),
                reason: reason.to_string(),
                attempts: 0,
                last_attempt_at: None,
                created_at: Utc::now(),
            });
        }
        Ok(())
    }

    async fn pending(&self, limit: i64) -> Result<Vec<OrphanedObject>> {
        let mut entries = self.entries.lock().unwrap().clone();
        entries.sort_by_key(|e| (e.last_attempt_at.is_some(), e.last_attempt_at, e.created_at));
        entries.truncate(limit.max(0) as usize);
        Ok(entries)
    }

    async fn resolve(&self, id: Uuid) -> Result<()> {
        self.entries.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn mark_failed(&self, id: Uuid) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.iter_mut().find(|e| e.id == id) {
            entry.attempts += 1;
            entry.last_attempt_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn release(&self, object_key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| e.object_key != object_key);
        Ok(entries.len() < before)
    }
}
