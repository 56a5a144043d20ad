//! In-memory document store
//!
//! The bundled [`DocumentStore`] backend: concurrent in-process collections
//! that evaluate filters, sort keys, projections, and skip/limit directly
//! against JSON documents. Serves tests and single-node deployments; real
//! document databases plug in behind the same trait.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use crate::query::{compare_values, Filter, ListPlan, SortDirection};

use super::error::StoreResult;
use super::traits::{
    document_id, Document, DocumentStore, CREATED_AT_FIELD, ID_FIELD, REVISION_FIELD,
    UPDATED_AT_FIELD,
};

/// A shared, clonable in-memory document store.
///
/// Cloning is cheap; clones share the same collections. Per-document
/// operations are atomic (each collection mutates under its own shard
/// lock); nothing spanning documents is.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map(|docs| docs.len())
            .unwrap_or(0)
    }

    /// Whether `collection` holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Stamp a new document with id, timestamps, and revision.
fn stamp_new(doc: &mut Document) {
    let timestamp = now();
    if document_id(doc).is_none() {
        doc.insert(ID_FIELD.to_string(), Value::String(Uuid::new_v4().to_string()));
    }
    doc.insert(CREATED_AT_FIELD.to_string(), Value::String(timestamp.clone()));
    doc.insert(UPDATED_AT_FIELD.to_string(), Value::String(timestamp));
    doc.insert(REVISION_FIELD.to_string(), Value::from(1));
}

fn revision_of(doc: &Document) -> u64 {
    doc.get(REVISION_FIELD).and_then(Value::as_u64).unwrap_or(0)
}

fn is_meta_field(key: &str) -> bool {
    matches!(key, ID_FIELD | CREATED_AT_FIELD | UPDATED_AT_FIELD | REVISION_FIELD)
}

fn sort_documents(docs: &mut [Document], plan: &ListPlan) {
    docs.sort_by(|a, b| {
        for key in &plan.sort {
            let left = a.get(&key.field).unwrap_or(&Value::Null);
            let right = b.get(&key.field).unwrap_or(&Value::Null);
            let ordering = compare_values(left, right).unwrap_or(std::cmp::Ordering::Equal);
            let ordering = match key.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if !ordering.is_eq() {
                return ordering;
            }
        }
        std::cmp::Ordering::Equal
    });
}

impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, mut doc: Document) -> StoreResult<Document> {
        stamp_new(&mut doc);
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self.collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|doc| document_id(doc) == Some(id))
                .cloned()
        }))
    }

    async fn find(&self, collection: &str, plan: &ListPlan) -> StoreResult<Vec<Document>> {
        let mut matching: Vec<Document> = self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| plan.filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        sort_documents(&mut matching, plan);

        let skip = usize::try_from(plan.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(plan.limit).unwrap_or(usize::MAX);
        let mut page: Vec<Document> = matching.into_iter().skip(skip).take(limit).collect();
        for doc in &mut page {
            plan.projection.apply(doc);
        }
        Ok(page)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> StoreResult<u64> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| filter.matches(doc)).count() as u64)
            .unwrap_or(0))
    }

    async fn find_by_id_and_update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> StoreResult<Option<Document>> {
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        let Some(existing) = docs.iter_mut().find(|doc| document_id(doc) == Some(id)) else {
            return Ok(None);
        };
        for (key, value) in patch {
            if !is_meta_field(&key) {
                existing.insert(key, value);
            }
        }
        let revision = revision_of(existing);
        existing.insert(REVISION_FIELD.to_string(), Value::from(revision + 1));
        existing.insert(UPDATED_AT_FIELD.to_string(), Value::String(now()));
        Ok(Some(existing.clone()))
    }

    async fn save(&self, collection: &str, mut doc: Document) -> StoreResult<Document> {
        let mut docs = self.collections.entry(collection.to_string()).or_default();
        let position = document_id(&doc)
            .map(str::to_string)
            .and_then(|id| docs.iter().position(|d| document_id(d) == Some(id.as_str())));

        match position {
            Some(index) => {
                let existing = &mut docs[index];
                doc.insert(
                    REVISION_FIELD.to_string(),
                    Value::from(revision_of(existing) + 1),
                );
                doc.insert(UPDATED_AT_FIELD.to_string(), Value::String(now()));
                if !doc.contains_key(CREATED_AT_FIELD) {
                    if let Some(created) = existing.get(CREATED_AT_FIELD) {
                        doc.insert(CREATED_AT_FIELD.to_string(), created.clone());
                    }
                }
                *existing = doc.clone();
                Ok(doc)
            }
            None => {
                stamp_new(&mut doc);
                docs.push(doc.clone());
                Ok(doc)
            }
        }
    }

    async fn delete_by_id(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let Some(mut docs) = self.collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|doc| document_id(doc) != Some(id));
        Ok(docs.len() < before)
    }
}
