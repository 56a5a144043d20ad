//! The document store capability
//!
//! [`DocumentStore`] is the persistence seam of the core: everything a model
//! descriptor needs from its backing store, expressed with RPITIT
//! (Return Position Impl Trait In Traits) async methods so implementations
//! need no `async_trait` boxing.
//!
//! Documents are plain JSON objects. The store owns four metadata fields:
//! [`ID_FIELD`], [`CREATED_AT_FIELD`], [`UPDATED_AT_FIELD`], and
//! [`REVISION_FIELD`]; callers never set these themselves.

use std::future::Future;

use serde_json::Value;

use crate::query::{Filter, ListPlan};

use super::error::StoreResult;

/// A stored entity: a JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Primary key field, assigned by the store on create.
pub const ID_FIELD: &str = "id";

/// Creation timestamp field (RFC 3339), assigned on create.
pub const CREATED_AT_FIELD: &str = "created_at";

/// Last-write timestamp field (RFC 3339), bumped on every write.
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Internal write counter, bumped on every write and excluded from
/// responses by default.
pub const REVISION_FIELD: &str = "revision";

/// Read a document's id.
#[must_use]
pub fn document_id(doc: &Document) -> Option<&str> {
    doc.get(ID_FIELD).and_then(Value::as_str)
}

/// Eager-load directive for single-entity fetches.
///
/// Spelled out by the caller instead of hiding behind ORM middleware: either
/// inline the document a reference field points at, or attach the documents
/// of another collection that point back here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Populate {
    /// Replace the id in `field` with the referenced document from
    /// `collection`.
    Ref {
        /// Field on the loaded document holding the reference id
        field: String,
        /// Collection the reference points into
        collection: String,
    },
    /// Attach every document of `collection` whose `foreign_field` holds the
    /// loaded document's id, as an array under `as_field`.
    Children {
        /// Collection holding the referencing documents
        collection: String,
        /// Field on those documents referencing the loaded one
        foreign_field: String,
        /// Field name the array is attached under
        as_field: String,
    },
}

impl Populate {
    /// Inline the document referenced by `field` from `collection`.
    #[must_use]
    pub fn reference(field: impl Into<String>, collection: impl Into<String>) -> Self {
        Self::Ref {
            field: field.into(),
            collection: collection.into(),
        }
    }

    /// Attach referencing documents from `collection` under `as_field`.
    #[must_use]
    pub fn children(
        collection: impl Into<String>,
        foreign_field: impl Into<String>,
        as_field: impl Into<String>,
    ) -> Self {
        Self::Children {
            collection: collection.into(),
            foreign_field: foreign_field.into(),
            as_field: as_field.into(),
        }
    }
}

/// Capability trait for a document database.
///
/// One store serves many collections; every method is addressed by
/// collection name. Implementations must provide per-document atomicity for
/// the single-document operations; nothing here spans documents or
/// collections atomically.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use souk_service::store::{DocumentStore, MemoryStore};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// let doc = json!({"name": "Acme"}).as_object().unwrap().clone();
/// let created = store.create("brands", doc).await?;
/// assert!(created.contains_key("id"));
/// # Ok(())
/// # }
/// ```
pub trait DocumentStore: Send + Sync {
    /// Persist a new document, assigning id, timestamps, and revision.
    /// Returns the stored document.
    fn create(
        &self,
        collection: &str,
        doc: Document,
    ) -> impl Future<Output = StoreResult<Document>> + Send;

    /// Load a single document by id. `Ok(None)` when absent.
    fn find_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = StoreResult<Option<Document>>> + Send;

    /// Execute a list plan: filter, sort, project, skip, limit.
    fn find(
        &self,
        collection: &str,
        plan: &ListPlan,
    ) -> impl Future<Output = StoreResult<Vec<Document>>> + Send;

    /// Count the documents matching `filter`, ignoring pagination.
    fn count(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> impl Future<Output = StoreResult<u64>> + Send;

    /// Merge `patch` into the document with `id` and return the updated
    /// document; `Ok(None)` when absent. Store metadata fields in the patch
    /// are ignored.
    fn find_by_id_and_update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> impl Future<Output = StoreResult<Option<Document>>> + Send;

    /// Write a full document back by its id, bumping revision and
    /// `updated_at`. A document without a known id is inserted.
    fn save(
        &self,
        collection: &str,
        doc: Document,
    ) -> impl Future<Output = StoreResult<Document>> + Send;

    /// Remove the document with `id`. Returns whether anything was removed.
    fn delete_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> impl Future<Output = StoreResult<bool>> + Send;
}
