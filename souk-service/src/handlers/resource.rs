//! The generic resource handler factory
//!
//! [`Resource`] packages everything one REST collection needs — a store
//! handle, a collection name, an entity kind for error messages, a keyword
//! [`SearchStrategy`], an optional eager-load directive, and an optional
//! pre-save transformation — and exposes the five standard operations:
//! create, fetch-one, fetch-many, update-one, delete-one.
//!
//! One implementation serves every entity type; per-resource behavior is
//! data on the descriptor, not code. The only error kind originating here
//! is Not-Found; everything else passes through the boundary untouched.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use souk_service::handlers::Resource;
//! use souk_service::query::QueryParams;
//! use souk_service::store::MemoryStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let brands = Resource::new(MemoryStore::new(), "brands", "Brand");
//!
//! let payload = json!({"name": "Acme"}).as_object().unwrap().clone();
//! let created = brands.create(payload).await?;
//! let id = created.data["id"].as_str().unwrap();
//!
//! let fetched = brands.fetch_one(id).await?;
//! assert_eq!(fetched.data["name"], "Acme");
//!
//! let listed = brands.fetch_many(QueryParams::new(), None).await?;
//! assert_eq!(listed.results_count, 1);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::query::{Filter, ListPlan, QueryBuilder, QueryParams, SearchStrategy};
use crate::store::{document_id, Document, DocumentStore, Populate, StoreOperation};

use super::error::{ApiError, ApiOperation};
use super::response::{CreatedResponse, ItemResponse, ListResponse, NoContent};

/// A document transformation run immediately before every persist.
pub type SaveHook = Arc<dyn Fn(&mut Document) + Send + Sync>;

/// A model descriptor bound to a store: the input to the handler factory.
///
/// Cheap to clone; clones address the same collection on the same store.
#[derive(Clone)]
pub struct Resource<S> {
    store: S,
    collection: &'static str,
    kind: &'static str,
    search: SearchStrategy,
    populate: Option<Populate>,
    pre_save: Option<SaveHook>,
}

impl<S> std::fmt::Debug for Resource<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("collection", &self.collection)
            .field("kind", &self.kind)
            .field("search", &self.search)
            .field("populate", &self.populate)
            .finish_non_exhaustive()
    }
}

impl<S: DocumentStore> Resource<S> {
    /// Describe a collection on `store`. `kind` names the entity in error
    /// messages ("Brand", "Order"). Keyword search defaults to the
    /// name-field strategy.
    #[must_use]
    pub fn new(store: S, collection: &'static str, kind: &'static str) -> Self {
        Self {
            store,
            collection,
            kind,
            search: SearchStrategy::default(),
            populate: None,
            pre_save: None,
        }
    }

    /// Select which fields keyword search matches against.
    #[must_use]
    pub fn with_search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }

    /// Eager-load related documents on fetch-one.
    #[must_use]
    pub fn with_populate(mut self, populate: Populate) -> Self {
        self.populate = Some(populate);
        self
    }

    /// Install a transformation run on every persist (create and the
    /// re-save of update). Explicitly composed here rather than hidden in
    /// store middleware.
    #[must_use]
    pub fn with_pre_save<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut Document) + Send + Sync + 'static,
    {
        self.pre_save = Some(Arc::new(hook));
        self
    }

    /// The underlying store handle.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The collection this descriptor addresses.
    #[must_use]
    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// The entity kind used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Persist a validated payload as a new entity.
    pub async fn create(&self, mut payload: Document) -> Result<CreatedResponse<Document>, ApiError> {
        self.run_pre_save(&mut payload);
        let created = self.store.create(self.collection, payload).await?;
        Ok(CreatedResponse::new(created))
    }

    /// Load a single entity by id, eager-loading related documents when the
    /// descriptor says so. Not-Found when no entity has the id.
    pub async fn fetch_one(&self, id: &str) -> Result<ItemResponse<Document>, ApiError> {
        let mut doc = self
            .store
            .find_by_id(self.collection, id)
            .await?
            .ok_or_else(|| ApiError::not_found(self.kind, id))?;
        if let Some(populate) = self.populate.clone() {
            self.apply_populate(&mut doc, &populate).await?;
        }
        Ok(ItemResponse::new(doc))
    }

    /// Run the full list pipeline over the collection.
    ///
    /// `base_filter` is the externally pre-computed scope used by nested
    /// routes (reviews of one product, orders of one user). The total count
    /// is taken over the filtered, un-paginated set before the pagination
    /// stage, so the summary is correct for any requested page.
    pub async fn fetch_many(
        &self,
        params: QueryParams,
        base_filter: Option<Filter>,
    ) -> Result<ListResponse<Document>, ApiError> {
        let builder = QueryBuilder::new(params)
            .with_base_filter(base_filter.unwrap_or_default())
            .filter()
            .search(self.search)
            .sort()
            .select_fields();

        let total = self
            .store
            .count(self.collection, builder.current_filter())
            .await?;
        let (plan, pagination) = builder.paginate(total);
        let docs = self.store.find(self.collection, &plan).await?;
        Ok(ListResponse::new(docs, pagination))
    }

    /// Merge a patch into the entity with `id`, then re-save the merged
    /// document so pre-save transformations run against it. Not-Found when
    /// absent.
    ///
    /// The conditional update and the re-save are two store calls; a
    /// concurrent writer can land between them.
    pub async fn update_one(
        &self,
        id: &str,
        patch: Document,
    ) -> Result<ItemResponse<Document>, ApiError> {
        let mut merged = self
            .store
            .find_by_id_and_update(self.collection, id, patch)
            .await?
            .ok_or_else(|| {
                ApiError::not_found(self.kind, id).with_operation(ApiOperation::Update)
            })?;
        self.run_pre_save(&mut merged);
        let saved = self
            .store
            .save(self.collection, merged)
            .await
            .map_err(|err| err.with_operation(StoreOperation::Save))?;
        Ok(ItemResponse::new(saved))
    }

    /// Remove the entity with `id`. Not-Found when absent; empty no-content
    /// response otherwise.
    pub async fn delete_one(&self, id: &str) -> Result<NoContent, ApiError> {
        self.store
            .find_by_id(self.collection, id)
            .await?
            .ok_or_else(|| {
                ApiError::not_found(self.kind, id).with_operation(ApiOperation::Delete)
            })?;
        self.store.delete_by_id(self.collection, id).await?;
        Ok(NoContent)
    }

    fn run_pre_save(&self, doc: &mut Document) {
        if let Some(hook) = &self.pre_save {
            hook(doc);
        }
    }

    async fn apply_populate(
        &self,
        doc: &mut Document,
        populate: &Populate,
    ) -> Result<(), ApiError> {
        match populate {
            Populate::Ref { field, collection } => {
                let reference = doc.get(field).and_then(Value::as_str).map(str::to_string);
                if let Some(ref_id) = reference {
                    if let Some(related) = self.store.find_by_id(collection, &ref_id).await? {
                        doc.insert(field.clone(), Value::Object(related));
                    }
                }
            }
            Populate::Children {
                collection,
                foreign_field,
                as_field,
            } => {
                let Some(id) = document_id(doc).map(str::to_string) else {
                    return Ok(());
                };
                let plan =
                    ListPlan::unpaginated(Filter::eq(foreign_field.clone(), Value::String(id)));
                let children = self.store.find(collection, &plan).await?;
                doc.insert(
                    as_field.clone(),
                    Value::Array(children.into_iter().map(Value::Object).collect()),
                );
            }
        }
        Ok(())
    }
}
