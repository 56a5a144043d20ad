//! Application state
//!
//! One store handle plus a typed accessor per resource. Each accessor
//! returns the model descriptor the generic handlers operate on, carrying
//! that resource's search strategy, eager-load directive, and pre-save
//! hook.

use souk_service::handlers::Resource;
use souk_service::query::SearchStrategy;
use souk_service::store::{MemoryStore, Populate};

use crate::models::{
    brand, cart, category, coupon, order, product, review, slug_from, subcategory, user,
};

/// Shared application state; cheap to clone.
#[derive(Clone, Default)]
pub struct AppState {
    store: MemoryStore,
}

impl AppState {
    /// Create state over a fresh store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying document store.
    #[must_use]
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Brand collection descriptor.
    #[must_use]
    pub fn brands(&self) -> Resource<MemoryStore> {
        Resource::new(self.store.clone(), brand::COLLECTION, brand::KIND)
            .with_pre_save(slug_from("name"))
    }

    /// Category collection descriptor.
    #[must_use]
    pub fn categories(&self) -> Resource<MemoryStore> {
        Resource::new(self.store.clone(), category::COLLECTION, category::KIND)
            .with_pre_save(slug_from("name"))
    }

    /// Subcategory collection descriptor.
    #[must_use]
    pub fn subcategories(&self) -> Resource<MemoryStore> {
        Resource::new(
            self.store.clone(),
            subcategory::COLLECTION,
            subcategory::KIND,
        )
        .with_pre_save(slug_from("name"))
    }

    /// Product collection descriptor: title/description keyword search,
    /// reviews eager-loaded on fetch-one.
    #[must_use]
    pub fn products(&self) -> Resource<MemoryStore> {
        Resource::new(self.store.clone(), product::COLLECTION, product::KIND)
            .with_search(SearchStrategy::TitleAndDescription)
            .with_populate(Populate::children(review::COLLECTION, "product", "reviews"))
            .with_pre_save(slug_from("title"))
    }

    /// Review collection descriptor: reviewer eager-loaded on fetch-one.
    #[must_use]
    pub fn reviews(&self) -> Resource<MemoryStore> {
        Resource::new(self.store.clone(), review::COLLECTION, review::KIND)
            .with_populate(Populate::reference("user", user::COLLECTION))
    }

    /// Coupon collection descriptor.
    #[must_use]
    pub fn coupons(&self) -> Resource<MemoryStore> {
        Resource::new(self.store.clone(), coupon::COLLECTION, coupon::KIND)
    }

    /// User profile collection descriptor.
    #[must_use]
    pub fn users(&self) -> Resource<MemoryStore> {
        Resource::new(self.store.clone(), user::COLLECTION, user::KIND)
            .with_pre_save(slug_from("name"))
    }

    /// Cart collection descriptor.
    #[must_use]
    pub fn carts(&self) -> Resource<MemoryStore> {
        Resource::new(self.store.clone(), cart::COLLECTION, cart::KIND)
    }

    /// Order collection descriptor.
    #[must_use]
    pub fn orders(&self) -> Resource<MemoryStore> {
        Resource::new(self.store.clone(), order::COLLECTION, order::KIND)
    }
}
