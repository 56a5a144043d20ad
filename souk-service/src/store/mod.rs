//! Document persistence abstraction
//!
//! This module defines the capability the rest of the core expects from a
//! document database — [`DocumentStore`] — together with the [`Document`]
//! type, the structured [`StoreError`], eager-load [`Populate`] directives,
//! and the bundled [`MemoryStore`] backend.
//!
//! The store is the system of record; everything else in the core is
//! reconstructed per request from the inbound parameters and this layer.

mod error;
mod memory;
mod traits;

pub use error::{StoreError, StoreErrorKind, StoreOperation, StoreResult};
pub use memory::MemoryStore;
pub use traits::{
    document_id, Document, DocumentStore, Populate, CREATED_AT_FIELD, ID_FIELD, REVISION_FIELD,
    UPDATED_AT_FIELD,
};
