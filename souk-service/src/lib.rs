//! # souk-service
//!
//! The reusable core of the souk commerce backend: a generic query-building
//! layer and a generic CRUD handler factory over a document store, plus the
//! service plumbing (config, tracing, HTTP server) the backend runs on.
//!
//! ## Features
//!
//! - **Query building**: reserved-key parameter vocabulary, bracket-operator
//!   filters, keyword search, multi-key sort, field selection, pagination
//! - **Handler factory**: one implementation of create / fetch-one /
//!   fetch-many / update-one / delete-one serving every entity type
//! - **Document store seam**: an async capability trait with a bundled
//!   in-memory backend
//! - **Uniform envelopes**: `{data}`, `{data, resultsCount, pagination}`,
//!   structured error bodies with HTTP status mapping
//! - **Graceful shutdown**: proper signal handling (SIGTERM, SIGINT)
//!
//! ## Example
//!
//! ```rust,no_run
//! use axum::Router;
//! use souk_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> souk_service::error::Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config);
//!
//!     let store = MemoryStore::new();
//!     let brands = Resource::new(store, "brands", "Brand");
//!
//!     let app = Router::new().merge(health_router());
//!     // ... mount resource routes, then:
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod query;
pub mod server;
pub mod store;

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{
        ApiError, ApiErrorKind, ApiOperation, CreatedResponse, ItemResponse, ListResponse,
        NoContent, Resource,
    };
    pub use crate::observability::init_tracing;
    pub use crate::query::{
        CompareOp, Filter, ListPlan, PaginationSummary, QueryBuilder, QueryParams, SearchStrategy,
    };
    pub use crate::server::{health_router, Server};
    pub use crate::store::{Document, DocumentStore, MemoryStore, Populate, StoreError};
}
