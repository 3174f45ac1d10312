//! Feed module — status updates, comments, likes, and feed search.
//!
//! # Layers
//!
//! - **model** — stored documents (`User`, `Feed`, `FeedItem`) and the
//!   hydrated views the resolver produces
//! - **service** — the mutation engine, reference resolver, and search,
//!   over a [`ripple_store::DocStore`]
//! - **api** — thin axum glue: identity extraction, the validation gate,
//!   and one handler per endpoint
//!
//! # Usage
//!
//! ```ignore
//! use feed::{FeedModule, service::FeedService};
//!
//! let service = FeedService::new(kv)?;
//! let router = FeedModule::new(service).routes();
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use ripple_core::Module;

use service::FeedService;

/// Feed module implementing the Module trait.
pub struct FeedModule {
    service: Arc<FeedService>,
}

impl FeedModule {
    pub fn new(service: Arc<FeedService>) -> Self {
        Self { service }
    }
}

impl Module for FeedModule {
    fn name(&self) -> &str {
        "feed"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
