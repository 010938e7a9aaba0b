//! Server state management.

use std::sync::Arc;

use mentorship_core::config::ServiceConfig;
use mentorship_core::service::AssignmentService;
use mentorship_core::stores::MemoryStore;
use mentorship_core::traits::MentorshipStore;

/// Shared application state.
///
/// The store handle is created once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub service: AssignmentService,
}

impl AppState {
    /// Create state around an existing service.
    pub fn new(service: AssignmentService) -> Self {
        Self { service }
    }

    /// Create state over a store.
    pub fn with_store(store: Arc<dyn MentorshipStore>, config: ServiceConfig) -> Self {
        Self::new(AssignmentService::new(store, config))
    }

    /// Create state backed by a fresh in-memory store.
    pub fn in_memory(config: ServiceConfig) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), config)
    }

    /// Name of the active store backend.
    pub fn backend_name(&self) -> &'static str {
        self.service.store().backend_name()
    }
}
