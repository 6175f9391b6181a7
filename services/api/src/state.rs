//! Shared Application State
//!
//! This module defines the `AppState` struct, which holds the dependencies
//! constructed once at startup and shared by every handler.

use crate::session::SessionStore;
use sozo_core::{catalog::LessonCatalog, generator::ResponseGenerator};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<LessonCatalog>,
    pub generator: Arc<dyn ResponseGenerator>,
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    pub fn new(catalog: LessonCatalog, generator: Arc<dyn ResponseGenerator>) -> Self {
        Self::with_sessions(catalog, generator, SessionStore::new())
    }

    pub fn with_sessions(
        catalog: LessonCatalog,
        generator: Arc<dyn ResponseGenerator>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            generator,
            sessions: Arc::new(sessions),
        }
    }
}
