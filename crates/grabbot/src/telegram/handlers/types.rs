//! Handler types and dependencies

use std::sync::Arc;

use grabcore::{Downloader, SessionStore, Settings};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub downloader: Downloader,
    pub sessions: SessionStore,
    pub settings: Arc<Settings>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(downloader: Downloader, sessions: SessionStore, settings: Arc<Settings>) -> Self {
        Self {
            downloader,
            sessions,
            settings,
        }
    }
}
