// Application state module
// Holds the read-only configuration and the fragment handler built from it

use std::sync::Arc;
use thiserror::Error;

use super::types::Config;
use crate::handler::{HandlerOptions, Mount, SourceFragment};

/// Failures while turning configuration into application state
#[derive(Debug, Error)]
pub enum StateError {
    #[error("cannot determine base directory: {0}")]
    BaseDirectory(#[from] std::io::Error),

    #[error("invalid method in fragment.methods: {0}")]
    InvalidMethod(String),
}

/// Application state, shared read-only between connections
pub struct AppState {
    pub config: Config,
    pub fragment: Arc<SourceFragment>,
    pub mount: Mount,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, StateError> {
        let fragment = SourceFragment::new(HandlerOptions {
            cwd: config.fragment.cwd.clone(),
            context_lines: config.fragment.context_lines,
        })?;
        let mount = Mount::new(
            &config.fragment.mount_path,
            config.fragment.methods.as_deref(),
        )?;

        Ok(Self {
            config,
            fragment: Arc::new(fragment),
            mount,
        })
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
