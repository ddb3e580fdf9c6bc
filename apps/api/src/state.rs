//! Shared application state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use storefront_db::Database;

use crate::config::ServerConfig;

/// State handed to every route handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }

    /// Where uploaded images are stored.
    pub fn uploads_dir(&self) -> &Path {
        &self.config.uploads_dir
    }

    /// Path an uploaded file named `file_name` is written to.
    pub fn upload_path(&self, file_name: &str) -> PathBuf {
        self.config.uploads_dir.join(file_name)
    }
}
