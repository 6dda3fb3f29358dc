use std::sync::{Arc, Mutex};

use narcotk_common::config::Config;
use narcotk_core::{InventoryRepository, InventoryResult, SqliteStorage};

use crate::error::ApiError;

type Repository = InventoryRepository<SqliteStorage>;

/// Shared by every handler. The repository sits behind a mutex because the
/// SQLite connection serves one statement at a time.
#[derive(Clone)]
pub struct AppState {
    repo: Arc<Mutex<Repository>>,
    config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Repository, config: Config) -> Self {
        Self {
            repo: Arc::new(Mutex::new(repo)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs `op` against the repository on the blocking pool.
    pub(crate) async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Repository) -> InventoryResult<T> + Send + 'static,
    {
        let repo = Arc::clone(&self.repo);

        tokio::task::spawn_blocking(move || {
            let mut repo = repo
                .lock()
                .map_err(|_| ApiError::Internal(String::from("repository lock poisoned")))?;
            op(&mut repo).map_err(ApiError::from)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
    }
}
