//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{PlannerError, Result},
};

const XDG_PREFIX: &str = "tasked";
const DATABASE_FILE: &str = "tasks.db";

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/tasked/tasks.db` or `~/.local/share/tasked/tasks.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured planner instance.
    ///
    /// Creates missing parent directories and applies the schema once, so a
    /// broken store is reported here rather than on first use.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::XdgDirectory` if no default path can be derived,
    /// `PlannerError::FileSystem` if the parent directory cannot be created
    /// and `PlannerError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), PlannerError>(())
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        debug!("using database at {}", db_path.display());
        Ok(Planner::new(db_path))
    }

    /// Returns the default database path following the XDG Base Directory
    /// specification, creating its directory if needed.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(XDG_PREFIX)
            .place_data_file(DATABASE_FILE)
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}
