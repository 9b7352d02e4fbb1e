//! Opening the catalog backend selected on the command line.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use filmorate_catalog::{ReferenceData, load_reference};
use filmorate_db::{MemoryStore, SqliteStore};
use filmorate_service::Services;

use crate::CliError;
use crate::settings;

/// An opened backend with services wired onto it.
pub(crate) struct Backend {
    pub(crate) services: Services,
    /// Present for the SQLite backend only.
    pub(crate) sqlite: Option<(Arc<SqliteStore>, PathBuf)>,
}

impl Backend {
    pub(crate) fn open(
        memory: bool,
        db: Option<PathBuf>,
        reference: Option<PathBuf>,
    ) -> Result<Self, CliError> {
        let reference = load_reference_data(settings::resolve_reference_dir(reference).as_deref())?;

        if memory {
            log::debug!("Using in-memory backend");
            let store = Arc::new(MemoryStore::with_reference(&reference));
            return Ok(Self {
                services: Services::new(store),
                sqlite: None,
            });
        }

        let path = settings::resolve_db_path(db);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let store = SqliteStore::open(&path, &reference).map_err(|e| {
            CliError::database(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let store = Arc::new(store);
        Ok(Self {
            services: Services::new(store.clone()),
            sqlite: Some((store, path)),
        })
    }
}

fn load_reference_data(dir: Option<&Path>) -> Result<ReferenceData, CliError> {
    match dir {
        Some(dir) => {
            let data = load_reference(dir)?;
            log::debug!(
                "Loaded {} genres and {} ratings from {}",
                data.genres.len(),
                data.ratings.len(),
                dir.display()
            );
            Ok(data)
        }
        None => Ok(ReferenceData::standard()),
    }
}
