use std::sync::Arc;

use course_core::Catalog;
use storage::{StateStore, Storage};

use crate::controller::CourseController;
use crate::error::AppServicesError;
use crate::prompt::GradePrompt;

/// Assembles the catalog and state store the front ends share.
#[derive(Clone)]
pub struct AppServices {
    catalog: Catalog,
    store: Arc<dyn StateStore>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, catalog: Catalog) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(&storage, catalog))
    }

    #[must_use]
    pub fn in_memory(catalog: Catalog) -> Self {
        Self::with_storage(&Storage::in_memory(), catalog)
    }

    #[must_use]
    pub fn with_storage(storage: &Storage, catalog: Catalog) -> Self {
        Self {
            catalog,
            store: Arc::new(storage.state_store()),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn state_store(&self) -> Arc<dyn StateStore> {
        Arc::clone(&self.store)
    }

    /// Build a controller for `prompt` with stored state already applied.
    pub async fn controller(&self, prompt: Arc<dyn GradePrompt>) -> CourseController {
        let mut controller = CourseController::new(&self.catalog, self.state_store(), prompt);
        controller.initialize().await;
        controller
    }
}
