use crate::config::AppConfig;
use crate::employees::repo::EmployeeRepo;
use crate::storage::{JsonFileStore, RecordStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let file_store = JsonFileStore::new(config.employees_file.clone());
        tracing::debug!(path = %file_store.path().display(), "using backing file");
        let store = Arc::new(file_store) as Arc<dyn RecordStore>;
        Ok(Self::from_parts(config, store))
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn RecordStore>) -> Self {
        Self { config, store }
    }

    pub fn repo(&self) -> EmployeeRepo {
        EmployeeRepo::new(self.store.clone())
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::storage::MemoryStore;

        let config = Arc::new(AppConfig {
            employees_file: "unused.json".into(),
            currency_symbol: "₹".into(),
        });
        let store = Arc::new(MemoryStore::default()) as Arc<dyn RecordStore>;
        Self::from_parts(config, store)
    }
}
