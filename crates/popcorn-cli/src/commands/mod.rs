pub mod config;
pub mod interactive;
pub mod locate;
pub mod prompts;
pub mod rate;
pub mod search;
pub mod show;
pub mod ui;
pub mod views;
pub mod watched;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{Config, CredentialStore, PathManager};
use popcorn_core::{App, FileStorage, WatchedList};
use popcorn_sources::{build_catalog, MovieCatalog};
use std::sync::Arc;

/// Paths, configuration and credentials for one invocation.
pub struct Session {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

impl Session {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

        let mut credentials = CredentialStore::new(paths.credentials_file());
        credentials.load().map_err(|e| {
            eyre!("Failed to load credentials from {}: {}", paths.credentials_file().display(), e)
        })?;

        Ok(Self { paths, config, credentials })
    }

    pub fn catalog(&self) -> Result<Arc<dyn MovieCatalog>> {
        self.config
            .validate()
            .map_err(|e| eyre!("Invalid configuration: {}", e))?;
        let client = build_catalog(&self.config, &self.credentials).map_err(|e| eyre!("{}", e))?;
        Ok(Arc::new(client))
    }

    pub fn watched(&self) -> Result<WatchedList<FileStorage>> {
        let storage_file = self.paths.storage_file();
        let storage = FileStorage::open(&storage_file)
            .map_err(|e| eyre!("Failed to open storage at {}: {}", storage_file.display(), e))?;
        WatchedList::open(storage, &self.config.storage.watched_key)
            .map_err(|e| eyre!("Failed to load watched list: {}", e))
    }

    pub fn app(&self) -> Result<App<FileStorage>> {
        let catalog = self.catalog()?;
        let watched = self.watched()?;
        Ok(App::new(catalog, watched, self.config.search.min_query_length))
    }
}
