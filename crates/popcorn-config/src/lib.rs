pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, GeolocationConfig, LoggingConfig, OmdbConfig, SearchConfig, StorageConfig};
pub use credentials::{CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, base_path_override};
