pub mod traits;
pub mod error;
pub mod factory;
pub mod geo;
pub mod omdb;

pub use traits::MovieCatalog;
pub use error::SourceError;
pub use factory::{build_catalog, build_locator};
pub use geo::{GeoError, IpApiLocator, PositionProvider};
pub use omdb::OmdbClient;
