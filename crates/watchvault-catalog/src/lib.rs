pub mod error;
pub mod tmdb;
pub mod traits;

pub use error::CatalogError;
pub use tmdb::TmdbClient;
pub use traits::CatalogGateway;
