pub mod error;
pub mod migrate;
pub mod pagination;
pub mod progress;
pub mod repository;
pub mod service;
pub mod store;

pub use error::EngineError;
pub use pagination::{ItemRef, Paginator};
pub use progress::{SeasonMark, SeriesProgress};
pub use repository::StoreRepository;
pub use service::{EntryDetails, EntryView, PageView, WatchlistService};
pub use store::{AddOutcome, AddRequest};
