pub mod entry;
pub mod normalize;
pub mod series;

pub use entry::{ChatWatchlist, Store, WatchlistEntry};
pub use normalize::{normalize_title, parse_season_tokens};
pub use series::{Network, NextEpisode, Season, SeriesMetadata, WatchProviders};
