//! Aired-season inference over catalog metadata.
//!
//! Pure functions; "today" is always passed in so callers and tests pin the
//! reference date. The deployment clock is UTC (`today_utc`).

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use watchvault_models::SeriesMetadata;

/// The engine's reference "today". UTC by decision; a series can flip
/// between "just aired" and "not yet" around midnight depending on zone,
/// so every comparison uses this one clock.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// True iff the catalog reports a next episode with an air date strictly
/// later than today. A next episode dated today or earlier means the
/// catalog record is stale, not that the series is airing.
pub fn is_currently_airing(meta: &SeriesMetadata, today: NaiveDate) -> bool {
    meta.next_episode_to_air
        .as_ref()
        .and_then(|ne| ne.air_date_parsed())
        .map(|d| d > today)
        .unwrap_or(false)
}

/// Season number of the episode currently being broadcast, if any.
pub fn current_season(meta: &SeriesMetadata, today: NaiveDate) -> Option<u32> {
    if !is_currently_airing(meta, today) {
        return None;
    }
    meta.next_episode_to_air.as_ref()?.season_number
}

/// Seasons considered to have begun airing as of `today`.
///
/// A season counts when its air date is on or before today. Season 0
/// (specials) never counts. A season mid-broadcast is included via the
/// next-episode record; the engine deliberately does not distinguish
/// fully-aired from partially-aired seasons.
pub fn emitted_seasons(meta: &SeriesMetadata, today: NaiveDate) -> BTreeSet<u32> {
    let mut emitted: BTreeSet<u32> = meta
        .seasons
        .iter()
        .filter(|s| s.season_number != 0)
        .filter(|s| s.air_date_parsed().map(|d| d <= today).unwrap_or(false))
        .map(|s| s.season_number)
        .collect();

    if let Some(current) = current_season(meta, today) {
        if current != 0 {
            emitted.insert(current);
        }
    }

    emitted
}

/// True iff every emitted season is covered by the completed set. An empty
/// emitted set is never complete (nothing aired is not "all collected").
pub fn completion_status(emitted: &BTreeSet<u32>, completed: &BTreeSet<u32>) -> bool {
    !emitted.is_empty() && emitted.is_subset(completed)
}

/// One display mark per emitted season, ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonMark {
    pub season: u32,
    pub covered: bool,
    pub current: bool,
}

pub fn progress_marks(
    emitted: &BTreeSet<u32>,
    completed: &BTreeSet<u32>,
    current: Option<u32>,
) -> Vec<SeasonMark> {
    emitted
        .iter()
        .map(|&season| SeasonMark {
            season,
            covered: completed.contains(&season),
            current: current == Some(season),
        })
        .collect()
}

/// Render-ready progress for one tracked series: everything the shell needs
/// to format a list line or a detail card, nothing it has to compute.
#[derive(Debug, Clone)]
pub struct SeriesProgress {
    pub airing: bool,
    pub current_season: Option<u32>,
    pub emitted: BTreeSet<u32>,
    pub complete: bool,
    pub marks: Vec<SeasonMark>,
    /// Air date of the next episode, when airing.
    pub next_air_date: Option<String>,
    /// First broadcasting network, when the catalog reports one.
    pub network: Option<String>,
    pub ended: bool,
}

impl SeriesProgress {
    pub fn compute(meta: &SeriesMetadata, completed: &BTreeSet<u32>, today: NaiveDate) -> Self {
        let airing = is_currently_airing(meta, today);
        let current = current_season(meta, today);
        let emitted = emitted_seasons(meta, today);
        let complete = completion_status(&emitted, completed);
        let marks = progress_marks(&emitted, completed, current);

        let next_air_date = if airing {
            meta.next_episode_to_air
                .as_ref()
                .and_then(|ne| ne.air_date.clone())
        } else {
            None
        };

        Self {
            airing,
            current_season: current,
            emitted,
            complete,
            marks,
            next_air_date,
            network: meta.networks.first().map(|n| n.name.clone()),
            ended: meta
                .status
                .as_deref()
                .map(|s| s.eq_ignore_ascii_case("ended"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchvault_models::{Network, NextEpisode, Season};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(seasons: &[(u32, Option<&str>)], next: Option<(Option<u32>, &str)>) -> SeriesMetadata {
        SeriesMetadata {
            id: 1,
            seasons: seasons
                .iter()
                .map(|(n, ad)| Season {
                    season_number: *n,
                    air_date: ad.map(String::from),
                })
                .collect(),
            next_episode_to_air: next.map(|(sn, ad)| NextEpisode {
                season_number: sn,
                air_date: Some(ad.to_string()),
            }),
            ..Default::default()
        }
    }

    fn set(nums: &[u32]) -> BTreeSet<u32> {
        nums.iter().copied().collect()
    }

    #[test]
    fn test_airing_requires_future_air_date() {
        let today = day(2024, 6, 1);
        let airing = series(&[], Some((Some(2), "2024-06-08")));
        assert!(is_currently_airing(&airing, today));

        let stale = series(&[], Some((Some(2), "2024-06-01")));
        assert!(!is_currently_airing(&stale, today));

        let none = series(&[], None);
        assert!(!is_currently_airing(&none, today));
    }

    #[test]
    fn test_emitted_excludes_season_zero() {
        let today = day(2024, 6, 1);
        let meta = series(
            &[(0, Some("2010-01-01")), (1, Some("2011-04-17")), (2, Some("2012-04-01"))],
            None,
        );
        assert_eq!(emitted_seasons(&meta, today), set(&[1, 2]));
    }

    #[test]
    fn test_emitted_skips_future_and_unparseable_dates() {
        let today = day(2024, 6, 1);
        let meta = series(
            &[(1, Some("2020-01-01")), (2, Some("2025-01-01")), (3, Some("garbage")), (4, None)],
            None,
        );
        assert_eq!(emitted_seasons(&meta, today), set(&[1]));
    }

    #[test]
    fn test_airing_season_counts_as_emitted() {
        // Season 3 has no aired entry yet but the next episode belongs to it.
        let today = day(2024, 6, 1);
        let meta = series(
            &[(1, Some("2020-01-01")), (2, Some("2022-01-01"))],
            Some((Some(3), "2024-06-08")),
        );
        assert_eq!(emitted_seasons(&meta, today), set(&[1, 2, 3]));
        assert_eq!(current_season(&meta, today), Some(3));
    }

    #[test]
    fn test_completion_status() {
        assert!(!completion_status(&set(&[]), &set(&[1, 2, 3])));
        assert!(completion_status(&set(&[1, 2, 3]), &set(&[1, 2, 3])));
        assert!(!completion_status(&set(&[1, 2, 3]), &set(&[1, 2])));
        // Extra completed seasons do not hurt.
        assert!(completion_status(&set(&[1]), &set(&[1, 2])));
    }

    #[test]
    fn test_progress_marks_order_and_flags() {
        let marks = progress_marks(&set(&[1, 2, 3]), &set(&[1, 2]), Some(3));
        assert_eq!(
            marks,
            vec![
                SeasonMark { season: 1, covered: true, current: false },
                SeasonMark { season: 2, covered: true, current: false },
                SeasonMark { season: 3, covered: false, current: true },
            ]
        );
    }

    #[test]
    fn test_compute_bundles_render_fields() {
        let today = day(2024, 6, 1);
        let mut meta = series(
            &[(1, Some("2022-08-21")), (2, Some("2024-05-01"))],
            Some((Some(2), "2024-06-08")),
        );
        meta.networks = vec![Network { name: "HBO".into() }];
        meta.status = Some("Returning Series".into());

        let progress = SeriesProgress::compute(&meta, &set(&[1]), today);
        assert!(progress.airing);
        assert!(!progress.complete);
        assert_eq!(progress.current_season, Some(2));
        assert_eq!(progress.next_air_date.as_deref(), Some("2024-06-08"));
        assert_eq!(progress.network.as_deref(), Some("HBO"));
        assert!(!progress.ended);
    }

    #[test]
    fn test_ended_flag() {
        let today = day(2024, 6, 1);
        let mut meta = series(&[(1, Some("2011-04-17"))], None);
        meta.status = Some("Ended".into());
        let progress = SeriesProgress::compute(&meta, &set(&[1]), today);
        assert!(progress.ended);
        assert!(progress.complete);
        assert_eq!(progress.next_air_date, None);
    }
}
