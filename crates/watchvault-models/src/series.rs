use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Series metadata as the catalog reports it. Read-only; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeriesMetadata {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    pub next_episode_to_air: Option<NextEpisode>,
    #[serde(default)]
    pub networks: Vec<Network>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub season_number: u32,
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextEpisode {
    pub season_number: Option<u32>,
    pub air_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
}

/// Region-keyed streaming availability, pass-through from the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: HashMap<String, serde_json::Value>,
}

impl SeriesMetadata {
    /// Display title, falling back to the original-language name and finally
    /// a placeholder carrying the catalog id.
    pub fn display_title(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.original_name.clone())
            .unwrap_or_else(|| format!("TMDB {}", self.id))
    }

    /// First-air year ("2022") extracted from the date string prefix.
    pub fn first_air_year(&self) -> Option<String> {
        let date = self.first_air_date.as_deref()?;
        let year = date.split('-').next()?;
        if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
            Some(year.to_string())
        } else {
            None
        }
    }
}

impl Season {
    pub fn air_date_parsed(&self) -> Option<NaiveDate> {
        parse_catalog_date(self.air_date.as_deref()?)
    }
}

impl NextEpisode {
    pub fn air_date_parsed(&self) -> Option<NaiveDate> {
        parse_catalog_date(self.air_date.as_deref()?)
    }
}

/// Catalog dates come as "YYYY-MM-DD". Anything else is treated as absent.
pub fn parse_catalog_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_fallbacks() {
        let mut meta = SeriesMetadata {
            id: 42,
            ..Default::default()
        };
        assert_eq!(meta.display_title(), "TMDB 42");

        meta.original_name = Some("Original".into());
        assert_eq!(meta.display_title(), "Original");

        meta.name = Some("Localized".into());
        assert_eq!(meta.display_title(), "Localized");
    }

    #[test]
    fn test_first_air_year() {
        let meta = SeriesMetadata {
            first_air_date: Some("2022-08-21".into()),
            ..Default::default()
        };
        assert_eq!(meta.first_air_year().as_deref(), Some("2022"));

        let empty = SeriesMetadata {
            first_air_date: Some("".into()),
            ..Default::default()
        };
        assert_eq!(empty.first_air_year(), None);
    }

    #[test]
    fn test_parse_catalog_date() {
        assert_eq!(
            parse_catalog_date("2023-01-15"),
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
        assert_eq!(parse_catalog_date("not-a-date"), None);
    }

    #[test]
    fn test_deserializes_catalog_shape() {
        let json = r#"{
            "id": 94997,
            "name": "House of the Dragon",
            "first_air_date": "2022-08-21",
            "overview": "The Targaryen dynasty.",
            "poster_path": "/z2yahl2uefxDCl0nogcRBstwruJ.jpg",
            "status": "Returning Series",
            "seasons": [
                {"season_number": 0, "air_date": null},
                {"season_number": 1, "air_date": "2022-08-21"}
            ],
            "next_episode_to_air": {"season_number": 3, "air_date": "2026-06-01"},
            "networks": [{"name": "HBO"}]
        }"#;
        let meta: SeriesMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.seasons.len(), 2);
        assert_eq!(meta.networks[0].name, "HBO");
        assert_eq!(
            meta.next_episode_to_air.as_ref().unwrap().season_number,
            Some(3)
        );
    }
}
