use std::collections::BTreeSet;

/// Normalize a title for matching: collapse internal whitespace runs to a
/// single space, trim, lowercase. The same normalization is applied to both
/// sides of every title comparison.
pub fn normalize_title(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Extract season numbers from a token string like "S1S2S3" or "s1 s2".
///
/// Every `S`/`s` immediately followed by digits contributes one season
/// number; everything else is ignored. Duplicates collapse, output is sorted.
pub fn parse_season_tokens(s: &str) -> BTreeSet<u32> {
    let mut seasons = BTreeSet::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != 's' && c != 'S' {
            continue;
        }
        let mut digits = String::new();
        while let Some(d) = chars.peek() {
            if d.is_ascii_digit() {
                digits.push(*d);
                chars.next();
            } else {
                break;
            }
        }
        if let Ok(n) = digits.parse::<u32>() {
            seasons.insert(n);
        }
    }
    seasons
}
