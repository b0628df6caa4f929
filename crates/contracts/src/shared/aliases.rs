//! Vocabulary alias table for set-membership filters.
//!
//! Filter panels use short ids (`"locker"`, `"pro-shop"`, `"table-tennis"`)
//! while facilities describe themselves in free text (`"Lockers"`,
//! `"Changing Rooms"`, `"TABLE_TENNIS"`). Every fuzzy match between the two
//! goes through one of the tables below.

/// How a needle is compared with a record value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Needle is a substring of the normalized value.
    Contains,
    /// Needle equals the normalized value.
    Exact,
}

#[derive(Debug, Clone, Copy)]
pub struct AliasTable {
    mode: MatchMode,
    entries: &'static [(&'static str, &'static [&'static str])],
}

/// Amenity ids offered by the venue filter panel.
pub const AMENITY_ALIASES: AliasTable = AliasTable {
    mode: MatchMode::Contains,
    entries: &[
        ("parking", &["parking"]),
        ("locker", &["locker", "changing room"]),
        ("shower", &["shower"]),
        ("equipment", &["equipment", "rental"]),
        ("cafeteria", &["cafeteria", "cafe", "canteen"]),
        ("pro-shop", &["pro shop", "proshop"]),
        ("coaching", &["coach"]),
        ("wifi", &["wifi", "wi fi"]),
    ],
};

/// Sport ids. The backend sends enum names (`TABLE_TENNIS`), mock data and
/// older facilities use display names (`Table Tennis`).
pub const SPORT_ALIASES: AliasTable = AliasTable {
    mode: MatchMode::Exact,
    entries: &[
        ("football", &["football", "soccer"]),
        ("table-tennis", &["table tennis", "ping pong"]),
        ("water-polo", &["water polo"]),
    ],
};

/// Lowercase, and fold `_`/`-` separators into single spaces.
pub fn normalize_term(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl AliasTable {
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Normalized needles for a filter id. Unknown ids match on themselves.
    pub fn needles(&self, filter_id: &str) -> Vec<String> {
        let id = normalize_term(filter_id);
        let known = self
            .entries
            .iter()
            .find(|(key, _)| normalize_term(key) == id)
            .map(|(_, needles)| needles.iter().map(|n| normalize_term(n)).collect::<Vec<_>>());
        match known {
            Some(mut needles) => {
                if !needles.contains(&id) {
                    needles.push(id);
                }
                needles
            }
            None => vec![id],
        }
    }

    pub fn matches(&self, filter_id: &str, value: &str) -> bool {
        let value = normalize_term(value);
        if value.is_empty() {
            return false;
        }
        self.needles(filter_id).iter().any(|needle| match self.mode {
            MatchMode::Contains => value.contains(needle.as_str()),
            MatchMode::Exact => value == *needle,
        })
    }

    /// True if any of `values` matches `filter_id`.
    pub fn matches_any<'a, I>(&self, filter_id: &str, values: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        values.into_iter().any(|v| self.matches(filter_id, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locker_matches_changing_rooms() {
        assert!(AMENITY_ALIASES.matches("locker", "Lockers"));
        assert!(AMENITY_ALIASES.matches("locker", "Changing Rooms"));
        assert!(!AMENITY_ALIASES.matches("locker", "Parking"));
    }

    #[test]
    fn test_unknown_amenity_matches_itself() {
        assert!(AMENITY_ALIASES.matches("air-conditioning", "Air Conditioning"));
        assert!(AMENITY_ALIASES.matches("pro-shop", "Pro Shop"));
    }

    #[test]
    fn test_sport_matching_is_exact() {
        assert!(SPORT_ALIASES.matches("tennis", "TENNIS"));
        assert!(SPORT_ALIASES.matches("tennis", "Tennis"));
        assert!(!SPORT_ALIASES.matches("tennis", "Table Tennis"));
        assert!(SPORT_ALIASES.matches("table-tennis", "TABLE_TENNIS"));
        assert!(SPORT_ALIASES.matches("football", "Soccer"));
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  TABLE_TENNIS "), "table tennis");
        assert_eq!(normalize_term("pro-shop"), "pro shop");
        assert_eq!(normalize_term("Wi-Fi"), "wi fi");
    }
}
