use serde::{Deserialize, Serialize};

use crate::shared::aliases::AliasTable;

/// Records that take part in free-text search.
pub trait Searchable {
    /// Field values the search text is matched against.
    fn search_fields(&self) -> Vec<&str>;
}

/// A conjunction of independent constraints over one record type.
///
/// Implementations must be pure: no constraint may depend on evaluation
/// order or on a previous call.
pub trait FilterSet<R> {
    fn matches(&self, record: &R) -> bool;

    /// Number of constraints that differ from their default.
    fn active_count(&self) -> usize;

    fn is_default(&self) -> bool {
        self.active_count() == 0
    }
}

/// Case-insensitive substring query. Empty (or whitespace) matches all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextQuery(pub String);

impl TextQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn is_active(&self) -> bool {
        !self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches_any<'a, I>(&self, fields: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if !self.is_active() {
            return true;
        }
        let needle = self.0.trim().to_lowercase();
        fields
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Inclusive numeric range. `None` bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_active(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    /// Test a possibly missing value.
    ///
    /// A missing value fails an active range only when the field is
    /// `mandatory`; otherwise it counts as `0`.
    pub fn contains(&self, value: Option<f64>, mandatory: bool) -> bool {
        if !self.is_active() {
            return true;
        }
        let value = match value {
            Some(v) => v,
            None if mandatory => return false,
            None => 0.0,
        };
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Set-membership constraint: passes when empty or when any filter id
/// matches any record value through the alias table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetFilter {
    pub values: Vec<String>,
}

impl SetFilter {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.values.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.values.iter().any(|v| v == id)
    }

    /// Add `id` when `on`, remove it otherwise. Duplicates are not kept.
    pub fn toggle(&mut self, id: &str, on: bool) {
        if on {
            if !self.contains_id(id) {
                self.values.push(id.to_string());
            }
        } else {
            self.values.retain(|v| v != id);
        }
    }

    pub fn matches_any<'a, I>(&self, record_values: I, aliases: &AliasTable) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        if !self.is_active() {
            return true;
        }
        let record_values: Vec<&str> = record_values.into_iter().collect();
        self.values
            .iter()
            .any(|id| aliases.matches_any(id, record_values.iter().copied()))
    }
}

/// Minimum-value threshold; `0` is the no-op default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub min: f64,
}

impl Threshold {
    pub fn new(min: f64) -> Self {
        Self { min }
    }

    pub fn is_active(&self) -> bool {
        self.min > 0.0
    }

    /// Missing values fail an active threshold; the field is required to
    /// clear it.
    pub fn passes(&self, value: Option<f64>) -> bool {
        if !self.is_active() {
            return true;
        }
        value.map_or(false, |v| v >= self.min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::aliases::{AMENITY_ALIASES, SPORT_ALIASES};

    #[test]
    fn test_text_query_default_matches_everything() {
        let q = TextQuery::default();
        assert!(!q.is_active());
        assert!(q.matches_any(Vec::<&str>::new()));
        assert!(TextQuery::new("   ").matches_any(["anything"]));
    }

    #[test]
    fn test_text_query_case_insensitive() {
        let q = TextQuery::new("TENN");
        assert!(q.matches_any(["Elite Tennis Club"]));
        assert!(q.matches_any(["City Hoops", "tennis"]));
        assert!(!q.matches_any(["City Hoops", "basketball"]));
    }

    #[test]
    fn test_numeric_range_missing_values() {
        let range = NumericRange::new(Some(10.0), Some(50.0));
        assert!(range.contains(Some(10.0), true));
        assert!(range.contains(Some(50.0), true));
        assert!(!range.contains(Some(50.5), true));
        assert!(!range.contains(None, true));
        // optional field counts as zero
        assert!(!range.contains(None, false));
        assert!(NumericRange::new(None, Some(20.0)).contains(None, false));
        // default range passes even missing mandatory values
        assert!(NumericRange::default().contains(None, true));
    }

    #[test]
    fn test_set_filter() {
        let empty = SetFilter::default();
        assert!(empty.matches_any(Vec::<&str>::new(), &AMENITY_ALIASES));

        let lockers = SetFilter::new(["locker"]);
        assert!(lockers.matches_any(["Parking", "Changing Rooms"], &AMENITY_ALIASES));
        assert!(!lockers.matches_any(["Parking"], &AMENITY_ALIASES));
        assert!(!lockers.matches_any(Vec::<&str>::new(), &AMENITY_ALIASES));

        let sports = SetFilter::new(["tennis", "squash"]);
        assert!(sports.matches_any(["SQUASH"], &SPORT_ALIASES));
    }

    #[test]
    fn test_set_filter_toggle() {
        let mut f = SetFilter::default();
        f.toggle("wifi", true);
        f.toggle("wifi", true);
        assert_eq!(f.values, vec!["wifi".to_string()]);
        f.toggle("wifi", false);
        assert!(!f.is_active());
    }

    #[test]
    fn test_threshold() {
        assert!(Threshold::default().passes(None));
        let t = Threshold::new(4.5);
        assert!(t.passes(Some(4.5)));
        assert!(!t.passes(Some(4.2)));
        assert!(!t.passes(None));
    }
}
