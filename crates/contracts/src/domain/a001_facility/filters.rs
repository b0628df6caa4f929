use serde::{Deserialize, Serialize};

use super::aggregate::FacilityResponse;
use crate::enums::Sport;
use crate::shared::aliases::{normalize_term, AMENITY_ALIASES, SPORT_ALIASES};
use crate::shared::query::{FilterSet, NumericRange, SetFilter, Threshold};

/// Amenity filter ids offered by the search sidebar.
pub const AMENITY_OPTIONS: &[(&str, &str)] = &[
    ("parking", "Parking"),
    ("locker", "Locker Room"),
    ("shower", "Shower"),
    ("equipment", "Equipment Rental"),
    ("cafeteria", "Cafeteria"),
    ("pro-shop", "Pro Shop"),
    ("coaching", "Coaching"),
    ("wifi", "WiFi"),
];

/// Rating thresholds offered by the search sidebar.
pub const RATING_OPTIONS: &[f64] = &[4.5, 4.0, 3.5, 3.0];

/// Filter state of the venue search page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueFilters {
    pub sports: SetFilter,
    pub price: NumericRange,
    pub min_rating: Threshold,
    pub amenities: SetFilter,
}

/// One removable chip shown above the results.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveFilter {
    Sport(String),
    Price(NumericRange),
    Rating(f64),
    Amenity(String),
}

impl ActiveFilter {
    pub fn label(&self) -> String {
        match self {
            ActiveFilter::Sport(id) => Sport::from_code(id)
                .map(|s| s.display_name().to_string())
                .unwrap_or_else(|| id.clone()),
            ActiveFilter::Price(range) => match (range.min, range.max) {
                (Some(min), Some(max)) => format!("₹{min:.0} - ₹{max:.0}"),
                (Some(min), None) => format!("From ₹{min:.0}"),
                (None, Some(max)) => format!("Up to ₹{max:.0}"),
                (None, None) => "Any price".to_string(),
            },
            ActiveFilter::Rating(min) => format!("{min}+ stars"),
            ActiveFilter::Amenity(id) => AMENITY_OPTIONS
                .iter()
                .find(|(key, _)| key == id)
                .map(|(_, label)| label.to_string())
                .unwrap_or_else(|| id.clone()),
        }
    }
}

impl VenueFilters {
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut chips: Vec<ActiveFilter> = self
            .sports
            .values
            .iter()
            .cloned()
            .map(ActiveFilter::Sport)
            .collect();
        if self.price.is_active() {
            chips.push(ActiveFilter::Price(self.price));
        }
        if self.min_rating.is_active() {
            chips.push(ActiveFilter::Rating(self.min_rating.min));
        }
        chips.extend(self.amenities.values.iter().cloned().map(ActiveFilter::Amenity));
        chips
    }

    pub fn remove(&mut self, chip: &ActiveFilter) {
        match chip {
            ActiveFilter::Sport(id) => self.sports.toggle(id, false),
            ActiveFilter::Price(_) => self.price = NumericRange::default(),
            ActiveFilter::Rating(_) => self.min_rating = Threshold::default(),
            ActiveFilter::Amenity(id) => self.amenities.toggle(id, false),
        }
    }

    /// Sports that can also be pushed down to the `/venues` query.
    pub fn server_sports(&self) -> Vec<Sport> {
        self.sports
            .values
            .iter()
            .filter_map(|id| Sport::from_code(id))
            .collect()
    }

    fn matches_amenities(&self, record: &FacilityResponse) -> bool {
        self.amenities
            .matches_any(record.amenities.iter().map(String::as_str), &AMENITY_ALIASES)
    }
}

impl FilterSet<FacilityResponse> for VenueFilters {
    fn matches(&self, record: &FacilityResponse) -> bool {
        self.sports
            .matches_any(record.sports.iter().map(String::as_str), &SPORT_ALIASES)
            && self.price.contains(record.starting_price, false)
            && self.min_rating.passes(record.average_rating)
            && self.matches_amenities(record)
    }

    fn active_count(&self) -> usize {
        self.sports.values.len()
            + usize::from(self.price.is_active())
            + usize::from(self.min_rating.is_active())
            + self.amenities.values.len()
    }
}

/// Sport ids present in a result set, for building filter options from data.
pub fn sports_in(records: &[FacilityResponse]) -> Vec<String> {
    let mut ids: Vec<String> = records
        .iter()
        .flat_map(|r| r.sports.iter())
        .map(|s| normalize_term(s).replace(' ', "-"))
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_facility::aggregate::FacilityStatus;
    use uuid::Uuid;

    fn venue(name: &str, sports: &[&str], price: f64, rating: f64, amenities: &[&str]) -> FacilityResponse {
        FacilityResponse {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            address: None,
            sports: sports.iter().map(|s| s.to_string()).collect(),
            amenities: amenities.iter().map(|s| s.to_string()).collect(),
            status: FacilityStatus::Approved,
            average_rating: Some(rating),
            total_reviews: None,
            photos: vec![],
            starting_price: Some(price),
            created_at: None,
        }
    }

    #[test]
    fn test_default_filters_match_everything() {
        let f = VenueFilters::default();
        assert!(f.is_default());
        assert!(f.matches(&venue("x", &[], 0.0, 0.0, &[])));
    }

    #[test]
    fn test_sport_filter_is_case_insensitive() {
        let mut f = VenueFilters::default();
        f.sports.toggle("tennis", true);
        assert!(f.matches(&venue("a", &["TENNIS"], 45.0, 4.8, &[])));
        assert!(!f.matches(&venue("b", &["Table Tennis"], 25.0, 4.4, &[])));
        assert!(!f.matches(&venue("c", &["BASKETBALL"], 35.0, 4.2, &[])));
    }

    #[test]
    fn test_amenity_alias_matching() {
        let mut f = VenueFilters::default();
        f.amenities.toggle("locker", true);
        assert!(f.matches(&venue("a", &[], 1.0, 1.0, &["Changing Rooms"])));
        assert!(f.matches(&venue("b", &[], 1.0, 1.0, &["Lockers"])));
        assert!(!f.matches(&venue("c", &[], 1.0, 1.0, &["Parking"])));
    }

    #[test]
    fn test_price_and_rating() {
        let f = VenueFilters {
            price: NumericRange::new(Some(30.0), Some(50.0)),
            min_rating: Threshold::new(4.5),
            ..Default::default()
        };
        assert!(f.matches(&venue("a", &[], 45.0, 4.8, &[])));
        assert!(!f.matches(&venue("b", &[], 35.0, 4.2, &[])));
        assert!(!f.matches(&venue("c", &[], 55.0, 4.7, &[])));
        assert_eq!(f.active_count(), 2);
    }

    #[test]
    fn test_missing_price_counts_as_zero() {
        let mut v = venue("free", &[], 0.0, 5.0, &[]);
        v.starting_price = None;
        let open_top = VenueFilters {
            price: NumericRange::new(None, Some(20.0)),
            ..Default::default()
        };
        let min_ten = VenueFilters {
            price: NumericRange::new(Some(10.0), None),
            ..Default::default()
        };
        assert!(open_top.matches(&v));
        assert!(!min_ten.matches(&v));
    }

    #[test]
    fn test_chips_remove_their_constraint() {
        let mut f = VenueFilters::default();
        f.sports.toggle("tennis", true);
        f.amenities.toggle("wifi", true);
        f.min_rating = Threshold::new(4.0);
        let chips = f.active_filters();
        assert_eq!(chips.len(), 3);
        assert_eq!(chips[2].label(), "WiFi");
        for chip in &chips {
            f.remove(chip);
        }
        assert_eq!(f, VenueFilters::default());
    }

    #[test]
    fn test_sports_in_deduplicates() {
        let records = vec![
            venue("a", &["TENNIS", "TABLE_TENNIS"], 1.0, 1.0, &[]),
            venue("b", &["Tennis"], 1.0, 1.0, &[]),
        ];
        assert_eq!(sports_in(&records), vec!["table-tennis", "tennis"]);
    }
}
