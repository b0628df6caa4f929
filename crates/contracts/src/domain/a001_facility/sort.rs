use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::aggregate::FacilityResponse;
use crate::shared::query::sort::{cmp_f64, cmp_text};
use crate::shared::query::Comparator;

/// Sort options of the venue search page. `Relevance` keeps server order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VenueSort {
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
    Name,
}

impl VenueSort {
    pub fn all() -> Vec<VenueSort> {
        vec![
            VenueSort::Relevance,
            VenueSort::PriceLow,
            VenueSort::PriceHigh,
            VenueSort::Rating,
            VenueSort::Newest,
            VenueSort::Name,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VenueSort::Relevance => "relevance",
            VenueSort::PriceLow => "price-low",
            VenueSort::PriceHigh => "price-high",
            VenueSort::Rating => "rating",
            VenueSort::Newest => "newest",
            VenueSort::Name => "name",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VenueSort::Relevance => "Most Relevant",
            VenueSort::PriceLow => "Price: Low to High",
            VenueSort::PriceHigh => "Price: High to Low",
            VenueSort::Rating => "Highest Rated",
            VenueSort::Newest => "Newest First",
            VenueSort::Name => "Name: A to Z",
        }
    }

    /// Unknown keys fall back to `Relevance`.
    pub fn parse(key: &str) -> Self {
        VenueSort::all()
            .into_iter()
            .find(|s| s.as_str() == key.trim())
            .unwrap_or_default()
    }
}

impl Comparator<FacilityResponse> for VenueSort {
    fn compare(&self, a: &FacilityResponse, b: &FacilityResponse) -> Ordering {
        match self {
            VenueSort::Relevance => Ordering::Equal,
            VenueSort::PriceLow => cmp_f64(a.starting_price, b.starting_price),
            VenueSort::PriceHigh => cmp_f64(b.starting_price, a.starting_price),
            VenueSort::Rating => cmp_f64(b.average_rating, a.average_rating),
            VenueSort::Newest => b.created_at.cmp(&a.created_at),
            VenueSort::Name => cmp_text(&a.name, &b.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_known_keys() {
        for sort in VenueSort::all() {
            assert_eq!(VenueSort::parse(sort.as_str()), sort);
        }
    }

    #[test]
    fn test_unknown_key_is_relevance() {
        assert_eq!(VenueSort::parse("distance"), VenueSort::Relevance);
        assert_eq!(VenueSort::parse(""), VenueSort::Relevance);
    }
}
