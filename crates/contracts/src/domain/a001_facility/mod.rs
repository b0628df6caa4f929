pub mod aggregate;
pub mod card;
pub mod filters;
pub mod sort;

pub use aggregate::{FacilityRequest, FacilityResponse, FacilityStatus, VenueQueryParams};
pub use card::VenueCard;
pub use filters::{ActiveFilter, VenueFilters};
pub use sort::VenueSort;

use crate::shared::query::ListQuery;

/// Client-side query state of the venue search page.
pub type VenueQuery = ListQuery<VenueFilters, VenueSort>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::{paginate, Comparator, FilterSet, NumericRange, Searchable, SetFilter, Threshold};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn venue(seq: u32, sports: Vec<String>, price: Option<f64>, rating: Option<f64>, amenities: Vec<String>) -> FacilityResponse {
        FacilityResponse {
            id: Uuid::from_u128(seq as u128),
            name: format!("Venue {seq}"),
            description: None,
            address: None,
            sports,
            amenities,
            status: FacilityStatus::Approved,
            average_rating: rating,
            total_reviews: None,
            photos: vec![],
            starting_price: price,
            created_at: None,
        }
    }

    fn apply(records: &[FacilityResponse], filters: &VenueFilters, search: &str) -> Vec<FacilityResponse> {
        let mut q = VenueQuery::new(1000);
        q.set_filters(filters.clone());
        q.set_search(search);
        q.filtered(records).into_iter().cloned().collect()
    }

    #[test]
    fn test_tennis_filter_sorted_by_price_high() {
        let mut elite = venue(1, vec!["tennis".into()], Some(45.0), Some(4.8), vec![]);
        elite.name = "Elite Tennis".into();
        let mut hoops = venue(2, vec!["basketball".into()], Some(35.0), Some(4.2), vec![]);
        hoops.name = "City Hoops".into();
        let source = vec![elite, hoops];

        let mut q = VenueQuery::new(9);
        q.update_filters(|f| f.sports.toggle("tennis", true));
        q.set_sort(VenueSort::parse("price-high"));
        let out = q.run(&source, |f| f.name.clone());
        assert_eq!(out.rows, vec!["Elite Tennis".to_string()]);
        assert_eq!(out.source_count, 2);
    }

    #[test]
    fn test_search_matches_name_or_sport() {
        let source = vec![
            venue(1, vec!["BADMINTON".into()], None, None, vec![]),
            venue(2, vec!["FOOTBALL".into()], None, None, vec![]),
        ];
        assert_eq!(apply(&source, &VenueFilters::default(), "badm").len(), 1);
        assert_eq!(apply(&source, &VenueFilters::default(), "venue 2").len(), 1);
        assert_eq!(apply(&source, &VenueFilters::default(), "VENUE").len(), 2);
    }

    #[test]
    fn test_cards_do_not_touch_source() {
        let source = vec![venue(1, vec!["TENNIS".into()], Some(10.0), Some(4.0), vec![])];
        let before = source.clone();
        let mut q = VenueQuery::new(9);
        let out = q.run(&source, VenueCard::from_facility);
        assert_eq!(out.rows[0].photo_url, card::PLACEHOLDER_PHOTO);
        assert_eq!(source, before);
    }

    const SPORTS: &[&str] = &["TENNIS", "TABLE_TENNIS", "BADMINTON", "FOOTBALL"];
    const AMENITIES: &[&str] = &["Parking", "Lockers", "Changing Rooms", "WiFi", "Cafe"];
    const SPORT_IDS: &[&str] = &["tennis", "table-tennis", "badminton", "football"];
    const AMENITY_IDS: &[&str] = &["parking", "locker", "wifi", "cafeteria"];

    fn pick(vocab: &'static [&'static str]) -> impl Strategy<Value = Vec<String>> {
        proptest::sample::subsequence(vocab, 0..=vocab.len())
            .prop_map(|v| v.into_iter().map(str::to_string).collect())
    }

    fn arb_venues() -> impl Strategy<Value = Vec<FacilityResponse>> {
        prop::collection::vec(
            (
                pick(SPORTS),
                prop::option::of(0u32..120),
                prop::option::of(0u32..=50),
                pick(AMENITIES),
            ),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (sports, price, rating, amenities))| {
                    venue(
                        i as u32,
                        sports,
                        price.map(f64::from),
                        rating.map(|r| f64::from(r) / 10.0),
                        amenities,
                    )
                })
                .collect()
        })
    }

    fn arb_filters() -> impl Strategy<Value = VenueFilters> {
        (
            pick(SPORT_IDS),
            prop::option::of(0u32..60),
            prop::option::of(40u32..120),
            0u32..=5,
            pick(AMENITY_IDS),
        )
            .prop_map(|(sports, min, max, rating, amenities)| VenueFilters {
                sports: SetFilter::new(sports),
                price: NumericRange::new(min.map(f64::from), max.map(f64::from)),
                min_rating: Threshold::new(f64::from(rating)),
                amenities: SetFilter::new(amenities),
            })
    }

    fn arb_sort() -> impl Strategy<Value = VenueSort> {
        prop::sample::select(VenueSort::all())
    }

    proptest! {
        #[test]
        fn prop_filter_is_idempotent(records in arb_venues(), filters in arb_filters()) {
            let once = apply(&records, &filters, "");
            let twice = apply(&once, &filters, "");
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_extra_constraint_never_grows_result(
            records in arb_venues(),
            filters in arb_filters(),
            extra_rating in 1u32..=5,
        ) {
            let base = apply(&records, &filters, "");
            let mut narrower = filters.clone();
            if !narrower.min_rating.is_active() {
                narrower.min_rating = Threshold::new(f64::from(extra_rating));
            } else {
                narrower.price.max = Some(narrower.price.max.map_or(50.0, |m| m.min(50.0)));
            }
            prop_assert!(narrower.active_count() >= filters.active_count());
            prop_assert!(apply(&records, &narrower, "").len() <= base.len());
        }

        #[test]
        fn prop_default_filters_are_identity(records in arb_venues()) {
            let out = apply(&records, &VenueFilters::default(), "");
            prop_assert_eq!(out, records);
        }

        #[test]
        fn prop_sort_is_stable(records in arb_venues(), sort in arb_sort()) {
            let mut q = VenueQuery::new(1000);
            q.set_sort(sort);
            let sorted = q.filtered(&records);
            let position = |id: &Uuid| records.iter().position(|r| &r.id == id).unwrap_or(usize::MAX);
            for pair in sorted.windows(2) {
                if sort.compare(pair[0], pair[1]) == std::cmp::Ordering::Equal {
                    prop_assert!(position(&pair[0].id) < position(&pair[1].id));
                }
            }
        }

        #[test]
        fn prop_pages_cover_filtered_sequence(
            records in arb_venues(),
            filters in arb_filters(),
            page_size in 1usize..12,
        ) {
            let filtered = apply(&records, &filters, "");
            let pages = crate::shared::query::page_count(filtered.len(), page_size);
            let mut joined = Vec::new();
            for page in 1..=pages {
                let slice = paginate(&filtered, page_size, page);
                if page < pages {
                    prop_assert_eq!(slice.len(), page_size);
                }
                joined.extend_from_slice(slice);
            }
            prop_assert_eq!(joined, filtered);
        }
    }

    #[test]
    fn test_search_fields_cover_sports() {
        let v = venue(7, vec!["CRICKET".into()], None, None, vec![]);
        assert!(v.search_fields().contains(&"CRICKET"));
        assert!(VenueFilters::default().matches(&v));
    }
}
