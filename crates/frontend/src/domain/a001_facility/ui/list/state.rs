use contracts::domain::a001_facility::{FacilityResponse, VenueQuery, VenueQueryParams};
use contracts::shared::page::PageEnvelope;
use contracts::shared::query::CollectionSource;
use leptos::prelude::*;

/// Venues fetched per request; filtering and paging below that is local.
pub const SERVER_PAGE_SIZE: u32 = 36;

#[derive(Clone, Debug)]
pub struct VenueSearchState {
    pub query: VenueQuery,
    pub source: CollectionSource<FacilityResponse>,
    /// Zero-based server page the next "load more" asks for.
    pub next_page: u32,
    pub has_more: bool,
    pub is_loaded: bool,
}

impl VenueSearchState {
    pub fn new(page_size: usize) -> Self {
        Self {
            query: VenueQuery::new(page_size),
            source: CollectionSource::default(),
            next_page: 0,
            has_more: false,
            is_loaded: false,
        }
    }

    /// Only sports are pushed down to the server. The search text matches
    /// name or sports locally, and the server's name filter would drop
    /// venues that match by sport alone.
    pub fn server_params(&self, page: u32) -> VenueQueryParams {
        VenueQueryParams::new(page, SERVER_PAGE_SIZE)
            .with_sports(&self.query.filters().server_sports())
    }

    /// Fold a fetched page in. Returns how many venues were new.
    pub fn apply_page(&mut self, envelope: PageEnvelope<FacilityResponse>, append: bool) -> usize {
        self.has_more = envelope.has_more();
        self.next_page = envelope.number + 1;
        self.is_loaded = true;
        if append {
            self.source.append(envelope.content)
        } else {
            let count = envelope.content.len();
            self.source.replace(envelope.content);
            count
        }
    }
}

pub fn create_state(page_size: usize) -> RwSignal<VenueSearchState> {
    RwSignal::new(VenueSearchState::new(page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_facility::FacilityStatus;
    use contracts::shared::query::SetFilter;
    use uuid::Uuid;

    fn venue(name: &str) -> FacilityResponse {
        FacilityResponse {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            address: None,
            sports: vec!["TENNIS".into()],
            amenities: vec![],
            status: FacilityStatus::Approved,
            average_rating: Some(4.0),
            total_reviews: Some(3),
            photos: vec![],
            starting_price: Some(500.0),
            created_at: None,
        }
    }

    fn envelope(content: Vec<FacilityResponse>, number: u32, last: bool) -> PageEnvelope<FacilityResponse> {
        PageEnvelope {
            content,
            total_pages: 2,
            total_elements: 4,
            number,
            last: Some(last),
        }
    }

    #[test]
    fn test_server_params_carry_sports_only() {
        let mut state = VenueSearchState::new(9);
        state.query.set_search("tennis");
        state
            .query
            .update_filters(|f| f.sports = SetFilter::new(["tennis", "padel"]));
        let params = state.server_params(2);
        assert_eq!(params.page, 2);
        assert_eq!(params.name, None);
        assert_eq!(params.sports.as_deref(), Some("TENNIS"));
    }

    #[test]
    fn test_search_matches_sport_locally() {
        let mut state = VenueSearchState::new(9);
        let mut arena = venue("City Arena");
        arena.sports = vec!["TENNIS".into()];
        let mut hoops = venue("Hoops Hall");
        hoops.sports = vec!["BASKETBALL".into()];
        state.apply_page(envelope(vec![arena, hoops], 0, true), false);

        state.query.set_search("tennis");
        assert_eq!(state.server_params(0).name, None);
        let mut query = state.query.clone();
        let outcome = query.run(state.source.items(), |f: &FacilityResponse| f.name.clone());
        assert_eq!(outcome.rows, vec!["City Arena".to_string()]);
    }

    #[test]
    fn test_load_more_appends_without_duplicates() {
        let mut state = VenueSearchState::new(9);
        let a = venue("A");
        let b = venue("B");
        assert_eq!(state.apply_page(envelope(vec![a.clone()], 0, false), false), 1);
        assert!(state.has_more);
        assert_eq!(state.next_page, 1);

        state.query.set_page(2);
        let page_before = state.query.current_page();
        assert_eq!(state.apply_page(envelope(vec![a, b], 1, true), true), 1);
        assert_eq!(state.source.len(), 2);
        assert!(!state.has_more);
        assert_eq!(state.query.current_page(), page_before);
    }

    #[test]
    fn test_new_search_replaces_source() {
        let mut state = VenueSearchState::new(9);
        state.apply_page(envelope(vec![venue("A"), venue("B")], 0, false), false);
        state.apply_page(envelope(vec![venue("C")], 0, true), false);
        assert_eq!(state.source.len(), 1);
        assert_eq!(state.source.items()[0].name, "C");
    }
}
