use contracts::domain::a001_facility::FacilityResponse;
use contracts::domain::a002_court::CourtResponse;
use contracts::domain::a006_review::ReviewResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

use crate::domain::a001_facility::api;
use crate::domain::a002_court::api as court_api;
use crate::domain::a006_review::api as review_api;
use crate::shared::api_utils::ApiClient;
use crate::shared::toast::{notify_api_error, Notifications};

/// State behind one facility details tab.
#[derive(Clone, Copy)]
pub struct FacilityDetailsViewModel {
    pub id: Uuid,
    pub facility: RwSignal<Option<FacilityResponse>>,
    pub courts: RwSignal<Vec<CourtResponse>>,
    pub reviews: RwSignal<Vec<ReviewResponse>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
}

impl FacilityDetailsViewModel {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            facility: RwSignal::new(None),
            courts: RwSignal::new(Vec::new()),
            reviews: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }

    /// Facility first; courts and reviews only once it exists.
    pub fn load(&self, api: ApiClient, notifications: Notifications) {
        let vm = *self;
        vm.loading.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match api::fetch_facility(&api, &vm.id).await {
                Ok(facility) => vm.facility.set(Some(facility)),
                Err(e) if e.is_cancelled() => return,
                Err(e) => {
                    vm.error.set(Some(e.to_string()));
                    vm.loading.set(false);
                    return;
                }
            }
            match court_api::fetch_facility_courts(&api, &vm.id).await {
                Ok(courts) => vm.courts.set(courts.into_iter().filter(CourtResponse::is_active).collect()),
                Err(e) => notify_api_error(notifications, "Load courts", &e),
            }
            vm.loading.set(false);
            vm.reload_reviews(api, notifications);
        });
    }

    pub fn reload_reviews(&self, api: ApiClient, notifications: Notifications) {
        let vm = *self;
        spawn_local(async move {
            match review_api::fetch_reviews(&api, &vm.id).await {
                Ok(reviews) => vm.reviews.set(reviews),
                Err(e) => notify_api_error(notifications, "Load reviews", &e),
            }
        });
    }

    pub fn title(&self) -> Option<String> {
        self.facility.with(|f| f.as_ref().map(|f| f.name.clone()))
    }
}
