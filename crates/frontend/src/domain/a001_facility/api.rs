use contracts::domain::a001_facility::{FacilityRequest, FacilityResponse, VenueQueryParams};
use contracts::shared::page::PageEnvelope;
use uuid::Uuid;

use crate::shared::api_utils::{ApiClient, ApiError};

/// One page of approved venues.
pub async fn fetch_venues(
    api: &ApiClient,
    params: &VenueQueryParams,
) -> Result<PageEnvelope<FacilityResponse>, ApiError> {
    api.get_query("/venues", params).await
}

pub async fn fetch_facility(api: &ApiClient, id: &Uuid) -> Result<FacilityResponse, ApiError> {
    api.get(&format!("/facilities/{id}")).await
}

pub async fn fetch_owner_facilities(api: &ApiClient) -> Result<Vec<FacilityResponse>, ApiError> {
    api.get("/owner/facilities").await
}

pub async fn create_facility(
    api: &ApiClient,
    request: &FacilityRequest,
) -> Result<FacilityResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    api.post("/owner/facilities", request).await
}

pub async fn update_facility(
    api: &ApiClient,
    id: &Uuid,
    request: &FacilityRequest,
) -> Result<FacilityResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    api.put(&format!("/owner/facilities/{id}"), request).await
}
