use contracts::domain::a002_court::{CourtRequest, CourtResponse};
use uuid::Uuid;

use crate::shared::api_utils::{ApiClient, ApiError};

pub async fn fetch_facility_courts(
    api: &ApiClient,
    facility_id: &Uuid,
) -> Result<Vec<CourtResponse>, ApiError> {
    api.get(&format!("/owner/facilities/{facility_id}/courts"))
        .await
}

/// The request is validated and its times normalised before sending.
pub async fn create_court(
    api: &ApiClient,
    facility_id: &Uuid,
    request: CourtRequest,
) -> Result<CourtResponse, ApiError> {
    let request = request.validated().map_err(ApiError::Validation)?;
    api.post(&format!("/owner/facilities/{facility_id}/courts"), &request)
        .await
}

pub async fn update_court(
    api: &ApiClient,
    court_id: &Uuid,
    request: CourtRequest,
) -> Result<CourtResponse, ApiError> {
    let request = request.validated().map_err(ApiError::Validation)?;
    api.put(&format!("/owner/courts/{court_id}"), &request).await
}
