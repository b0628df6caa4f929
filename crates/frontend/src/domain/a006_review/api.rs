use contracts::domain::a006_review::{ReviewRequest, ReviewResponse};
use uuid::Uuid;

use crate::shared::api_utils::{ApiClient, ApiError};

pub async fn fetch_reviews(
    api: &ApiClient,
    facility_id: &Uuid,
) -> Result<Vec<ReviewResponse>, ApiError> {
    api.get(&format!("/facilities/{facility_id}/reviews")).await
}

/// Validated locally before it is sent.
pub async fn submit_review(
    api: &ApiClient,
    request: &ReviewRequest,
) -> Result<ReviewResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    api.post(&format!("/facilities/{}/reviews", request.facility_id), request)
        .await
}
