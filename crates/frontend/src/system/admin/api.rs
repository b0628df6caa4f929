use contracts::dashboards::AdminDashboardResponse;
use contracts::domain::a001_facility::FacilityResponse;
use contracts::shared::page::{PageEnvelope, PageRequest};
use contracts::system::users::{RejectParams, UserResponse};
use uuid::Uuid;

use crate::shared::api_utils::{ApiClient, ApiError};

pub async fn fetch_dashboard(api: &ApiClient) -> Result<AdminDashboardResponse, ApiError> {
    api.get("/admin/dashboard").await
}

pub async fn fetch_facility_requests(
    api: &ApiClient,
    page: &PageRequest,
) -> Result<PageEnvelope<FacilityResponse>, ApiError> {
    api.get_query("/admin/facility-requests", page).await
}

pub async fn approve_facility(api: &ApiClient, id: &Uuid) -> Result<(), ApiError> {
    api.post_empty_ok(&format!("/admin/facility-requests/{id}/approve"))
        .await
}

pub async fn reject_facility(api: &ApiClient, id: &Uuid, reason: &str) -> Result<(), ApiError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(ApiError::Validation("A rejection reason is required".into()));
    }
    let params = RejectParams {
        reason: reason.to_string(),
    };
    api.post_query_ok(&format!("/admin/facility-requests/{id}/reject"), &params)
        .await
}

pub async fn fetch_users(
    api: &ApiClient,
    page: &PageRequest,
) -> Result<PageEnvelope<UserResponse>, ApiError> {
    api.get_query("/admin/users", page).await
}

/// Ban or lift a ban, depending on `ban`.
pub async fn set_banned(api: &ApiClient, id: &Uuid, ban: bool) -> Result<(), ApiError> {
    let action = if ban { "ban" } else { "unban" };
    api.post_empty_ok(&format!("/admin/users/{id}/{action}"))
        .await
}
