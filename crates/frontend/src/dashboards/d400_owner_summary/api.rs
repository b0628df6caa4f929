use contracts::dashboards::OwnerDashboardResponse;

use crate::shared::api_utils::{ApiClient, ApiError};

/// KPIs, trends and per-facility figures for the signed-in owner.
pub async fn fetch_owner_dashboard(api: &ApiClient) -> Result<OwnerDashboardResponse, ApiError> {
    api.get("/owner/dashboard").await
}
