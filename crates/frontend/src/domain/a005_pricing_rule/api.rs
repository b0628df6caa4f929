use contracts::domain::a005_pricing_rule::{PriceQuoteParams, PricingRuleRequest, PricingRuleResponse};
use uuid::Uuid;

use crate::shared::api_utils::{ApiClient, ApiError};

pub async fn fetch_facility_rules(
    api: &ApiClient,
    facility_id: &Uuid,
) -> Result<Vec<PricingRuleResponse>, ApiError> {
    api.get(&format!("/owner/pricing-rules/facility/{facility_id}"))
        .await
}

pub async fn fetch_court_rules(
    api: &ApiClient,
    court_id: &Uuid,
) -> Result<Vec<PricingRuleResponse>, ApiError> {
    api.get(&format!("/owner/pricing-rules/court/{court_id}")).await
}

pub async fn create_rule(
    api: &ApiClient,
    request: &PricingRuleRequest,
) -> Result<PricingRuleResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    api.post("/owner/pricing-rules", request).await
}

pub async fn update_rule(
    api: &ApiClient,
    id: &Uuid,
    request: &PricingRuleRequest,
) -> Result<PricingRuleResponse, ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    api.put(&format!("/owner/pricing-rules/{id}"), request).await
}

pub async fn delete_rule(api: &ApiClient, id: &Uuid) -> Result<(), ApiError> {
    api.delete_ok(&format!("/owner/pricing-rules/{id}")).await
}

/// Flips the rule's active flag server-side.
pub async fn toggle_rule(api: &ApiClient, id: &Uuid) -> Result<PricingRuleResponse, ApiError> {
    api.post_empty(&format!("/owner/pricing-rules/{id}/toggle"))
        .await
}

/// Total price for a booking after the court's rules are applied.
pub async fn quote_price(api: &ApiClient, params: &PriceQuoteParams) -> Result<f64, ApiError> {
    api.get_query("/owner/pricing-rules/calculate-price", params)
        .await
}
