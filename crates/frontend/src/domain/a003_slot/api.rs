use chrono::NaiveDate;
use contracts::domain::a003_slot::aggregate::SlotDateParams;
use contracts::domain::a003_slot::{AllSlotsResponse, SlotRef, SlotWindow};
use uuid::Uuid;

use crate::shared::api_utils::{ApiClient, ApiError};

/// Available and blocked windows of one court on one day.
pub async fn fetch_all_slots(
    api: &ApiClient,
    court_id: &Uuid,
    date: NaiveDate,
) -> Result<AllSlotsResponse, ApiError> {
    api.get_query(&format!("/api/courts/{court_id}/all-slots"), &SlotDateParams { date })
        .await
}

/// Bookable windows only, as shown to players.
pub async fn fetch_available_slots(
    api: &ApiClient,
    court_id: &Uuid,
    date: NaiveDate,
) -> Result<Vec<SlotWindow>, ApiError> {
    api.get_query(
        &format!("/api/courts/{court_id}/available-slots"),
        &SlotDateParams { date },
    )
    .await
}

pub async fn block_slot(api: &ApiClient, slot: &SlotRef) -> Result<(), ApiError> {
    send_slot_action(api, slot, "block").await
}

pub async fn unblock_slot(api: &ApiClient, slot: &SlotRef) -> Result<(), ApiError> {
    send_slot_action(api, slot, "unblock").await
}

async fn send_slot_action(api: &ApiClient, slot: &SlotRef, action: &str) -> Result<(), ApiError> {
    let params = slot
        .params()
        .ok_or_else(|| ApiError::Validation(format!("Invalid slot time {}", slot.start_time)))?;
    api.post_query_ok(&format!("/owner/courts/{}/{action}", slot.court_id), &params)
        .await
}
