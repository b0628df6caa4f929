use contracts::domain::a004_booking::{
    BookingRequest, BookingResponse, DateRangeParams, SearchParams, DEFAULT_SORT,
};
use contracts::shared::page::{PageEnvelope, PageRequest};
use uuid::Uuid;

use crate::shared::api_utils::{ApiClient, ApiError};
use crate::shared::date_utils::today;

/// The signed-in user's bookings, newest first unless `page` says otherwise.
pub async fn fetch_bookings(
    api: &ApiClient,
    page: u32,
    size: u32,
) -> Result<PageEnvelope<BookingResponse>, ApiError> {
    api.get_query("/bookings", &PageRequest::new(page, size).sorted(DEFAULT_SORT))
        .await
}

pub async fn search_bookings(
    api: &ApiClient,
    params: &SearchParams,
) -> Result<PageEnvelope<BookingResponse>, ApiError> {
    api.get_query("/bookings/search", params).await
}

pub async fn fetch_bookings_in_range(
    api: &ApiClient,
    params: &DateRangeParams,
) -> Result<PageEnvelope<BookingResponse>, ApiError> {
    if params.end_date < params.start_date {
        return Err(ApiError::Validation("End date must not be before start date".into()));
    }
    api.get_query("/bookings/date-range", params).await
}

pub async fn fetch_booking(api: &ApiClient, id: &Uuid) -> Result<BookingResponse, ApiError> {
    api.get(&format!("/bookings/{id}")).await
}

pub async fn create_booking(
    api: &ApiClient,
    request: &BookingRequest,
) -> Result<BookingResponse, ApiError> {
    request.validate(today()).map_err(ApiError::Validation)?;
    api.post("/bookings", request).await
}

pub async fn update_booking(
    api: &ApiClient,
    id: &Uuid,
    request: &BookingRequest,
) -> Result<BookingResponse, ApiError> {
    request.validate(today()).map_err(ApiError::Validation)?;
    api.put(&format!("/bookings/{id}"), request).await
}

pub async fn cancel_booking(api: &ApiClient, id: &Uuid) -> Result<(), ApiError> {
    api.put_empty_ok(&format!("/bookings/{id}/cancel")).await
}
