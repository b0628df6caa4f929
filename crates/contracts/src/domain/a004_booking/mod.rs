pub mod aggregate;
pub mod stats;

pub use aggregate::{
    BookingFilters, BookingRequest, BookingResponse, BookingSort, BookingStatus, DateRangeParams,
    SearchParams,
};
pub use stats::{upcoming, BookingStats};

use crate::shared::query::ListQuery;

/// Local status filter and sort over the current server page.
pub type BookingQuery = ListQuery<BookingFilters, BookingSort>;

/// Default server sort of `GET /bookings`.
pub const DEFAULT_SORT: &str = "bookingDate,desc";
