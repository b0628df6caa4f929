pub mod aggregate;

pub use aggregate::{rating_summary, RatingSummary, ReviewRequest, ReviewResponse, MAX_COMMENT_LEN};
