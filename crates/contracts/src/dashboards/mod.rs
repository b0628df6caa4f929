pub mod admin;
pub mod owner;

pub use admin::{AdminDashboardResponse, SportStats};
pub use owner::{BookingTrendData, FacilityStats, OwnerDashboardResponse};
