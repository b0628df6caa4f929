pub mod d400_owner_summary;

pub use d400_owner_summary::OwnerSummaryDashboard;
