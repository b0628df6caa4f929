pub mod dashboard;
pub mod facility_requests;
pub mod users;

pub use dashboard::AdminDashboard;
pub use facility_requests::FacilityRequests;
pub use users::UserList;
