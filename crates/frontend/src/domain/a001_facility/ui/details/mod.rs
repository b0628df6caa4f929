mod booking;
mod reviews;
mod view;
mod view_model;

pub use view::FacilityDetails;
