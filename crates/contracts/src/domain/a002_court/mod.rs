pub mod aggregate;

pub use aggregate::{CourtRequest, CourtResponse};
