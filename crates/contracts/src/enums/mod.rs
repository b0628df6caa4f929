pub mod day_of_week;
pub mod sport;

pub use day_of_week::DayOfWeek;
pub use sport::Sport;
