pub mod aliases;
pub mod api_error;
pub mod page;
pub mod query;
pub mod time;
