pub mod aggregate;
pub mod availability;

pub use crate::shared::time::normalize_time;
pub use aggregate::{AllSlotsResponse, BlockSlotParams, SlotWindow};
pub use availability::{
    derive_status_map, grid_times, plan_bulk, plan_toggle, week_dates, BulkOutcome, BulkPlan,
    SlotKey, SlotRef, SlotStatus, SlotStatusMap, ToggleAction, ToggleError,
};
