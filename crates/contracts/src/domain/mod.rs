pub mod a001_facility;
pub mod a002_court;
pub mod a003_slot;
pub mod a004_booking;
pub mod a005_pricing_rule;
pub mod a006_review;
