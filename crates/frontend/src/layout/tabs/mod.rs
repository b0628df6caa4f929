//! Tab management
//!
//! - `page` wraps one tab's content and hides it when inactive
//! - `registry` maps tab keys to views
//! - `tab_labels` holds every tab title

pub mod page;
pub mod registry;
pub mod tab_labels;

pub use page::TabPage;
pub use tab_labels::{detail_tab_label, facility_detail_key, tab_label_for_key};
