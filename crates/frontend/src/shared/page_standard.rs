//! Page category constants.
//!
//! Every page rendered inside a tab declares an HTML `id` in the format
//! `{entity}--{category}` (e.g. `"a001_facility--list"`) and a
//! `data-page-category` with one of the constants below.

/// Records with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// A single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Interactive planners such as the availability grid.
pub const PAGE_CAT_PLANNER: &str = "planner";

/// KPI overview.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Sign-in and administration pages.
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_PLANNER,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_SYSTEM,
];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

/// Root CSS classes for a page of the given category.
pub fn page_class(category: &str, extra: &str) -> String {
    let base = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_PLANNER => "page page--planner",
        PAGE_CAT_DASHBOARD => "page page--dashboard",
        _ => "page",
    };
    if extra.is_empty() {
        base.to_string()
    } else {
        format!("{base} {extra}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_facility--list"));
        assert!(is_valid_page_id("a003_slot--grid--owner"));
        assert!(!is_valid_page_id("a001_facility"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001--"));
    }

    #[test]
    fn test_page_class() {
        assert_eq!(page_class(PAGE_CAT_LIST, ""), "page");
        assert_eq!(page_class(PAGE_CAT_PLANNER, "slot-grid"), "page page--planner slot-grid");
    }

    #[test]
    fn test_known_categories() {
        assert!(is_known_category(PAGE_CAT_DASHBOARD));
        assert!(!is_known_category("legacy"));
    }
}
