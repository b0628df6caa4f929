//! Tab titles, one place for every tab key.

/// Prefix of facility detail tabs; the facility id follows.
pub const FACILITY_DETAIL_PREFIX: &str = "a001_facility_detail_";

pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_facility" => "Find Venues",
        "a001_facility_owner" => "My Facilities",
        "a003_slot_grid" => "Court Availability",
        "a004_booking" => "My Bookings",
        "a005_pricing_rule" => "Pricing Rules",
        "d400_owner_summary" => "Owner Dashboard",
        "sys_admin_dashboard" => "Admin Dashboard",
        "sys_facility_requests" => "Facility Approvals",
        "sys_users" => "Users",
        k if k.starts_with(FACILITY_DETAIL_PREFIX) => "Venue",
        _ => "Untitled",
    }
}

pub fn facility_detail_key(id: &uuid::Uuid) -> String {
    format!("{FACILITY_DETAIL_PREFIX}{id}")
}

/// Title of a detail tab, e.g. `Venue: Elite Tennis`.
pub fn detail_tab_label(kind: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        kind.to_string()
    } else {
        format!("{kind}: {name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("a004_booking"), "My Bookings");
        let key = facility_detail_key(&uuid::Uuid::nil());
        assert_eq!(tab_label_for_key(&key), "Venue");
        assert_eq!(tab_label_for_key("nope"), "Untitled");
    }

    #[test]
    fn test_detail_label() {
        assert_eq!(detail_tab_label("Venue", "Elite Tennis"), "Venue: Elite Tennis");
        assert_eq!(detail_tab_label("Venue", "  "), "Venue");
    }
}
