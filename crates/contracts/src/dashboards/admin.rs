use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminDashboardResponse {
    pub total_users: u64,
    pub total_owners: u64,
    pub total_bookings: u64,
    pub active_courts: u64,
    pub pending_approvals: u64,
    pub top_sports: Vec<SportStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SportStats {
    pub sport: String,
    pub count: u64,
}

impl AdminDashboardResponse {
    /// Share of each sport in `top_sports`, in percent.
    pub fn sport_shares(&self) -> Vec<(String, f64)> {
        let total: u64 = self.top_sports.iter().map(|s| s.count).sum();
        self.top_sports
            .iter()
            .map(|s| {
                let share = if total == 0 {
                    0.0
                } else {
                    s.count as f64 * 100.0 / total as f64
                };
                (s.sport.clone(), share)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sport_shares() {
        let d: AdminDashboardResponse = serde_json::from_str(
            r#"{"totalUsers": 10, "topSports": [{"sport": "TENNIS", "count": 3}, {"sport": "BADMINTON", "count": 1}]}"#,
        )
        .unwrap();
        assert_eq!(d.total_users, 10);
        assert_eq!(d.pending_approvals, 0);
        assert_eq!(d.sport_shares()[0].1, 75.0);
    }
}
