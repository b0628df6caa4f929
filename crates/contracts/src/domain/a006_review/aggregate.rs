use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::query::Record;

pub const MAX_COMMENT_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub facility_id: Option<Uuid>,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl ReviewResponse {
    pub fn author(&self) -> &str {
        self.user_name.as_deref().unwrap_or("Anonymous")
    }

    pub fn stars(&self) -> String {
        let filled = usize::from(self.rating.min(5));
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

impl Record for ReviewResponse {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

/// Body of `POST /facilities/{id}/reviews`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub facility_id: Uuid,
    pub rating: u8,
    pub comment: String,
}

impl ReviewRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=5).contains(&self.rating) {
            return Err("Rating must be between 1 and 5".into());
        }
        if self.comment.chars().count() > MAX_COMMENT_LEN {
            return Err(format!("Comment must be at most {MAX_COMMENT_LEN} characters"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
    /// Index 0 holds one-star reviews.
    pub histogram: [usize; 5],
}

pub fn rating_summary(reviews: &[ReviewResponse]) -> RatingSummary {
    let mut summary = RatingSummary::default();
    let mut sum = 0u32;
    for r in reviews.iter().filter(|r| (1..=5).contains(&r.rating)) {
        summary.histogram[usize::from(r.rating - 1)] += 1;
        summary.count += 1;
        sum += u32::from(r.rating);
    }
    if summary.count > 0 {
        summary.average = f64::from(sum) / summary.count as f64;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> ReviewResponse {
        ReviewResponse {
            id: Uuid::new_v4(),
            user_id: None,
            facility_id: None,
            rating,
            comment: None,
            user_name: None,
            created_at: None,
        }
    }

    #[test]
    fn test_review_validation() {
        let mut req = ReviewRequest {
            facility_id: Uuid::nil(),
            rating: 0,
            comment: String::new(),
        };
        assert!(req.validate().is_err());
        req.rating = 5;
        assert!(req.validate().is_ok());
        req.comment = "x".repeat(MAX_COMMENT_LEN + 1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rating_summary() {
        let s = rating_summary(&[review(5), review(4), review(3), review(0)]);
        assert_eq!(s.count, 3);
        assert_eq!(s.average, 4.0);
        assert_eq!(s.histogram, [0, 0, 1, 1, 1]);
        assert_eq!(review(3).stars(), "★★★☆☆");
        assert_eq!(review(3).author(), "Anonymous");
    }
}
