use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::Sport;
use crate::shared::query::{Record, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl FacilityStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            FacilityStatus::Pending => "Pending",
            FacilityStatus::Approved => "Approved",
            FacilityStatus::Rejected => "Rejected",
        }
    }
}

/// A venue as returned by `/venues`, `/facilities/{id}` and the owner and
/// admin listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub sports: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub status: FacilityStatus,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u32>,
    #[serde(default)]
    pub photos: Vec<String>,
    /// Lowest court rate, when the listing endpoint provides it.
    #[serde(default)]
    pub starting_price: Option<f64>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl FacilityResponse {
    pub fn sports_label(&self) -> String {
        self.sports
            .iter()
            .map(|code| {
                Sport::from_code(code)
                    .map(|s| s.display_name().to_string())
                    .unwrap_or_else(|| code.clone())
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Record for FacilityResponse {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Searchable for FacilityResponse {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(2 + self.sports.len());
        fields.push(self.name.as_str());
        if let Some(description) = self.description.as_deref() {
            fields.push(description);
        }
        fields.extend(self.sports.iter().map(String::as_str));
        fields
    }
}

/// Body of `POST /owner/facilities` and `PUT /owner/facilities/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRequest {
    pub name: String,
    pub description: String,
    pub address: String,
    pub sports: Vec<Sport>,
    pub amenities: Vec<String>,
    pub active: bool,
}

impl FacilityRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Facility name is required".into());
        }
        if self.address.trim().is_empty() {
            return Err("Address is required".into());
        }
        if self.sports.is_empty() {
            return Err("Select at least one sport".into());
        }
        Ok(())
    }
}

/// Query string of `GET /venues`. Sports are sent comma separated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueQueryParams {
    pub page: u32,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sports: Option<String>,
}

impl VenueQueryParams {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        let name = name.trim();
        self.name = (!name.is_empty()).then(|| name.to_string());
        self
    }

    pub fn with_sports(mut self, sports: &[Sport]) -> Self {
        self.sports = (!sports.is_empty()).then(|| {
            sports
                .iter()
                .map(Sport::code)
                .collect::<Vec<_>>()
                .join(",")
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sparse_facility() {
        let json = r#"{
            "id": "6f1c1b3e-8e4a-4c1e-9a55-0d6c1f1b2a10",
            "name": "Elite Tennis Club",
            "sports": ["TENNIS"],
            "status": "APPROVED",
            "averageRating": 4.8,
            "createdAt": "2024-08-01T10:15:00"
        }"#;
        let f: FacilityResponse = serde_json::from_str(json).unwrap();
        assert_eq!(f.status, FacilityStatus::Approved);
        assert_eq!(f.average_rating, Some(4.8));
        assert!(f.photos.is_empty());
        assert_eq!(f.starting_price, None);
        assert!(f.created_at.is_some());
        assert_eq!(f.sports_label(), "Tennis");
    }

    #[test]
    fn test_search_fields_include_description_and_sports() {
        let f = FacilityResponse {
            id: Uuid::nil(),
            name: "Arena".into(),
            description: Some("Indoor courts".into()),
            address: None,
            sports: vec!["BASKETBALL".into()],
            amenities: vec![],
            status: FacilityStatus::Approved,
            average_rating: None,
            total_reviews: None,
            photos: vec![],
            starting_price: None,
            created_at: None,
        };
        assert_eq!(f.search_fields(), vec!["Arena", "Indoor courts", "BASKETBALL"]);
    }

    #[test]
    fn test_venue_query_params() {
        let p = VenueQueryParams::new(0, 12)
            .with_name("  ")
            .with_sports(&[Sport::Tennis, Sport::Badminton]);
        assert_eq!(p.name, None);
        assert_eq!(p.sports.as_deref(), Some("TENNIS,BADMINTON"));
    }

    #[test]
    fn test_facility_request_validation() {
        let mut req = FacilityRequest {
            name: "Riverside".into(),
            address: "12 River Rd".into(),
            ..Default::default()
        };
        assert!(req.validate().is_err());
        req.sports.push(Sport::Badminton);
        assert!(req.validate().is_ok());
    }
}
