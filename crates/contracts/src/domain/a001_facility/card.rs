use uuid::Uuid;

use super::aggregate::FacilityResponse;

pub const PLACEHOLDER_PHOTO: &str = "/assets/images/no_image.png";

/// What a venue card renders; built from a `FacilityResponse` without
/// touching it.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueCard {
    pub id: Uuid,
    pub name: String,
    pub photo_url: String,
    pub sports: String,
    pub address: String,
    pub rating: f64,
    pub review_count: u32,
    pub starting_price: Option<f64>,
    pub amenities: Vec<String>,
}

impl VenueCard {
    pub fn from_facility(f: &FacilityResponse) -> Self {
        Self {
            id: f.id,
            name: f.name.clone(),
            photo_url: normalize_photo_url(f.photos.first().map(String::as_str)),
            sports: f.sports_label(),
            address: f.address.clone().unwrap_or_default(),
            rating: f.average_rating.unwrap_or(0.0),
            review_count: f.total_reviews.unwrap_or(0),
            starting_price: f.starting_price,
            amenities: f.amenities.iter().take(4).cloned().collect(),
        }
    }

    pub fn rating_label(&self) -> String {
        if self.review_count == 0 {
            "New".to_string()
        } else {
            format!("{:.1} ({})", self.rating, self.review_count)
        }
    }

    pub fn price_label(&self) -> String {
        match self.starting_price {
            Some(p) => format!("from ₹{p:.0}/hr"),
            None => "Price on request".to_string(),
        }
    }
}

/// Absolute URLs pass through, protocol-relative ones get `https:`, bare
/// paths get a leading slash, blanks get the placeholder.
pub fn normalize_photo_url(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        PLACEHOLDER_PHOTO.to_string()
    } else if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with("data:") {
        raw.to_string()
    } else if let Some(rest) = raw.strip_prefix("//") {
        format!("https://{rest}")
    } else if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_photo_url() {
        assert_eq!(normalize_photo_url(None), PLACEHOLDER_PHOTO);
        assert_eq!(normalize_photo_url(Some("  ")), PLACEHOLDER_PHOTO);
        assert_eq!(
            normalize_photo_url(Some("https://cdn.example.com/a.jpg")),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            normalize_photo_url(Some("//cdn.example.com/a.jpg")),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(normalize_photo_url(Some("uploads/a.jpg")), "/uploads/a.jpg");
    }
}
