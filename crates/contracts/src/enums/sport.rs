use serde::{Deserialize, Serialize};

/// Sports a court can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sport {
    Football,
    Basketball,
    Tennis,
    Badminton,
    Volleyball,
    Cricket,
    Swimming,
}

impl Sport {
    /// Wire code, as sent by the server.
    pub fn code(&self) -> &'static str {
        match self {
            Sport::Football => "FOOTBALL",
            Sport::Basketball => "BASKETBALL",
            Sport::Tennis => "TENNIS",
            Sport::Badminton => "BADMINTON",
            Sport::Volleyball => "VOLLEYBALL",
            Sport::Cricket => "CRICKET",
            Sport::Swimming => "SWIMMING",
        }
    }

    /// Filter id used by the venue search sidebar.
    pub fn filter_id(&self) -> &'static str {
        match self {
            Sport::Football => "football",
            Sport::Basketball => "basketball",
            Sport::Tennis => "tennis",
            Sport::Badminton => "badminton",
            Sport::Volleyball => "volleyball",
            Sport::Cricket => "cricket",
            Sport::Swimming => "swimming",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Sport::Football => "Football",
            Sport::Basketball => "Basketball",
            Sport::Tennis => "Tennis",
            Sport::Badminton => "Badminton",
            Sport::Volleyball => "Volleyball",
            Sport::Cricket => "Cricket",
            Sport::Swimming => "Swimming",
        }
    }

    pub fn all() -> Vec<Sport> {
        vec![
            Sport::Football,
            Sport::Basketball,
            Sport::Tennis,
            Sport::Badminton,
            Sport::Volleyball,
            Sport::Cricket,
            Sport::Swimming,
        ]
    }

    /// Accepts both the wire code and the filter id, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Sport::all()
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(code) || s.filter_id().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_accepts_both_spellings() {
        assert_eq!(Sport::from_code("BADMINTON"), Some(Sport::Badminton));
        assert_eq!(Sport::from_code("badminton"), Some(Sport::Badminton));
        assert_eq!(Sport::from_code(" Tennis "), Some(Sport::Tennis));
        assert_eq!(Sport::from_code("curling"), None);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Sport::Volleyball).unwrap();
        assert_eq!(json, "\"VOLLEYBALL\"");
    }
}
