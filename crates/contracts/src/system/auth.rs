use serde::{Deserialize, Serialize};

/// Roles known to the server. `ROLE_`-prefixed spellings are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    #[serde(alias = "ROLE_USER", alias = "user")]
    User,
    #[serde(alias = "ROLE_OWNER", alias = "owner")]
    Owner,
    #[serde(alias = "ROLE_ADMIN", alias = "admin")]
    Admin,
    #[serde(alias = "ROLE_GUEST", alias = "guest")]
    Guest,
}

impl UserRole {
    pub fn code(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Owner => "OWNER",
            UserRole::Admin => "ADMIN",
            UserRole::Guest => "GUEST",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::User => "Sports Enthusiast",
            UserRole::Owner => "Facility Owner",
            UserRole::Admin => "Administrator",
            UserRole::Guest => "Guest",
        }
    }

    /// Roles a visitor may pick on the sign-up form.
    pub fn signup_choices() -> Vec<UserRole> {
        vec![UserRole::User, UserRole::Owner]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_uppercase();
        let code = code.strip_prefix("ROLE_").unwrap_or(&code);
        match code {
            "USER" => Some(UserRole::User),
            "OWNER" => Some(UserRole::Owner),
            "ADMIN" => Some(UserRole::Admin),
            "GUEST" => Some(UserRole::Guest),
            _ => None,
        }
    }

    /// Admins may enter every area.
    pub fn satisfies(&self, required: UserRole) -> bool {
        *self == required || *self == UserRole::Admin
    }
}

/// `POST /api/auth/login`. `identifier` is an email or mobile number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub jwt_token: String,
}

/// `POST /api/auth/s/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), String> {
        let name_len = self.name.trim().chars().count();
        if !(2..=50).contains(&name_len) {
            return Err("Name must be between 2 and 50 characters".into());
        }
        if !looks_like_email(&self.email) {
            return Err("Enter a valid email address".into());
        }
        if self.password.chars().count() < 6 {
            return Err("Password must be at least 6 characters".into());
        }
        Ok(())
    }
}

pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    }
}

/// `GET /api/auth/current`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

impl CurrentUser {
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            full
        } else {
            self.email
                .clone()
                .or_else(|| self.mobile_number.clone())
                .unwrap_or_else(|| "User".to_string())
        }
    }

    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

/// Form body of `POST /api/auth/email/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailOtpForm {
    pub email: String,
}

/// `POST /api/auth/verify-otp`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl VerifyOtpResponse {
    pub fn message_or_default(&self) -> String {
        self.message.clone().unwrap_or_else(|| {
            if self.success {
                "OTP verified successfully".to_string()
            } else {
                "Invalid OTP".to_string()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_spellings() {
        let r: UserRole = serde_json::from_str("\"ROLE_OWNER\"").unwrap();
        assert_eq!(r, UserRole::Owner);
        let r: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(r, UserRole::Admin);
        assert_eq!(UserRole::from_code("role_user"), Some(UserRole::User));
        assert_eq!(serde_json::to_string(&UserRole::Owner).unwrap(), "\"OWNER\"");
    }

    #[test]
    fn test_admin_satisfies_every_role() {
        assert!(UserRole::Admin.satisfies(UserRole::Owner));
        assert!(!UserRole::User.satisfies(UserRole::Owner));
        assert!(UserRole::Owner.satisfies(UserRole::Owner));
    }

    #[test]
    fn test_login_response_wire_name() {
        let r: LoginResponse = serde_json::from_str(r#"{"jwtToken":"abc","type":"Bearer"}"#).unwrap();
        assert_eq!(r.jwt_token, "abc");
    }

    #[test]
    fn test_current_user_display_name() {
        let u: CurrentUser = serde_json::from_str(
            r#"{"email":"a@b.in","firstName":"Asha","lastName":"Rao","role":"USER"}"#,
        )
        .unwrap();
        assert_eq!(u.display_name(), "Asha Rao");
        assert_eq!(u.initials(), "AR");
        let anon = CurrentUser {
            email: Some("x@y.in".into()),
            ..Default::default()
        };
        assert_eq!(anon.display_name(), "x@y.in");
    }

    #[test]
    fn test_signup_validation() {
        let mut req = SignupRequest {
            name: "Asha".into(),
            email: "asha@example.in".into(),
            password: "secret1".into(),
            role: UserRole::Owner,
        };
        assert!(req.validate().is_ok());
        req.email = "asha@".into();
        assert!(req.validate().is_err());
    }
}
