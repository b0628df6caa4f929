use contracts::system::auth::{
    CurrentUser, EmailOtpForm, LoginRequest, LoginResponse, SignupRequest, VerifyOtpRequest,
    VerifyOtpResponse,
};

use crate::shared::api_utils::{ApiClient, ApiError};

pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    api.post("/api/auth/login", request).await
}

pub async fn register(api: &ApiClient, request: &SignupRequest) -> Result<(), ApiError> {
    api.post_ok("/api/auth/s/register", request).await
}

/// Profile behind `token`; used both after sign-in and to validate a stored token.
pub async fn current_user(api: &ApiClient, token: &str) -> Result<CurrentUser, ApiError> {
    api.get_with_token("/api/auth/current", token).await
}

/// Sent form-encoded, not as JSON.
pub async fn send_email_otp(api: &ApiClient, email: &str) -> Result<(), ApiError> {
    let form = EmailOtpForm {
        email: email.trim().to_string(),
    };
    api.post_form_ok("/api/auth/email/send", &form).await
}

pub async fn verify_otp(
    api: &ApiClient,
    request: &VerifyOtpRequest,
) -> Result<VerifyOtpResponse, ApiError> {
    api.post("/api/auth/verify-otp", request).await
}
