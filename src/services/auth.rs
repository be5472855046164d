//! Sign-in and registration against the backend, and per-viewer state cleanup.

use crate::backend::AuthApi;
use crate::backend::errors::BackendError;
use crate::domain::auth::{Credentials, LoginResponse, Registration};
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::services::{ListViews, ServiceError, ServiceResult};

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

pub async fn login<R>(backend: &R, form: LoginForm) -> ServiceResult<LoginResponse>
where
    R: AuthApi + ?Sized,
{
    let credentials = Credentials::try_from(form)?;
    match backend.login(&credentials).await {
        Ok(response) if response.token.is_empty() => {
            log::error!("Backend accepted login for {} without a token", credentials.email);
            Err(ServiceError::Backend(BackendError::Decode(
                "empty token".to_string(),
            )))
        }
        Ok(response) => {
            log::info!("User {} signed in", credentials.email);
            Ok(response)
        }
        Err(BackendError::Unauthorized) => Err(ServiceError::Form(INVALID_CREDENTIALS.to_string())),
        Err(BackendError::Api { status: 400, message }) => Err(ServiceError::Form(message)),
        Err(err) => Err(err.into()),
    }
}

/// Creates an account; the answer signs the new user in like a login does.
pub async fn register<R>(backend: &R, form: RegisterForm) -> ServiceResult<LoginResponse>
where
    R: AuthApi + ?Sized,
{
    let registration = Registration::try_from(form)?;
    match backend.register(&registration).await {
        Ok(response) if response.token.is_empty() => {
            log::error!("Backend registered {} without a token", registration.email);
            Err(ServiceError::Backend(BackendError::Decode(
                "empty token".to_string(),
            )))
        }
        Ok(response) => {
            log::info!("User {} registered", registration.email);
            Ok(response)
        }
        // Validation failures and an already registered email.
        Err(BackendError::Api {
            status: 400 | 409,
            message,
        }) => Err(ServiceError::Form(message)),
        Err(err) => Err(err.into()),
    }
}

/// Drops every list state kept for the viewer.
pub fn logout(views: &ListViews, view_key: &str) {
    views.discard(view_key);
}
