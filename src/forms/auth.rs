use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::{Credentials, Registration};
use crate::domain::types::Email;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Sign-in form.
pub struct LoginForm {
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl TryFrom<LoginForm> for Credentials {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let email = Email::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        Ok(Credentials {
            email: email.into_inner(),
            password: form.password,
        })
    }
}

/// Shortest password the backend accepts on registration.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Default, Deserialize, Validate)]
/// Account registration form.
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 20))]
    pub phone_number: Option<String>,
    #[validate(length(max = 20))]
    pub cnic_number: Option<String>,
    #[validate(length(max = 200))]
    pub organization: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    #[validate(length(max = 100))]
    pub province: Option<String>,
    #[validate(length(max = 100))]
    pub country: Option<String>,
}

/// Trims an optional field and drops it when blank.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl TryFrom<RegisterForm> for Registration {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        let form = RegisterForm {
            first_name: form.first_name.trim().to_string(),
            ..form
        };
        form.validate()?;
        let email = Email::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        if form.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FormError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if form.password != form.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(Registration {
            email: email.into_inner(),
            password: form.password,
            first_name: form.first_name,
            last_name: optional(form.last_name),
            phone_number: optional(form.phone_number),
            cnic_number: optional(form.cnic_number),
            organization: optional(form.organization),
            city: optional(form.city),
            province: optional(form.province),
            country: optional(form.country),
        })
    }
}
