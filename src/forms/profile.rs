use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::ProfileUpdate;
use crate::forms::FormError;

/// Values accepted for the optional gender field.
pub const GENDERS: &[&str] = &["male", "female", "other"];

#[derive(Debug, Default, Deserialize, Validate)]
/// Profile edit form. Blank fields clear the stored value, except the first name.
pub struct ProfileForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub phone_number: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub organization: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub country: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub province: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub city: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub address: String,
}

impl TryFrom<ProfileForm> for ProfileUpdate {
    type Error = FormError;

    fn try_from(form: ProfileForm) -> Result<Self, Self::Error> {
        let form = ProfileForm {
            first_name: form.first_name.trim().to_string(),
            ..form
        };
        form.validate()?;
        let gender = form.gender.trim().to_lowercase();
        if !gender.is_empty() && !GENDERS.contains(&gender.as_str()) {
            return Err(FormError::InvalidGender);
        }
        Ok(ProfileUpdate {
            first_name: form.first_name,
            last_name: form.last_name.trim().to_string(),
            gender,
            phone_number: form.phone_number.trim().to_string(),
            organization: form.organization.trim().to_string(),
            country: form.country.trim().to_string(),
            province: form.province.trim().to_string(),
            city: form.city.trim().to_string(),
            address: form.address.trim().to_string(),
        })
    }
}
