use serde::{Deserialize, Serialize};

/// Credentials posted to the backend login endpoint.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Profile of the signed-in user as returned by login, registration and `/auth/me`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserProfile {
    pub id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub cnic_number: Option<String>,
    pub organization: Option<String>,
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub subscription: Option<String>,
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Name shown in the navigation bar; falls back to the email.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            self.email.clone().unwrap_or_default()
        } else {
            full
        }
    }
}

/// Successful login answer.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: UserProfile,
}

/// Account created by `POST /auth/register`. Absent optional fields are not sent.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnic_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Editable profile fields sent to `PUT /auth/me`.
///
/// Every field is sent; an empty string clears the stored value.
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub phone_number: String,
    pub organization: String,
    pub country: String,
    pub province: String,
    pub city: String,
    pub address: String,
}

/// Login identity of the account.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccountInfo {
    pub email: String,
    pub role: Option<String>,
}

/// Body of `GET /auth/me`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileResponse {
    pub auth: AccountInfo,
    pub profile: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_full_name() {
        let profile = UserProfile {
            email: Some("a@b.pk".into()),
            first_name: Some("Ayesha".into()),
            last_name: Some(" ".into()),
            ..UserProfile::default()
        };
        assert_eq!(profile.display_name(), "Ayesha");

        let anonymous = UserProfile {
            email: Some("a@b.pk".into()),
            ..UserProfile::default()
        };
        assert_eq!(anonymous.display_name(), "a@b.pk");
    }

    #[test]
    fn registration_omits_blank_optionals() {
        let registration = Registration {
            email: "a@b.pk".into(),
            password: "secret1".into(),
            first_name: "Ayesha".into(),
            city: Some("Lahore".into()),
            ..Registration::default()
        };
        let json = serde_json::to_value(&registration).unwrap();
        assert_eq!(json["city"], "Lahore");
        assert!(json.get("cnic_number").is_none());
    }

    #[test]
    fn profile_response_tolerates_missing_profile() {
        let response: ProfileResponse =
            serde_json::from_str(r#"{"auth": {"email": "a@b.pk", "role": "user"}, "profile": null}"#).unwrap();
        assert_eq!(response.auth.email, "a@b.pk");
        assert!(response.profile.is_none());
    }
}
