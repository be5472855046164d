//! Viewing and editing the signed-in user's profile.

use crate::backend::ProfileApi;
use crate::backend::errors::BackendError;
use crate::domain::auth::{ProfileUpdate, UserProfile};
use crate::dto::cards::format_date;
use crate::dto::pages::ProfilePageData;
use crate::forms::profile::{GENDERS, ProfileForm};
use crate::models::session::SessionContext;
use crate::services::{ServiceError, ServiceResult};

pub async fn load_profile<R>(backend: &R, session: &SessionContext) -> ServiceResult<ProfilePageData>
where
    R: ProfileApi + ?Sized,
{
    let response = backend.get_profile(session).await?;
    // Accounts created outside the frontend may have no profile record yet.
    let profile = response.profile.unwrap_or_default();

    Ok(ProfilePageData {
        email: response.auth.email,
        role: response.auth.role,
        member_since: profile.created_at.as_deref().map(format_date),
        profile,
        genders: GENDERS,
    })
}

/// Saves the edited profile and returns the stored record.
pub async fn update_profile<R>(
    backend: &R,
    session: &SessionContext,
    form: ProfileForm,
) -> ServiceResult<UserProfile>
where
    R: ProfileApi + ?Sized,
{
    let update = ProfileUpdate::try_from(form)?;
    match backend.update_profile(session, &update).await {
        Ok(profile) => Ok(profile),
        Err(BackendError::NotFound) => Err(ServiceError::Form(
            "Your profile could not be found.".to_string(),
        )),
        Err(err) => Err(err.into()),
    }
}
