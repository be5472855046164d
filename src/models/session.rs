//! Per-browser session data carried into every backend call.

#[cfg(feature = "server")]
use std::future::{Ready, ready};

#[cfg(feature = "server")]
use actix_session::{Session, SessionExt};
#[cfg(feature = "server")]
use actix_web::{FromRequest, HttpRequest, dev::Payload, error};

#[cfg(feature = "server")]
use crate::domain::auth::LoginResponse;

pub const TOKEN_KEY: &str = "token";
pub const USER_NAME_KEY: &str = "user_name";
pub const VIEW_KEY: &str = "view_key";

/// Bearer token, display name and view key of the current browser session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext {
    pub token: Option<String>,
    pub user_name: Option<String>,
    /// Random key identifying this browser's list views.
    pub view_key: String,
}

impl SessionContext {
    pub fn anonymous<S: Into<String>>(view_key: S) -> Self {
        Self {
            token: None,
            user_name: None,
            view_key: view_key.into(),
        }
    }

    pub fn signed_in<S: Into<String>>(view_key: S, token: S, user_name: S) -> Self {
        Self {
            token: Some(token.into()),
            user_name: Some(user_name.into()),
            view_key: view_key.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}

#[cfg(feature = "server")]
impl SessionContext {
    /// Reads the context from the cookie session, assigning a view key on first use.
    pub fn from_session(session: &Session) -> Result<Self, actix_web::Error> {
        let token = session
            .get::<String>(TOKEN_KEY)
            .map_err(error::ErrorInternalServerError)?;
        let user_name = session
            .get::<String>(USER_NAME_KEY)
            .map_err(error::ErrorInternalServerError)?;

        let view_key = match session
            .get::<String>(VIEW_KEY)
            .map_err(error::ErrorInternalServerError)?
        {
            Some(key) => key,
            None => {
                let key = uuid::Uuid::new_v4().simple().to_string();
                session
                    .insert(VIEW_KEY, &key)
                    .map_err(error::ErrorInternalServerError)?;
                key
            }
        };

        Ok(Self {
            token,
            user_name,
            view_key,
        })
    }

    /// Stores the token and display name returned by a successful login.
    pub fn store_login(session: &Session, login: &LoginResponse) -> Result<(), actix_web::Error> {
        session
            .insert(TOKEN_KEY, &login.token)
            .map_err(error::ErrorInternalServerError)?;
        session
            .insert(USER_NAME_KEY, login.user.display_name())
            .map_err(error::ErrorInternalServerError)?;
        session.renew();
        Ok(())
    }

    /// Replaces the display name after the profile was edited.
    pub fn store_user_name(session: &Session, name: &str) -> Result<(), actix_web::Error> {
        session
            .insert(USER_NAME_KEY, name)
            .map_err(error::ErrorInternalServerError)
    }
}

#[cfg(feature = "server")]
impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_session(&req.get_session()))
    }
}

/// Session that must carry a bearer token; extraction fails with 401 otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedSession(pub SessionContext);

#[cfg(feature = "server")]
impl FromRequest for AuthenticatedSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = SessionContext::from_session(&req.get_session()).and_then(|context| {
            if context.is_authenticated() {
                Ok(AuthenticatedSession(context))
            } else {
                Err(error::ErrorUnauthorized("sign in required"))
            }
        });
        ready(result)
    }
}

impl std::ops::Deref for AuthenticatedSession {
    type Target = SessionContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
