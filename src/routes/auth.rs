use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::backend::http::HttpBackend;
use crate::domain::auth::LoginResponse;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::session::SessionContext;
use crate::routes::{base_context, redirect, render_template};
use crate::services::auth::{login, logout, register};
use crate::services::{ListViews, ServiceError};

#[get("/login")]
pub async fn show_login(
    context: SessionContext,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if context.is_authenticated() {
        return redirect("/");
    }
    let page = base_context(&flash_messages, &context, "login");
    render_template(&tera, "auth/login.html", &page)
}

#[post("/login")]
pub async fn submit_login(
    req: HttpRequest,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    let response = match login(backend.get_ref(), form).await {
        Ok(response) => response,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return redirect("/login");
        }
        Err(err) => {
            log::error!("Login failed: {err}");
            FlashMessage::error("Sign-in is unavailable right now. Please try again.").send();
            return redirect("/login");
        }
    };

    match sign_in(&req, &context, &session, &views, &response) {
        Ok(()) => {
            FlashMessage::success(format!("Welcome back, {}.", response.user.display_name())).send();
            redirect("/")
        }
        Err(response) => response,
    }
}

/// Stores the token in the session and attaches the identity.
fn sign_in(
    req: &HttpRequest,
    context: &SessionContext,
    session: &Session,
    views: &ListViews,
    response: &LoginResponse,
) -> Result<(), HttpResponse> {
    // Views of the anonymous visitor are not carried into the signed-in session.
    logout(views, &context.view_key);
    if let Err(err) = SessionContext::store_login(session, response) {
        log::error!("Failed to store login in session: {err}");
        return Err(HttpResponse::InternalServerError().finish());
    }
    let identity = response
        .user
        .id
        .clone()
        .or_else(|| response.user.email.clone())
        .unwrap_or_else(|| context.view_key.clone());
    if let Err(err) = Identity::login(&req.extensions(), identity) {
        log::error!("Failed to attach identity: {err}");
        return Err(HttpResponse::InternalServerError().finish());
    }
    Ok(())
}

#[get("/register")]
pub async fn show_register(
    context: SessionContext,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if context.is_authenticated() {
        return redirect("/");
    }
    let page = base_context(&flash_messages, &context, "register");
    render_template(&tera, "auth/register.html", &page)
}

#[post("/register")]
pub async fn submit_register(
    req: HttpRequest,
    context: SessionContext,
    session: Session,
    backend: web::Data<HttpBackend>,
    views: web::Data<ListViews>,
    web::Form(form): web::Form<RegisterForm>,
) -> impl Responder {
    let response = match register(backend.get_ref(), form).await {
        Ok(response) => response,
        Err(ServiceError::Form(message)) | Err(ServiceError::TypeConstraint(message)) => {
            FlashMessage::error(message).send();
            return redirect("/register");
        }
        Err(err) => {
            log::error!("Registration failed: {err}");
            FlashMessage::error("Registration is unavailable right now. Please try again.").send();
            return redirect("/register");
        }
    };

    match sign_in(&req, &context, &session, &views, &response) {
        Ok(()) => {
            FlashMessage::success(format!("Welcome, {}.", response.user.display_name())).send();
            redirect("/")
        }
        Err(response) => response,
    }
}

#[post("/logout")]
pub async fn submit_logout(
    user: Option<Identity>,
    context: SessionContext,
    session: Session,
    views: web::Data<ListViews>,
) -> impl Responder {
    logout(&views, &context.view_key);
    match user {
        Some(user) => user.logout(),
        None => session.purge(),
    }
    FlashMessage::info("You have been signed out.").send();
    redirect("/login")
}
