#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::middleware::{Compress, Logger};
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::backend::http::HttpBackend;
#[cfg(feature = "server")]
use crate::middleware::RedirectUnauthorized;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::services::ListViews;

pub mod backend;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod markup;
#[cfg(feature = "server")]
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod query;
#[cfg(feature = "server")]
pub mod routes;
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    use crate::routes::{
        analytics, assistant, auth, cases, documents, lawyers, legal_templates, notifications,
        profile, scraper, translation,
    };

    let backend = HttpBackend::new(&server_config.backend_url, server_config.request_timeout())
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;
    let backend = web::Data::new(backend);
    log::info!("Using backend at {}", server_config.backend_url);

    // One registry per list view, shared by every worker.
    let views = web::Data::new(ListViews::new(server_config.view_idle_ttl()));

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(server_config.domain.clone()))
                    .build(),
            )
            .wrap(Compress::default())
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(auth::show_login)
            .service(auth::submit_login)
            .service(auth::submit_logout)
            .service(auth::show_register)
            .service(auth::submit_register)
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(analytics::show_dashboard)
                    .service(analytics::show_analytics)
                    .service(cases::show_cases)
                    .service(cases::show_case_detail)
                    .service(cases::show_search)
                    .service(lawyers::show_lawyers)
                    .service(lawyers::show_lawyer_detail)
                    .service(lawyers::submit_review)
                    .service(documents::show_documents)
                    .service(documents::upload)
                    .service(documents::show_document_detail)
                    .service(documents::process)
                    .service(documents::delete)
                    .service(documents::download)
                    .service(legal_templates::show_templates)
                    .service(legal_templates::show_template_detail)
                    .service(legal_templates::generate)
                    .service(scraper::show_scraper)
                    .service(scraper::start_run)
                    .service(assistant::show_assistant)
                    .service(assistant::submit_message)
                    .service(assistant::remove_session)
                    .service(translation::show_translation)
                    .service(translation::submit_translation)
                    .service(notifications::show_notifications)
                    .service(notifications::add_reminder)
                    .service(notifications::read_all)
                    .service(notifications::read)
                    .service(notifications::delete)
                    .service(profile::show_profile)
                    .service(profile::save_profile),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(backend.clone())
            .app_data(views.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
