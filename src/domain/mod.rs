//! Records exchanged with the backend, deserialized from its JSON payloads.

pub mod analytics;
pub mod assistant;
pub mod auth;
pub mod case;
pub mod document;
pub mod lawyer;
pub mod legal_template;
pub mod notification;
pub mod scrape_job;
pub mod translation;
pub mod types;
