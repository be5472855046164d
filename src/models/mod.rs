//! Session and configuration models shared by handlers.

pub mod config;
pub mod session;
