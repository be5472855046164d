//! DTO modules that bridge services with templates.

pub mod cards;
pub mod pages;
