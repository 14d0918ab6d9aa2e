pub mod app;
pub mod citation;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod layout;
pub mod output;
pub mod pdf;
pub mod record;
