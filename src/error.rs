use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ScraperError {
    #[error("invalid patent identifier: {0:?}")]
    #[diagnostic(help("identifiers are publication numbers such as US2668287A"))]
    InvalidIdentifier(String),

    #[error("no patents to scrape: register at least one identifier first")]
    #[diagnostic(help("pass identifiers on the command line or list them under `patents` in the config"))]
    NoIdentifiers,

    #[error("missing config file patent-scraper.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid selector for layout field `{field}`: {message}")]
    InvalidSelector { field: String, message: String },

    #[error("invalid proxy endpoint {endpoint}: {message}")]
    InvalidProxy { endpoint: String, message: String },

    #[error("HTTP client setup failed: {0}")]
    Http(String),
}
