use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

pub const PATENT_URL_TEMPLATE: &str = "https://patents.google.com/patent/{id}";

static PATENT_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/patent/([^/?#\s]+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PatentId(String);

impl PatentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn page_url(&self) -> String {
        PATENT_URL_TEMPLATE.replace("{id}", &self.0)
    }
}

impl fmt::Display for PatentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatentId {
    type Err = ScraperError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        let is_valid = !normalized.is_empty()
            && !normalized
                .chars()
                .any(|ch| ch.is_whitespace() || ch == '/' || ch.is_control());
        if !is_valid {
            return Err(ScraperError::InvalidIdentifier(value.to_string()));
        }
        Ok(Self(normalized.to_string()))
    }
}

impl TryFrom<String> for PatentId {
    type Error = ScraperError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PatentId> for String {
    fn from(value: PatentId) -> Self {
        value.0
    }
}

pub fn identifier_from_url(url: &str) -> Option<String> {
    PATENT_PATH
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupTarget {
    Id(PatentId),
    Url(String),
}

impl LookupTarget {
    pub fn url(&self) -> String {
        match self {
            LookupTarget::Id(id) => id.page_url(),
            LookupTarget::Url(url) => url.clone(),
        }
    }

    pub fn identifier(&self) -> String {
        match self {
            LookupTarget::Id(id) => id.as_str().to_string(),
            LookupTarget::Url(url) => identifier_from_url(url).unwrap_or_else(|| url.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FailureCode {
    Status(u16),
    Message(String),
}

impl fmt::Display for FailureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureCode::Status(code) => write!(f, "HTTP Error {code}"),
            FailureCode::Message(message) => write!(f, "Error: {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeStatus {
    Success,
    Failed(FailureCode),
}

impl ScrapeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ScrapeStatus::Success)
    }
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeStatus::Success => write!(f, "Success"),
            ScrapeStatus::Failed(code) => write!(f, "{code}"),
        }
    }
}
