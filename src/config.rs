use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::app::{DEFAULT_DOWNLOAD_DIR, ScraperOptions};
use crate::domain::PatentId;
use crate::error::ScraperError;
use crate::fetch::TransportConfig;
use crate::layout::PageLayout;
use crate::record::ExtractOptions;

pub const CONFIG_FILE: &str = "patent-scraper.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub patents: Vec<String>,
    #[serde(default)]
    pub include: ExtractOptions,
    #[serde(default)]
    pub auto_download_pdf: bool,
    #[serde(default)]
    pub download_dir: Option<Utf8PathBuf>,
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub pdf_transport: Option<TransportOverrides>,
    #[serde(default)]
    pub layout: PageLayout,
}

// Unset fields inherit from `transport`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportOverrides {
    pub proxy: Option<String>,
    pub accept_invalid_certs: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl TransportOverrides {
    pub fn apply(&self, base: &TransportConfig) -> TransportConfig {
        TransportConfig {
            proxy: self.proxy.clone().or_else(|| base.proxy.clone()),
            accept_invalid_certs: self
                .accept_invalid_certs
                .unwrap_or(base.accept_invalid_certs),
            timeout_secs: self.timeout_secs.or(base.timeout_secs),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub patents: Vec<PatentId>,
    pub options: ScraperOptions,
    pub transport: TransportConfig,
    pub pdf_transport: TransportConfig,
    pub layout: PageLayout,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>, required: bool) -> Result<ResolvedConfig, ScraperError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            if required {
                return Err(ScraperError::MissingConfig);
            }
            return Self::resolve_config(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| ScraperError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| ScraperError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, ScraperError> {
        let schema_version = config.schema_version.unwrap_or(1);

        let patents = config
            .patents
            .iter()
            .map(|value| value.parse())
            .collect::<Result<Vec<PatentId>, ScraperError>>()?;

        let pdf_transport = config
            .pdf_transport
            .unwrap_or_default()
            .apply(&config.transport);

        Ok(ResolvedConfig {
            schema_version,
            patents,
            options: ScraperOptions {
                extract: config.include,
                auto_download_pdf: config.auto_download_pdf,
                download_dir: config
                    .download_dir
                    .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DOWNLOAD_DIR)),
            },
            transport: config.transport,
            pdf_transport,
            layout: config.layout,
        })
    }
}
