use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use scraper::Html;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{LookupTarget, PatentId, ScrapeStatus};
use crate::error::ScraperError;
use crate::extract::extract;
use crate::fetch::Fetcher;
use crate::layout::{PageLayout, Selectors};
use crate::pdf::{self, PdfOutcome};
use crate::record::{ExtractOptions, PatentRecord};

pub const DEFAULT_DOWNLOAD_DIR: &str = "./pdfs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperOptions {
    pub extract: ExtractOptions,
    pub auto_download_pdf: bool,
    pub download_dir: Utf8PathBuf,
}

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            extract: ExtractOptions::default(),
            auto_download_pdf: false,
            download_dir: Utf8PathBuf::from(DEFAULT_DOWNLOAD_DIR),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: String,
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Lookup {
    pub identifier: String,
    pub url: String,
    pub status: ScrapeStatus,
    pub record: PatentRecord,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

pub struct App<P: Fetcher, D: Fetcher> {
    pages: P,
    documents: D,
    selectors: Selectors,
    options: ScraperOptions,
    requests: Vec<PatentId>,
    statuses: BTreeMap<String, ScrapeStatus>,
    records: BTreeMap<String, PatentRecord>,
}

impl<P: Fetcher, D: Fetcher> App<P, D> {
    pub fn new(pages: P, documents: D, options: ScraperOptions) -> Result<Self, ScraperError> {
        Self::with_layout(pages, documents, options, &PageLayout::default())
    }

    pub fn with_layout(
        pages: P,
        documents: D,
        options: ScraperOptions,
        layout: &PageLayout,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            pages,
            documents,
            selectors: Selectors::compile(layout)?,
            options,
            requests: Vec::new(),
            statuses: BTreeMap::new(),
            records: BTreeMap::new(),
        })
    }

    pub fn options(&self) -> &ScraperOptions {
        &self.options
    }

    pub fn register(&mut self, identifier: &str) -> Result<(), ScraperError> {
        let id = identifier.parse::<PatentId>()?;
        self.requests.push(id);
        Ok(())
    }

    pub fn register_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = PatentId>,
    {
        self.requests.extend(ids);
    }

    pub fn unregister(&mut self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        match self
            .requests
            .iter()
            .position(|id| id.as_str() == identifier)
        {
            Some(index) => {
                self.requests.remove(index);
                true
            }
            None => {
                warn!(patent = identifier, "patent not in patent list");
                false
            }
        }
    }

    pub fn requests(&self) -> &[PatentId] {
        &self.requests
    }

    pub fn statuses(&self) -> &BTreeMap<String, ScrapeStatus> {
        &self.statuses
    }

    pub fn records(&self) -> &BTreeMap<String, PatentRecord> {
        &self.records
    }

    pub fn status(&self, identifier: &str) -> Option<&ScrapeStatus> {
        self.statuses.get(identifier)
    }

    pub fn record(&self, identifier: &str) -> Option<&PatentRecord> {
        self.records.get(identifier)
    }

    pub fn run(&mut self, sink: &dyn ProgressSink) -> Result<RunReport, ScraperError> {
        if self.requests.is_empty() {
            return Err(ScraperError::NoIdentifiers);
        }

        let started_at = chrono::Utc::now().to_rfc3339();
        let total = self.requests.len();
        let mut succeeded = 0usize;
        for (index, id) in self.requests.clone().into_iter().enumerate() {
            sink.event(ProgressEvent {
                message: format!("phase=Fetch; patent {} ({}/{total})", id, index + 1),
                elapsed: None,
            });
            let start = Instant::now();
            let lookup = self.single(&LookupTarget::Id(id));
            if lookup.status.is_success() {
                succeeded += 1;
            }
            sink.event(ProgressEvent {
                message: format!("phase=Store; {} status={}", lookup.identifier, lookup.status),
                elapsed: Some(start.elapsed()),
            });
            self.statuses
                .insert(lookup.identifier.clone(), lookup.status);
            self.records.insert(lookup.identifier, lookup.record);
        }

        Ok(RunReport {
            started_at,
            processed: total,
            succeeded,
            failed: total - succeeded,
        })
    }

    pub fn single(&self, target: &LookupTarget) -> Lookup {
        let identifier = target.identifier();
        let url = target.url();
        info!(patent = %identifier, %url, "fetching patent page");

        match self.pages.fetch_page(&url) {
            Ok(page) => {
                let record = self.build_record(&page.body, &identifier, &page.url);
                Lookup {
                    identifier,
                    url: page.url,
                    status: ScrapeStatus::Success,
                    record,
                }
            }
            Err(code) => {
                warn!(patent = %identifier, error = %code, "patent fetch failed");
                Lookup {
                    record: PatentRecord::empty(&identifier),
                    identifier,
                    url,
                    status: ScrapeStatus::Failed(code),
                }
            }
        }
    }

    fn build_record(&self, body: &str, identifier: &str, url: &str) -> PatentRecord {
        let document = Html::parse_document(body);
        let mut record = extract(&document, &self.selectors, &self.options.extract);
        record.identifier = identifier.to_string();
        record.source_url = url.to_string();

        if !self.options.auto_download_pdf {
            return record;
        }
        let Some(link) = record.pdf_link().map(str::to_string) else {
            return record;
        };
        match pdf::acquire(&self.documents, &link, &self.options.download_dir, None) {
            PdfOutcome::Saved { path } => {
                info!(patent = identifier, %path, "saved patent PDF");
                record.pdf_local_path = Some(path);
            }
            PdfOutcome::Failed { reason } => {
                warn!(patent = identifier, %reason, "PDF download failed");
            }
        }
        record
    }
}
