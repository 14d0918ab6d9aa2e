use std::fmt;
use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::domain::FailureCode;
use crate::fetch::Fetcher;

const ILLEGAL_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PdfOutcome {
    Saved { path: Utf8PathBuf },
    Failed { reason: String },
}

impl PdfOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PdfOutcome::Saved { .. })
    }

    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            PdfOutcome::Saved { path } => Some(path),
            PdfOutcome::Failed { .. } => None,
        }
    }
}

impl fmt::Display for PdfOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfOutcome::Saved { path } => write!(f, "{path}"),
            PdfOutcome::Failed { reason } => write!(f, "{reason}"),
        }
    }
}

pub fn acquire<F: Fetcher + ?Sized>(
    fetcher: &F,
    pdf_url: &str,
    directory: &Utf8Path,
    filename: Option<&str>,
) -> PdfOutcome {
    let filename = filename
        .map(str::to_string)
        .unwrap_or_else(|| filename_from_url(pdf_url));
    let filename = sanitize_filename(&filename);
    if filename.is_empty() {
        return PdfOutcome::Failed {
            reason: format!("Error: no usable file name for {pdf_url}"),
        };
    }

    if let Err(err) = fs::create_dir_all(directory.as_std_path()) {
        return PdfOutcome::Failed {
            reason: format!("Error: create {directory}: {err}"),
        };
    }
    let path = directory.join(&filename);

    let bytes = match fetcher.fetch_binary(pdf_url) {
        Ok(bytes) => bytes,
        Err(code) => {
            return PdfOutcome::Failed {
                reason: code.to_string(),
            };
        }
    };

    match write_atomic(directory, &path, &bytes) {
        Ok(()) => PdfOutcome::Saved { path },
        Err(message) => PdfOutcome::Failed {
            reason: FailureCode::Message(message).to_string(),
        },
    }
}

pub fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let tail = path.rsplit('/').next().unwrap_or_default();
    let stem = tail.replace(".pdf", "");
    format!("{stem}.pdf")
}

pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|ch| !ILLEGAL_FILENAME_CHARS.contains(ch))
        .collect()
}

fn write_atomic(directory: &Utf8Path, path: &Utf8Path, bytes: &[u8]) -> Result<(), String> {
    let mut file =
        NamedTempFile::new_in(directory.as_std_path()).map_err(|err| err.to_string())?;
    file.write_all(bytes).map_err(|err| err.to_string())?;
    file.persist(path.as_std_path())
        .map_err(|err| err.error.to_string())?;
    Ok(())
}
