use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    #[serde(default, rename = "abstract")]
    pub include_abstract: bool,
    #[serde(default, rename = "description")]
    pub include_description: bool,
    #[serde(default, rename = "claim")]
    pub include_claim: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatentRecord {
    pub identifier: String,
    pub source_url: String,
    pub title: String,
    pub inventors: Vec<String>,
    pub assignees_original: Vec<String>,
    pub assignees_current: Vec<String>,
    pub application_number: Option<String>,
    pub publication_date: Option<String>,
    pub filing_date: Option<String>,
    pub priority_date: Option<String>,
    pub grant_date: Option<String>,
    pub pdf_link: Option<String>,
    pub abstract_text: Option<String>,
    pub description_text: Option<String>,
    pub claim_text: Option<String>,
    pub forward_citations_no_family: Vec<CitationEntry>,
    pub forward_citations_family: Vec<CitationEntry>,
    pub backward_citations_no_family: Vec<CitationEntry>,
    pub backward_citations_family: Vec<CitationEntry>,
    pub non_patent_literature: Vec<NonPatentCitation>,
    pub similar_documents: Vec<SimilarDocument>,
    pub legal_events: Vec<LegalEvent>,
    pub classifications: Vec<String>,
    pub pdf_local_path: Option<Utf8PathBuf>,
}

impl PatentRecord {
    pub fn empty(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            ..Self::default()
        }
    }

    pub fn pdf_link(&self) -> Option<&str> {
        self.pdf_link.as_deref().filter(|link| !link.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CitationEntry {
    pub patent_number: String,
    pub priority_date: String,
    pub publication_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NonPatentCitation {
    pub full_text: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimilarDocument {
    pub publication_number: Option<String>,
    pub publication_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LegalEvent {
    pub date: String,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
}
