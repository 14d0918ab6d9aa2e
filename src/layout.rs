use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub title_meta: String,
    pub abstract_meta: String,
    pub inventor: String,
    pub assignee_original: String,
    pub assignee_current: String,
    pub application_number: String,
    pub publication_date: String,
    pub filing_date: String,
    pub priority_date: String,
    pub grant_date: String,
    pub pdf_link: String,

    pub event: String,
    pub event_type: String,
    pub event_date: String,
    pub event_priority: String,
    pub event_grant: String,
    pub event_publication: String,

    pub forward_citations_no_family: String,
    pub forward_citations_family: String,
    pub backward_citations_no_family: String,
    pub backward_citations_family: String,
    pub citation_publication_number: String,
    pub citation_priority_date: String,
    pub citation_publication_date: String,

    pub non_patent_literature: String,
    pub non_patent_title: String,
    pub non_patent_link: String,

    pub similar_document: String,
    pub similar_publication_number: String,
    pub similar_publication_date: String,

    pub description_section: String,
    pub description_paragraph: String,
    pub claims_section: String,
    pub claim_paragraph: String,

    pub legal_event_row: String,
    pub legal_event_cell: String,
    pub legal_event_date: String,
    pub legal_event_attribute: String,
    pub legal_event_label: String,
    pub legal_event_value: String,

    pub classification_list: String,
    pub classification_item: String,
    pub classification_leaf: String,
    pub classification_code: String,
    pub classification_description: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        let s = |value: &str| value.to_string();
        Self {
            title_meta: s(r#"meta[name="DC.title"]"#),
            abstract_meta: s(r#"meta[name="DC.description"]"#),
            inventor: s(r#"dd[itemprop="inventor"]"#),
            assignee_original: s(r#"dd[itemprop="assigneeOriginal"]"#),
            assignee_current: s(r#"dd[itemprop="assigneeCurrent"]"#),
            application_number: s(r#"dd[itemprop="applicationNumber"]"#),
            publication_date: s(r#"dd[itemprop="publicationDate"]"#),
            filing_date: s(r#"dd[itemprop="filingDate"]"#),
            priority_date: s(r#"dd[itemprop="priorityDate"]"#),
            grant_date: s(r#"dd[itemprop="grantDate"]"#),
            pdf_link: s(r#"a[itemprop="pdfLink"]"#),

            event: s(r#"dd[itemprop="events"]"#),
            event_type: s(r#"span[itemprop="type"]"#),
            event_date: s(r#"time[itemprop="date"]"#),
            event_priority: s("priority"),
            event_grant: s("granted"),
            event_publication: s("publication"),

            forward_citations_no_family: s(r#"tr[itemprop="forwardReferencesOrig"]"#),
            forward_citations_family: s(r#"tr[itemprop="forwardReferencesFamily"]"#),
            backward_citations_no_family: s(r#"tr[itemprop="backwardReferences"]"#),
            backward_citations_family: s(r#"tr[itemprop="backwardReferencesFamily"]"#),
            citation_publication_number: s(r#"span[itemprop="publicationNumber"]"#),
            citation_priority_date: s(r#"td[itemprop="priorityDate"]"#),
            citation_publication_date: s(r#"td[itemprop="publicationDate"]"#),

            non_patent_literature: s(r#"tr[itemprop="detailedNonPatentLiterature"]"#),
            non_patent_title: s(r#"span[itemprop="title"]"#),
            non_patent_link: s("a[href]"),

            similar_document: s(r#"tr[itemprop="similarDocuments"]"#),
            similar_publication_number: s(r#"span[itemprop="publicationNumber"]"#),
            similar_publication_date: s(r#"time[itemprop="publicationDate"]"#),

            description_section: s(r#"section[itemprop="description"]"#),
            description_paragraph: s("div.description-paragraph"),
            claims_section: s(r#"section[itemprop="claims"]"#),
            claim_paragraph: s("div.claim-text"),

            legal_event_row: s(r#"tr[itemprop="legalEvents"]"#),
            legal_event_cell: s("td"),
            legal_event_date: s("time"),
            legal_event_attribute: s(r#"p[itemprop="attributes"]"#),
            legal_event_label: s(r#"strong[itemprop="label"]"#),
            legal_event_value: s(r#"span[itemprop="value"]"#),

            classification_list: s(r#"ul[itemprop="classifications"]"#),
            classification_item: s(r#"li[itemprop="classifications"]"#),
            classification_leaf: s(r#"meta[itemprop="Leaf"]"#),
            classification_code: s(r#"span[itemprop="Code"]"#),
            classification_description: s(r#"span[itemprop="Description"]"#),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventKeywords {
    pub priority: String,
    pub grant: String,
    pub publication: String,
}

#[derive(Debug, Clone)]
pub struct CitationSelectors {
    pub publication_number: Selector,
    pub priority_date: Selector,
    pub publication_date: Selector,
}

#[derive(Debug, Clone)]
pub struct Selectors {
    pub title_meta: Selector,
    pub abstract_meta: Selector,
    pub inventor: Selector,
    pub assignee_original: Selector,
    pub assignee_current: Selector,
    pub application_number: Selector,
    pub publication_date: Selector,
    pub filing_date: Selector,
    pub priority_date: Selector,
    pub grant_date: Selector,
    pub pdf_link: Selector,

    pub event: Selector,
    pub event_type: Selector,
    pub event_date: Selector,
    pub event_keywords: EventKeywords,

    pub forward_citations_no_family: Selector,
    pub forward_citations_family: Selector,
    pub backward_citations_no_family: Selector,
    pub backward_citations_family: Selector,
    pub citation: CitationSelectors,

    pub non_patent_literature: Selector,
    pub non_patent_title: Selector,
    pub non_patent_link: Selector,

    pub similar_document: Selector,
    pub similar_publication_number: Selector,
    pub similar_publication_date: Selector,

    pub description_section: Selector,
    pub description_paragraph: Selector,
    pub claims_section: Selector,
    pub claim_paragraph: Selector,

    pub legal_event_row: Selector,
    pub legal_event_cell: Selector,
    pub legal_event_date: Selector,
    pub legal_event_attribute: Selector,
    pub legal_event_label: Selector,
    pub legal_event_value: Selector,

    pub classification_list: Selector,
    pub classification_item: Selector,
    pub classification_leaf: Selector,
    pub classification_code: Selector,
    pub classification_description: Selector,
}

impl Selectors {
    pub fn compile(layout: &PageLayout) -> Result<Self, ScraperError> {
        Ok(Self {
            title_meta: parse("title_meta", &layout.title_meta)?,
            abstract_meta: parse("abstract_meta", &layout.abstract_meta)?,
            inventor: parse("inventor", &layout.inventor)?,
            assignee_original: parse("assignee_original", &layout.assignee_original)?,
            assignee_current: parse("assignee_current", &layout.assignee_current)?,
            application_number: parse("application_number", &layout.application_number)?,
            publication_date: parse("publication_date", &layout.publication_date)?,
            filing_date: parse("filing_date", &layout.filing_date)?,
            priority_date: parse("priority_date", &layout.priority_date)?,
            grant_date: parse("grant_date", &layout.grant_date)?,
            pdf_link: parse("pdf_link", &layout.pdf_link)?,

            event: parse("event", &layout.event)?,
            event_type: parse("event_type", &layout.event_type)?,
            event_date: parse("event_date", &layout.event_date)?,
            event_keywords: EventKeywords {
                priority: layout.event_priority.clone(),
                grant: layout.event_grant.clone(),
                publication: layout.event_publication.clone(),
            },

            forward_citations_no_family: parse(
                "forward_citations_no_family",
                &layout.forward_citations_no_family,
            )?,
            forward_citations_family: parse(
                "forward_citations_family",
                &layout.forward_citations_family,
            )?,
            backward_citations_no_family: parse(
                "backward_citations_no_family",
                &layout.backward_citations_no_family,
            )?,
            backward_citations_family: parse(
                "backward_citations_family",
                &layout.backward_citations_family,
            )?,
            citation: CitationSelectors {
                publication_number: parse(
                    "citation_publication_number",
                    &layout.citation_publication_number,
                )?,
                priority_date: parse("citation_priority_date", &layout.citation_priority_date)?,
                publication_date: parse(
                    "citation_publication_date",
                    &layout.citation_publication_date,
                )?,
            },

            non_patent_literature: parse("non_patent_literature", &layout.non_patent_literature)?,
            non_patent_title: parse("non_patent_title", &layout.non_patent_title)?,
            non_patent_link: parse("non_patent_link", &layout.non_patent_link)?,

            similar_document: parse("similar_document", &layout.similar_document)?,
            similar_publication_number: parse(
                "similar_publication_number",
                &layout.similar_publication_number,
            )?,
            similar_publication_date: parse(
                "similar_publication_date",
                &layout.similar_publication_date,
            )?,

            description_section: parse("description_section", &layout.description_section)?,
            description_paragraph: parse("description_paragraph", &layout.description_paragraph)?,
            claims_section: parse("claims_section", &layout.claims_section)?,
            claim_paragraph: parse("claim_paragraph", &layout.claim_paragraph)?,

            legal_event_row: parse("legal_event_row", &layout.legal_event_row)?,
            legal_event_cell: parse("legal_event_cell", &layout.legal_event_cell)?,
            legal_event_date: parse("legal_event_date", &layout.legal_event_date)?,
            legal_event_attribute: parse("legal_event_attribute", &layout.legal_event_attribute)?,
            legal_event_label: parse("legal_event_label", &layout.legal_event_label)?,
            legal_event_value: parse("legal_event_value", &layout.legal_event_value)?,

            classification_list: parse("classification_list", &layout.classification_list)?,
            classification_item: parse("classification_item", &layout.classification_item)?,
            classification_leaf: parse("classification_leaf", &layout.classification_leaf)?,
            classification_code: parse("classification_code", &layout.classification_code)?,
            classification_description: parse(
                "classification_description",
                &layout.classification_description,
            )?,
        })
    }
}

fn parse(field: &str, selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|err| ScraperError::InvalidSelector {
        field: field.to_string(),
        message: err.to_string(),
    })
}
