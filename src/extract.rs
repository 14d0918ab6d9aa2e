use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::citation::parse_citation;
use crate::layout::Selectors;
use crate::record::{
    CitationEntry, ExtractOptions, LegalEvent, NonPatentCitation, PatentRecord, SimilarDocument,
};

pub fn extract(document: &Html, selectors: &Selectors, options: &ExtractOptions) -> PatentRecord {
    let root = document.root_element();
    let events = EventDates::collect(root, selectors);

    let record = PatentRecord {
        identifier: String::new(),
        source_url: String::new(),
        title: first_attr(root, &selectors.title_meta, "content")
            .map(|title| title.trim_end().to_string())
            .unwrap_or_default(),
        inventors: all_texts(root, &selectors.inventor),
        assignees_original: all_texts(root, &selectors.assignee_original),
        assignees_current: all_texts(root, &selectors.assignee_current),
        application_number: first_text(root, &selectors.application_number),
        publication_date: first_text(root, &selectors.publication_date).or(events.publication),
        filing_date: first_text(root, &selectors.filing_date),
        priority_date: first_text(root, &selectors.priority_date).or(events.priority),
        grant_date: first_text(root, &selectors.grant_date).or(events.grant),
        pdf_link: first_attr(root, &selectors.pdf_link, "href"),
        abstract_text: options
            .include_abstract
            .then(|| first_attr(root, &selectors.abstract_meta, "content"))
            .flatten(),
        description_text: options
            .include_description
            .then(|| {
                section_text(
                    root,
                    &selectors.description_section,
                    &selectors.description_paragraph,
                )
            })
            .flatten(),
        claim_text: options
            .include_claim
            .then(|| section_text(root, &selectors.claims_section, &selectors.claim_paragraph))
            .flatten(),
        forward_citations_no_family: citations(
            root,
            &selectors.forward_citations_no_family,
            selectors,
        ),
        forward_citations_family: citations(root, &selectors.forward_citations_family, selectors),
        backward_citations_no_family: citations(
            root,
            &selectors.backward_citations_no_family,
            selectors,
        ),
        backward_citations_family: citations(root, &selectors.backward_citations_family, selectors),
        non_patent_literature: non_patent_literature(root, selectors),
        similar_documents: similar_documents(root, selectors),
        legal_events: legal_events(root, selectors),
        classifications: classifications(root, selectors),
        pdf_local_path: None,
    };

    debug!(
        title = %record.title,
        backward = record.backward_citations_no_family.len(),
        forward = record.forward_citations_no_family.len(),
        legal_events = record.legal_events.len(),
        classifications = record.classifications.len(),
        "extracted patent page"
    );
    record
}

#[derive(Debug, Default)]
struct EventDates {
    priority: Option<String>,
    grant: Option<String>,
    publication: Option<String>,
}

impl EventDates {
    // First event of each kind wins.
    fn collect(root: ElementRef<'_>, selectors: &Selectors) -> Self {
        let keywords = &selectors.event_keywords;
        let mut dates = Self::default();
        for event in root.select(&selectors.event) {
            let (Some(kind), Some(date)) = (
                first_text(event, &selectors.event_type),
                first_text(event, &selectors.event_date),
            ) else {
                continue;
            };
            let slot = if kind == keywords.priority {
                &mut dates.priority
            } else if kind == keywords.grant {
                &mut dates.grant
            } else if kind == keywords.publication {
                &mut dates.publication
            } else {
                continue;
            };
            if slot.is_none() {
                *slot = Some(date);
            }
        }
        dates
    }
}

fn citations(root: ElementRef<'_>, rows: &Selector, selectors: &Selectors) -> Vec<CitationEntry> {
    root.select(rows)
        .map(|row| parse_citation(row, &selectors.citation))
        .collect()
}

fn non_patent_literature(root: ElementRef<'_>, selectors: &Selectors) -> Vec<NonPatentCitation> {
    root.select(&selectors.non_patent_literature)
        .map(|row| {
            let title = row.select(&selectors.non_patent_title).next();
            NonPatentCitation {
                full_text: title
                    .map(|title| joined_text(title, " "))
                    .filter(|text| !text.is_empty()),
                link: title
                    .and_then(|title| title.select(&selectors.non_patent_link).next())
                    .and_then(|anchor| anchor.value().attr("href"))
                    .map(str::to_string),
            }
        })
        .collect()
}

fn similar_documents(root: ElementRef<'_>, selectors: &Selectors) -> Vec<SimilarDocument> {
    root.select(&selectors.similar_document)
        .map(|row| SimilarDocument {
            publication_number: first_text(row, &selectors.similar_publication_number),
            publication_date: first_text(row, &selectors.similar_publication_date),
        })
        .collect()
}

fn section_text(root: ElementRef<'_>, section: &Selector, paragraph: &Selector) -> Option<String> {
    let section = root.select(section).next()?;
    let text = section
        .select(paragraph)
        .map(collapsed_text)
        .collect::<Vec<_>>()
        .join("\n");
    (!text.is_empty()).then_some(text)
}

fn legal_events(root: ElementRef<'_>, selectors: &Selectors) -> Vec<LegalEvent> {
    let mut seen = HashSet::new();
    let mut events = Vec::new();
    for row in root.select(&selectors.legal_event_row) {
        let cells = row.select(&selectors.legal_event_cell).collect::<Vec<_>>();
        if cells.is_empty() {
            continue;
        }
        let date = cells
            .first()
            .and_then(|cell| first_text(*cell, &selectors.legal_event_date))
            .unwrap_or_default();
        let code = cells.get(1).map(|cell| element_text(*cell)).unwrap_or_default();
        let title = cells.get(2).map(|cell| element_text(*cell)).unwrap_or_default();
        let description = cells
            .get(3)
            .and_then(|cell| legal_event_description(*cell, selectors));

        if !seen.insert((date.clone(), code.clone())) {
            debug!(%date, %code, "skipping duplicate legal event");
            continue;
        }
        events.push(LegalEvent {
            date,
            code,
            title,
            description,
        });
    }
    events
}

fn legal_event_description(cell: ElementRef<'_>, selectors: &Selectors) -> Option<String> {
    let lines = cell
        .select(&selectors.legal_event_attribute)
        .filter_map(|attribute| {
            let label = attribute.select(&selectors.legal_event_label).next()?;
            let value = attribute.select(&selectors.legal_event_value).next()?;
            Some(format!("{}: {}", element_text(label), element_text(value)))
        })
        .collect::<Vec<_>>();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn classifications(root: ElementRef<'_>, selectors: &Selectors) -> Vec<String> {
    let item_selector = &selectors.classification_item;
    let mut visited = HashSet::new();
    let mut values = Vec::new();
    for list in root.select(&selectors.classification_list) {
        for item in list.select(item_selector) {
            // Nested lists select the same items again.
            if !visited.insert(item.id()) {
                continue;
            }
            let is_leaf = owned_by(item, &selectors.classification_leaf, item_selector).is_some();
            if !is_leaf {
                continue;
            }
            let Some(code) = owned_by(item, &selectors.classification_code, item_selector)
                .map(element_text)
                .filter(|code| !code.is_empty())
            else {
                continue;
            };
            let description =
                owned_by(item, &selectors.classification_description, item_selector)
                    .map(element_text)
                    .unwrap_or_default();
            values.push(format!("{code} {description}").trim_end().to_string());
        }
    }
    values
}

// Only matches whose nearest enclosing item is `item` itself; markers of
// nested items belong to those items.
fn owned_by<'a>(
    item: ElementRef<'a>,
    selector: &Selector,
    item_selector: &Selector,
) -> Option<ElementRef<'a>> {
    item.select(selector).find(|element| {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| item_selector.matches(ancestor))
            .is_some_and(|owner| owner.id() == item.id())
    })
}

pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

// Source whitespace is kept as word boundaries; runs collapse to one space.
fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn joined_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

pub(crate) fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

pub(crate) fn all_texts(scope: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    scope
        .select(selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

pub(crate) fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .find_map(|element| element.value().attr(attr))
        .map(str::to_string)
        .filter(|value| !value.is_empty())
}
