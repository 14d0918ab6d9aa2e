use std::fs;

use scraper::Html;

use patent_scraper::extract::extract;
use patent_scraper::layout::{PageLayout, Selectors};
use patent_scraper::record::{CitationEntry, ExtractOptions, PatentRecord};

fn selectors() -> Selectors {
    Selectors::compile(&PageLayout::default()).unwrap()
}

fn extract_html(html: &str, options: ExtractOptions) -> PatentRecord {
    extract(&Html::parse_document(html), &selectors(), &options)
}

fn fixture() -> String {
    fs::read_to_string("tests/fixtures/US2668287A.html").unwrap()
}

fn all_sections() -> ExtractOptions {
    ExtractOptions {
        include_abstract: true,
        include_description: true,
        include_claim: true,
    }
}

#[test]
fn extract_full_page() {
    let record = extract_html(&fixture(), all_sections());

    assert_eq!(record.title, "Telephone signaling system");
    assert_eq!(
        record.inventors,
        vec!["Jr Charles W Brown", "Walter A Marrison"]
    );
    assert_eq!(
        record.assignees_original,
        vec!["Bell Telephone Laboratories Inc"]
    );
    assert_eq!(record.assignees_current, vec!["Nokia Bell Labs"]);
    assert_eq!(record.application_number.as_deref(), Some("US178426A"));
    assert_eq!(record.filing_date.as_deref(), Some("1950-08-09"));
    assert_eq!(record.priority_date.as_deref(), Some("1950-08-09"));
    assert_eq!(record.publication_date.as_deref(), Some("1954-02-02"));
    assert_eq!(record.grant_date.as_deref(), Some("1954-02-02"));
    assert!(
        record
            .pdf_link
            .as_deref()
            .is_some_and(|link| link.ends_with("/US2668287A.pdf"))
    );

    assert_eq!(
        record.abstract_text.as_deref(),
        Some("A signaling arrangement for automatic telephone exchanges.")
    );
    assert_eq!(
        record.description_text.as_deref(),
        Some("This invention relates to telephone systems.\nIt is an object to simplify signaling.")
    );
    assert_eq!(
        record.claim_text.as_deref(),
        Some(
            "1. In a telephone system, a line circuit.\n2. The system of claim 1, wherein the relay operates."
        )
    );
}

#[test]
fn extract_citation_tables() {
    let record = extract_html(&fixture(), ExtractOptions::default());

    assert_eq!(
        record.backward_citations_no_family,
        vec![
            CitationEntry {
                patent_number: "US2355879A".to_string(),
                priority_date: "1942-04-09".to_string(),
                publication_date: "1944-08-15".to_string(),
            },
            CitationEntry {
                patent_number: "US2495739A".to_string(),
                priority_date: "1945-04-02".to_string(),
                publication_date: "1950-01-31".to_string(),
            },
        ]
    );
    assert_eq!(record.backward_citations_family.len(), 1);
    assert_eq!(record.backward_citations_family[0].priority_date, "");
    assert_eq!(record.backward_citations_family[0].publication_date, "1952-04-29");
    assert_eq!(record.forward_citations_no_family.len(), 1);
    assert_eq!(
        record.forward_citations_no_family[0].patent_number,
        "US2852608A"
    );
    assert!(record.forward_citations_family.is_empty());
}

#[test]
fn extract_literature_and_similar_documents() {
    let record = extract_html(&fixture(), ExtractOptions::default());

    assert_eq!(record.non_patent_literature.len(), 1);
    let npl = &record.non_patent_literature[0];
    assert_eq!(
        npl.full_text.as_deref(),
        Some("Smith, Bell System Technical Journal , vol. 29, 1950")
    );
    assert_eq!(npl.link.as_deref(), Some("https://example.org/bstj29"));

    assert_eq!(record.similar_documents.len(), 2);
    assert_eq!(
        record.similar_documents[0].publication_number.as_deref(),
        Some("US2535552A")
    );
    assert_eq!(
        record.similar_documents[0].publication_date.as_deref(),
        Some("1950-12-26")
    );
    assert_eq!(record.similar_documents[1].publication_number, None);
    assert_eq!(record.similar_documents[1].publication_date, None);
}

#[test]
fn legal_events_keep_first_of_duplicate_key() {
    let record = extract_html(&fixture(), ExtractOptions::default());

    assert_eq!(record.legal_events.len(), 2);
    let first = &record.legal_events[0];
    assert_eq!(first.date, "1950-08-09");
    assert_eq!(first.code, "AS");
    assert_eq!(first.title, "Assignment");
    assert_eq!(
        first.description.as_deref(),
        Some("Owner name: BELL TELEPHONE LABORATORIES\nFree format text: ASSIGNMENT OF ASSIGNORS INTEREST")
    );
    let second = &record.legal_events[1];
    assert_eq!(second.code, "EXPY");
    assert_eq!(second.description, None);
}

#[test]
fn legal_event_attribute_needs_label_and_value() {
    let record = extract_html(
        r#"<table>
            <tr itemprop="legalEvents">
                <td><time>1999-05-05</time></td><td>AS</td><td>Assignment</td>
                <td>
                    <p itemprop="attributes"><strong itemprop="label">Owner name</strong>: <span itemprop="value">ACME CORP</span></p>
                    <p itemprop="attributes"><strong itemprop="label">Effective date</strong></p>
                    <p itemprop="attributes"><span itemprop="value">19990505</span></p>
                </td>
            </tr>
            <tr itemprop="legalEvents">
                <td><time>2003-07-07</time></td><td>FPAY</td><td>Fee payment</td>
                <td>
                    <p itemprop="attributes"><strong itemprop="label">Year of fee payment</strong></p>
                    <p itemprop="attributes"><span itemprop="value">4</span></p>
                </td>
            </tr>
        </table>"#,
        ExtractOptions::default(),
    );

    assert_eq!(record.legal_events.len(), 2);
    assert_eq!(
        record.legal_events[0].description.as_deref(),
        Some("Owner name: ACME CORP")
    );
    assert_eq!(record.legal_events[1].code, "FPAY");
    assert_eq!(record.legal_events[1].description, None);
}

#[test]
fn legal_event_same_date_different_code_kept() {
    let record = extract_html(
        r#"<table>
            <tr itemprop="legalEvents"><td><time>2001-01-01</time></td><td>AS</td><td>Assignment</td></tr>
            <tr itemprop="legalEvents"><td><time>2001-01-01</time></td><td>FPAY</td><td>Fee payment</td></tr>
            <tr itemprop="legalEvents"><td><time>2001-01-01</time></td><td>AS</td><td>Assignment again</td></tr>
            <tr itemprop="legalEvents"></tr>
        </table>"#,
        ExtractOptions::default(),
    );
    let codes = record
        .legal_events
        .iter()
        .map(|event| event.code.as_str())
        .collect::<Vec<_>>();
    assert_eq!(codes, vec!["AS", "FPAY"]);
    assert_eq!(record.legal_events[0].title, "Assignment");
    assert_eq!(record.legal_events[0].description, None);
}

#[test]
fn classifications_emit_leaves_only() {
    let record = extract_html(&fixture(), ExtractOptions::default());
    assert_eq!(
        record.classifications,
        vec![
            "H04Q1/30 Signalling arrangements; Manipulation of signalling currents",
            "H04M19/02 Current supply arrangements for telephone systems",
        ]
    );
}

#[test]
fn classification_non_leaf_sibling_skipped() {
    let record = extract_html(
        r#"<ul itemprop="classifications">
            <li itemprop="classifications"><span itemprop="Code">G06F</span><span itemprop="Description">Electric digital data processing</span></li>
            <li itemprop="classifications"><span itemprop="Code">G06F16/00</span><span itemprop="Description">Information retrieval</span><meta itemprop="Leaf" content="true"></li>
        </ul>"#,
        ExtractOptions::default(),
    );
    assert_eq!(
        record.classifications,
        vec!["G06F16/00 Information retrieval"]
    );
}

#[test]
fn title_only_page_defaults_everything_else() {
    let record = extract_html(
        r#"<html><head><meta name="DC.title" content="Widget"></head><body></body></html>"#,
        all_sections(),
    );

    let expected = PatentRecord {
        title: "Widget".to_string(),
        ..PatentRecord::default()
    };
    assert_eq!(record, expected);
}

#[test]
fn missing_title_is_empty_not_fatal() {
    let record = extract_html(
        r#"<dl><dd itemprop="inventor">Ada Lovelace</dd></dl>"#,
        ExtractOptions::default(),
    );
    assert_eq!(record.title, "");
    assert_eq!(record.inventors, vec!["Ada Lovelace"]);
}

#[test]
fn missing_field_does_not_disturb_siblings() {
    let full = extract_html(&fixture(), ExtractOptions::default());
    let without_inventors = fixture().replace("itemprop=\"inventor\"", "itemprop=\"contributor\"");
    let partial = extract_html(&without_inventors, ExtractOptions::default());

    assert!(partial.inventors.is_empty());
    assert_eq!(
        PatentRecord {
            inventors: full.inventors.clone(),
            ..partial
        },
        full
    );
}

#[test]
fn layout_override_redirects_lookup() {
    let layout = PageLayout {
        inventor: "span.inventor".to_string(),
        ..PageLayout::default()
    };
    let selectors = Selectors::compile(&layout).unwrap();
    let document = Html::parse_document(
        r#"<dd itemprop="inventor">Old Markup</dd><span class="inventor">New Markup</span>"#,
    );
    let record = extract(&document, &selectors, &ExtractOptions::default());
    assert_eq!(record.inventors, vec!["New Markup"]);
}
