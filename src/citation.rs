use scraper::ElementRef;

use crate::extract::first_text;
use crate::layout::CitationSelectors;
use crate::record::CitationEntry;

pub fn parse_citation(row: ElementRef<'_>, selectors: &CitationSelectors) -> CitationEntry {
    CitationEntry {
        patent_number: first_text(row, &selectors.publication_number).unwrap_or_default(),
        priority_date: first_text(row, &selectors.priority_date).unwrap_or_default(),
        publication_date: first_text(row, &selectors.publication_date).unwrap_or_default(),
    }
}
