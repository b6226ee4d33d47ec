// src/specs/patent.rs
//! Scraping *spec* for a single patent full-text page.
//!
//! One pass: tables first (number, issue date, classes), then sections
//! (title, abstract, narrative text, citations, bibliographic table). The page
//! is authoritative: a number found in the header table replaces whatever the
//! caller asked for.
//!
//! Nothing here fails. A page that does not look like we expect produces a
//! record with fields left unset.

use std::time::Instant;

use tracing::debug;

use crate::core::html::clean;
use crate::record::PatentRecord;

use super::{sections, tables};

/// Populate `shell` (a record holding only the requested number) from `raw_html`.
pub fn parse(shell: PatentRecord, raw_html: &str) -> PatentRecord {
    let t = Instant::now();

    let blocks = tables::segment(raw_html);
    let header = tables::parse_header(&blocks);
    let body = sections::parse_sections(raw_html);

    let patent_number = match (header.patent_number, shell.patent_number) {
        (Some(found), Some(asked)) if found != asked => {
            debug!("Patent: page says {found}, requested {asked}; keeping {found}");
            Some(found)
        }
        (found, asked) => found.or(asked),
    };

    let biblio = body.bibliographic;
    let record = PatentRecord {
        patent_number,

        current_us_class: header.classes.us,
        current_international_class: header.classes.international,
        current_cpc_class: header.classes.cpc,
        field_of_search: header.classes.field_of_search,

        issue_date: header.issue_date,
        issue_timestamp: header.issue_timestamp,
        filed_date: biblio.filed_date,
        filed_timestamp: biblio.filed_timestamp,

        inventors_raw: biblio.inventors_raw,
        inventors: biblio.inventors,
        applicant: biblio.applicant,
        assignee: biblio.assignee,
        application_number: biblio.application_number,
        family_id: biblio.family_id,
        name_city_state_country_type: biblio.name_city_state_country_type,

        title: body.title,
        abstract_text: body.abstract_text,
        government_interests: body.government_interests,
        claims: body.claims,
        description: body.description,
        parent_case: body.parent_case,

        referenced_patents: body.references,

        raw_html: raw_html.to_string(),
        plain_text: clean(raw_html),
    };

    debug!(
        "Patent: parsed {} ({} tables) in {:?}",
        record.patent_number().map(|n| n.as_str()).unwrap_or("?"),
        blocks.len(),
        t.elapsed()
    );
    record
}
