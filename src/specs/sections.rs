// src/specs/sections.rs
//! `<HR>`-delimited sections of a patent page.
//!
//! Every section is classified once, first match wins, in the order of
//! [`SectionKind`]. Most headings sit alone in their section and the content
//! is the *next* section; only the Abstract heading splits its own section
//! (title before it, abstract after it), and the bibliographic table is parsed
//! in place.

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::core::date::noon_timestamp;
use crate::core::html::{clean, next_tag_block_ci};
use crate::core::sanitize::{collapse_whitespace, non_empty, trim_list_separators};
use crate::record::{Citation, Inventor};

pub const SECTION_BOUNDARY: &str = "<HR>";
pub const ABSTRACT_HEADING: &str = "<CENTER><B>Abstract</B></CENTER>";
const INVENTOR_HEADERS: [&str; 2] = [">Inventor:</TH>", ">Inventors:</TH>"];
const ROW_OPEN: &str = "<TR";
const CELL_OPEN: &str = "<TD";

static GOVERNMENT_INTERESTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<CENTER>.*Government Interests.*</CENTER>").unwrap());
static CLAIMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<CENTER>.*Claims.*</CENTER>").unwrap());
static DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<CENTER>.*Description.*</CENTER>").unwrap());
static REFERENCES_CITED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<CENTER><B>References Cited.*</CENTER>").unwrap());
static PARENT_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<CENTER>.*Parent Case Text.*</CENTER>").unwrap());

// Linked number cell, date cell, inventor cell.
static CITATION_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<TR[^>]*>\s*<TD[^>]*>\s*<a\s[^>]*href="([^"]*)"[^>]*>([^<]*)</a>\s*</TD>\s*<TD[^>]*>([^<]*)</TD>\s*<TD[^>]*>([^<]*)</TD>\s*</TR>"#,
    )
    .unwrap()
});
static NAME_CITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(.+?)\((.+?)\)").unwrap());

/// Section kinds in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionKind {
    Abstract,
    GovernmentInterests,
    Claims,
    Description,
    ReferencesCited,
    ParentCaseText,
    Bibliographic,
    Unrecognized,
}

/// Classify a raw section by its heading. Checks run in a fixed order, so a
/// section that could match twice always lands on the earlier kind.
pub fn classify(section: &str) -> SectionKind {
    if section.contains(ABSTRACT_HEADING) {
        SectionKind::Abstract
    } else if GOVERNMENT_INTERESTS.is_match(section) {
        SectionKind::GovernmentInterests
    } else if CLAIMS.is_match(section) {
        SectionKind::Claims
    } else if DESCRIPTION.is_match(section) {
        SectionKind::Description
    } else if REFERENCES_CITED.is_match(section) {
        SectionKind::ReferencesCited
    } else if PARENT_CASE.is_match(section) {
        SectionKind::ParentCaseText
    } else if INVENTOR_HEADERS.iter().any(|h| section.contains(h)) {
        SectionKind::Bibliographic
    } else {
        SectionKind::Unrecognized
    }
}

/// Fields from the inventors/assignee table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bibliographic {
    pub inventors_raw: Option<String>,
    pub inventors: Option<Vec<Inventor>>,
    pub applicant: Option<String>,
    pub name_city_state_country_type: Option<String>,
    pub assignee: Option<String>,
    pub application_number: Option<String>,
    pub filed_date: Option<String>,
    pub filed_timestamp: Option<DateTime<Local>>,
    pub family_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectionFields {
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub government_interests: Option<String>,
    pub claims: Option<String>,
    pub description: Option<String>,
    pub references: Option<Vec<Citation>>,
    pub parent_case: Option<String>,
    pub bibliographic: Bibliographic,
}

pub fn segment(doc: &str) -> Vec<&str> {
    doc.split(SECTION_BOUNDARY).collect()
}

/// The section after `index`, if there is one.
pub fn next_section<'a>(sections: &[&'a str], index: usize) -> Option<&'a str> {
    sections.get(index.checked_add(1)?).copied()
}

pub fn parse_sections(doc: &str) -> SectionFields {
    let sections = segment(doc);
    let mut out = SectionFields::default();

    for (i, section) in sections.iter().enumerate() {
        let kind = classify(section);
        let next = next_section(&sections, i);
        match kind {
            SectionKind::Abstract => {
                if let Some((before, after)) = split_abstract(section) {
                    out.title = non_empty(clean(before));
                    out.abstract_text = non_empty(clean(after));
                }
            }
            SectionKind::GovernmentInterests => {
                out.government_interests = next.map(clean).and_then(non_empty);
            }
            SectionKind::Claims => {
                out.claims = next.map(|s| s.trim().to_string()).and_then(non_empty);
            }
            SectionKind::Description => {
                out.description = next.map(|s| s.trim().to_string()).and_then(non_empty);
            }
            SectionKind::ReferencesCited => {
                out.references = next.and_then(parse_citations);
            }
            SectionKind::ParentCaseText => {
                out.parent_case = next.map(clean).and_then(non_empty);
            }
            SectionKind::Bibliographic => parse_bibliographic(section, &mut out.bibliographic),
            SectionKind::Unrecognized => {}
        }
        if kind != SectionKind::Unrecognized && kind != SectionKind::Bibliographic && next.is_none() {
            debug!("Sections: {:?} heading is the last section, nothing follows", kind);
        }
    }
    out
}

/// Text before and after the Abstract heading. A second heading, if any, ends
/// the abstract.
fn split_abstract(section: &str) -> Option<(&str, &str)> {
    let (before, rest) = section.split_once(ABSTRACT_HEADING)?;
    let after = rest.split(ABSTRACT_HEADING).next().unwrap_or(rest);
    Some((before, after))
}

/// Citation rows of the first table in `section`. Rows of any other shape are
/// skipped. `None` when nothing usable is found.
pub fn parse_citations(section: &str) -> Option<Vec<Citation>> {
    let (start, end) = next_tag_block_ci(section, "<table", "</table>", 0)?;
    let table = &section[start..end];

    let rows: Vec<Citation> = CITATION_ROW
        .captures_iter(table)
        .map(|c| Citation {
            number: collapse_whitespace(&c[2]),
            url: c[1].trim().to_string(),
            issue_date: collapse_whitespace(&c[3]),
            inventor: collapse_whitespace(&c[4]),
        })
        .filter(|c| !c.number.is_empty())
        .collect();

    if rows.is_empty() { None } else { Some(rows) }
}

/// Walk the `<TR` chunks of the inventors table. Each chunk's first cell is the
/// label, the second the value; further cells are ignored.
fn parse_bibliographic(section: &str, out: &mut Bibliographic) {
    for chunk in section.split(ROW_OPEN) {
        let mut cells = chunk.split(CELL_OPEN);
        let Some(label_cell) = cells.next() else { continue };
        let Some(value_cell) = cells.next() else { continue };
        // Put the opener back so its attribute tail strips as a tag.
        let label = clean(join!(CELL_OPEN, label_cell));
        let value = clean(join!(CELL_OPEN, value_cell));

        match label.as_str() {
            "Inventor:" | "Inventors:" => {
                let list = parse_inventors(&value);
                out.inventors = if list.is_empty() { None } else { Some(list) };
                out.inventors_raw = non_empty(value);
            }
            "Applicant:" => out.applicant = non_empty(value),
            "Name City State Country Type" => out.name_city_state_country_type = non_empty(value),
            "Assignee:" => out.assignee = non_empty(value),
            "Appl. No.:" => out.application_number = non_empty(value),
            "Filed:" => {
                out.filed_timestamp = noon_timestamp(&value);
                out.filed_date = non_empty(value);
            }
            "Family ID:" => out.family_id = non_empty(value),
            _ => {}
        }
    }
}

/// `"Smith, John (Springfield); Doe, Jane (Shelbyville)"` → two inventors.
pub fn parse_inventors(value: &str) -> Vec<Inventor> {
    NAME_CITY
        .captures_iter(value)
        .map(|c| Inventor {
            name: trim_list_separators(&c[1]).to_string(),
            city: c[2].trim().to_string(),
        })
        .collect()
}
