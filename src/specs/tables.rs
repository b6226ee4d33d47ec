// src/specs/tables.rs
//! Table blocks of a patent page and what lives in them.
//!
//! The page is cut into `<TABLE ... </TABLE>` blocks, each ending at the
//! *nearest* close tag. Two kinds of block matter:
//! - block **2** (third table) is the header: patent number on the right of the
//!   first row, issue date on the right of the second;
//! - any block mentioning `Class:` carries `Label: v1; v2` classification rows.
//!
//! With fewer than three blocks the page is not one we understand and the whole
//! header pass yields nothing. That is silent on purpose: older pages simply
//! come back without classes, number override or issue date.

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::core::date::noon_timestamp;
use crate::core::html::{clean, strip_markup, tag_blocks_ci};
use crate::core::sanitize::non_empty;
use crate::record::PatentNumber;

pub const HEADER_TABLE_INDEX: usize = 2;
pub const MIN_TABLE_BLOCKS: usize = HEADER_TABLE_INDEX + 1;
/// Index of the issue date among the right-aligned half-width cells.
pub const ISSUE_DATE_CELL: usize = 1;
const CLASS_MARKER: &str = "Class:";

static ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<TR[^>]*>(.*?)</TR>").unwrap());
static RIGHT_HALF_CELL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?is)<TD ALIGN="RIGHT" WIDTH="50%">(.*?)</TD>"#).unwrap());
// Utility numbers carry thousands separators; Reissue/Plant/Design add a prefix.
static PATENT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:RE|PP|P|D)?\d{1,3}(?:,\d{3})+\b").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassLabel {
    UsClass,
    InternationalClass,
    CpcClass,
    FieldOfSearch,
}

impl ClassLabel {
    /// Exact labels as printed, minus the colon.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Current U.S. Class" => Some(Self::UsClass),
            "Current International Class" => Some(Self::InternationalClass),
            "Current CPC Class" => Some(Self::CpcClass),
            "Field of Search" => Some(Self::FieldOfSearch),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Classification {
    pub us: Option<Vec<String>>,
    pub international: Option<Vec<String>>,
    pub cpc: Option<Vec<String>>,
    pub field_of_search: Option<Vec<String>>,
}

impl Classification {
    fn set(&mut self, label: ClassLabel, values: Vec<String>) {
        let slot = match label {
            ClassLabel::UsClass => &mut self.us,
            ClassLabel::InternationalClass => &mut self.international,
            ClassLabel::CpcClass => &mut self.cpc,
            ClassLabel::FieldOfSearch => &mut self.field_of_search,
        };
        *slot = Some(values);
    }
}

/// Everything the table pass contributes to a record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeaderFields {
    pub patent_number: Option<PatentNumber>,
    pub issue_date: Option<String>,
    pub issue_timestamp: Option<DateTime<Local>>,
    pub classes: Classification,
}

/// All table blocks, in document order.
pub fn segment(doc: &str) -> Vec<&str> {
    tag_blocks_ci(doc, "<table", "</table>")
}

/// The header block, if the page has enough tables to have one.
pub fn header_block<'a>(tables: &[&'a str]) -> Option<&'a str> {
    if tables.len() < MIN_TABLE_BLOCKS {
        return None;
    }
    tables.get(HEADER_TABLE_INDEX).copied()
}

pub fn parse_header(tables: &[&str]) -> HeaderFields {
    let Some(header) = header_block(tables) else {
        debug!("Tables: {} blocks, skipping header and classes", tables.len());
        return HeaderFields::default();
    };

    let issue_date = parse_issue_date(header);
    let issue_timestamp = issue_date.as_deref().and_then(noon_timestamp);
    if issue_date.is_some() && issue_timestamp.is_none() {
        debug!("Tables: issue date {:?} did not parse", issue_date);
    }

    HeaderFields {
        patent_number: parse_patent_number(header),
        issue_date,
        issue_timestamp,
        classes: parse_classes(tables),
    }
}

/// First number-shaped token in the block.
pub fn parse_patent_number(block: &str) -> Option<PatentNumber> {
    PATENT_NUMBER
        .find(block)
        .and_then(|m| PatentNumber::parse(m.as_str()))
}

/// Text of the second right-aligned half-width cell.
pub fn parse_issue_date(block: &str) -> Option<String> {
    let cell = RIGHT_HALF_CELL.captures_iter(block).nth(ISSUE_DATE_CELL)?;
    non_empty(clean(&cell[1]))
}

/// Walk every block that mentions `Class:`. A later block overrides an earlier
/// one for the same label.
pub fn parse_classes(tables: &[&str]) -> Classification {
    let mut out = Classification::default();
    for block in tables.iter().filter(|b| b.contains(CLASS_MARKER)) {
        let flat: String = block.chars().filter(|c| *c != '\r' && *c != '\n').collect();
        for row in ROW.captures_iter(&flat) {
            if let Some((label, values)) = parse_class_row(&strip_markup(&row[1])) {
                out.set(label, values);
            }
        }
    }
    out
}

/// `"Current U.S. Class: 123/456; 123/789"` → `(UsClass, ["123/456", "123/789"])`.
///
/// The value is the text between the first and second colon. "Field of Search"
/// keeps only its first `;` segment and splits that on commas, which is what
/// that row really uses as a delimiter.
pub fn parse_class_row(row_text: &str) -> Option<(ClassLabel, Vec<String>)> {
    let mut parts = row_text.split(':');
    let label = ClassLabel::from_label(parts.next()?)?;
    let value = parts.next()?;

    let segments: Vec<&str> = value.split(';').map(str::trim).collect();
    let values: Vec<String> = match label {
        ClassLabel::FieldOfSearch => segments
            .first()
            .map(|first| first.split(',').map(str::trim).map(String::from).collect())
            .unwrap_or_default(),
        _ => segments.into_iter().map(String::from).collect(),
    };
    let values: Vec<String> = values.into_iter().filter(|v| !v.is_empty()).collect();
    if values.is_empty() { None } else { Some((label, values)) }
}
