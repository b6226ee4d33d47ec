// src/record.rs
//! The patent record and its small value types.
//!
//! A record is built in exactly two steps: [`PatentRecord::new`] with whatever
//! identifier the caller had, then one parse pass ([`PatentRecord::parse`]) over
//! the raw page. After that it is read-only: fields are crate-private and only
//! exposed through accessors.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::sanitize::digits_only;

/// A patent number as printed (`"5,881,811"`, `"RE12,345"`, `"D456,789"`) plus
/// its numeric part with separators and prefix stripped.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatentNumber {
    text: String,
    numeric: u64,
}

impl PatentNumber {
    /// Shorter identifiers are treated as "no identifier".
    pub const MIN_LEN: usize = 4;

    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.chars().count() < Self::MIN_LEN {
            return None;
        }
        let numeric: u64 = digits_only(text).parse().ok()?;
        if numeric == 0 {
            return None;
        }
        Some(Self { text: text.to_string(), numeric })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn numeric(&self) -> u64 {
        self.numeric
    }

    /// Separator-free form used in query URLs and cache file names
    /// (`"5881811"`, `"RE12345"`).
    pub fn query_key(&self) -> String {
        self.text
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }
}

impl fmt::Display for PatentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventor {
    pub name: String,
    pub city: String,
}

/// One row of the "References Cited" table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub number: String,
    pub url: String,
    pub issue_date: String,
    pub inventor: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatentRecord {
    pub(crate) patent_number: Option<PatentNumber>,

    pub(crate) current_us_class: Option<Vec<String>>,
    pub(crate) current_international_class: Option<Vec<String>>,
    pub(crate) current_cpc_class: Option<Vec<String>>,
    pub(crate) field_of_search: Option<Vec<String>>,

    pub(crate) issue_date: Option<String>,
    pub(crate) issue_timestamp: Option<DateTime<Local>>,
    pub(crate) filed_date: Option<String>,
    pub(crate) filed_timestamp: Option<DateTime<Local>>,

    pub(crate) inventors_raw: Option<String>,
    pub(crate) inventors: Option<Vec<Inventor>>,
    pub(crate) applicant: Option<String>,
    pub(crate) assignee: Option<String>,
    pub(crate) application_number: Option<String>,
    pub(crate) family_id: Option<String>,
    pub(crate) name_city_state_country_type: Option<String>,

    pub(crate) title: Option<String>,
    pub(crate) abstract_text: Option<String>,
    pub(crate) government_interests: Option<String>,
    pub(crate) claims: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) parent_case: Option<String>,

    pub(crate) referenced_patents: Option<Vec<Citation>>,

    pub(crate) raw_html: String,
    pub(crate) plain_text: String,
}

/// Column names for [`PatentRecord::summary_row`].
pub const SUMMARY_HEADERS: [&str; 6] = ["Patent", "Title", "Issued", "Filed", "Assignee", "US Class"];

impl PatentRecord {
    /// An empty record holding only the caller's identifier. Identifiers under
    /// [`PatentNumber::MIN_LEN`] characters leave the number unset.
    pub fn new(identifier: &str) -> Self {
        Self { patent_number: PatentNumber::parse(identifier), ..Default::default() }
    }

    /// Build a record from a raw page. The number found in the page, if any,
    /// replaces `identifier`.
    pub fn parse(identifier: &str, raw_html: &str) -> Self {
        crate::specs::patent::parse(Self::new(identifier), raw_html)
    }

    pub fn patent_number(&self) -> Option<&PatentNumber> { self.patent_number.as_ref() }
    pub fn numeric_patent_number(&self) -> Option<u64> { self.patent_number.as_ref().map(PatentNumber::numeric) }

    pub fn current_us_class(&self) -> Option<&[String]> { self.current_us_class.as_deref() }
    pub fn current_international_class(&self) -> Option<&[String]> { self.current_international_class.as_deref() }
    pub fn current_cpc_class(&self) -> Option<&[String]> { self.current_cpc_class.as_deref() }
    pub fn field_of_search(&self) -> Option<&[String]> { self.field_of_search.as_deref() }

    pub fn issue_date(&self) -> Option<&str> { self.issue_date.as_deref() }
    pub fn issue_timestamp(&self) -> Option<DateTime<Local>> { self.issue_timestamp }
    pub fn filed_date(&self) -> Option<&str> { self.filed_date.as_deref() }
    pub fn filed_timestamp(&self) -> Option<DateTime<Local>> { self.filed_timestamp }

    pub fn inventors_raw(&self) -> Option<&str> { self.inventors_raw.as_deref() }
    pub fn inventors(&self) -> Option<&[Inventor]> { self.inventors.as_deref() }
    pub fn applicant(&self) -> Option<&str> { self.applicant.as_deref() }
    pub fn assignee(&self) -> Option<&str> { self.assignee.as_deref() }
    pub fn application_number(&self) -> Option<&str> { self.application_number.as_deref() }
    pub fn family_id(&self) -> Option<&str> { self.family_id.as_deref() }
    pub fn name_city_state_country_type(&self) -> Option<&str> { self.name_city_state_country_type.as_deref() }

    pub fn title(&self) -> Option<&str> { self.title.as_deref() }
    pub fn abstract_text(&self) -> Option<&str> { self.abstract_text.as_deref() }
    pub fn government_interests(&self) -> Option<&str> { self.government_interests.as_deref() }
    /// Markup preserved.
    pub fn claims(&self) -> Option<&str> { self.claims.as_deref() }
    /// Markup preserved.
    pub fn description(&self) -> Option<&str> { self.description.as_deref() }
    pub fn parent_case(&self) -> Option<&str> { self.parent_case.as_deref() }

    pub fn referenced_patents(&self) -> Option<&[Citation]> { self.referenced_patents.as_deref() }

    pub fn raw_html(&self) -> &str { &self.raw_html }
    pub fn plain_text(&self) -> &str { &self.plain_text }

    /// One flat row for CSV/TSV export, aligned with [`SUMMARY_HEADERS`].
    pub fn summary_row(&self) -> Vec<String> {
        let text = |v: Option<&str>| v.unwrap_or_default().to_string();
        vec![
            self.patent_number.as_ref().map(|n| n.to_string()).unwrap_or_default(),
            text(self.title()),
            text(self.issue_date()),
            text(self.filed_date()),
            text(self.assignee()),
            self.current_us_class().map(|c| c.join("; ")).unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keeps_text_and_strips_separators() {
        let n = PatentNumber::parse(" 5,881,811 ").unwrap();
        assert_eq!(n.as_str(), "5,881,811");
        assert_eq!(n.numeric(), 5_881_811);
        assert_eq!(n.query_key(), "5881811");

        let re = PatentNumber::parse("RE12,345").unwrap();
        assert_eq!(re.numeric(), 12345);
        assert_eq!(re.query_key(), "RE12345");
    }

    #[test]
    fn short_or_digitless_identifier_is_unset() {
        assert!(PatentNumber::parse("123").is_none());
        assert!(PatentNumber::parse("").is_none());
        assert!(PatentNumber::parse("abcd").is_none());
        assert!(PatentRecord::new("12").patent_number().is_none());
    }

    #[test]
    fn new_record_has_nothing_but_the_number() {
        let r = PatentRecord::new("5881811");
        assert_eq!(r.numeric_patent_number(), Some(5_881_811));
        assert!(r.title().is_none());
        assert!(r.current_us_class().is_none());
        assert!(r.raw_html().is_empty());
    }

    #[test]
    fn summary_row_lines_up_with_headers() {
        let r = PatentRecord {
            patent_number: PatentNumber::parse("5,881,811"),
            title: Some(s!("Stent")),
            current_us_class: Some(vec![s!("606/194"), s!("604/96.01")]),
            ..Default::default()
        };
        let row = r.summary_row();
        assert_eq!(row.len(), SUMMARY_HEADERS.len());
        assert_eq!(row[0], "5,881,811");
        assert_eq!(row[1], "Stent");
        assert_eq!(row[2], "");
        assert_eq!(row[5], "606/194; 604/96.01");
    }
}
