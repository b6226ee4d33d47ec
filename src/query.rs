// src/query.rs
use crate::error::{Result, ScrapeError};

/// Field codes understood by the advanced search form. The form also accepts
/// the older short aliases (`TTL`, `AN`, ...); terms are passed through as given.
pub const FIELD_CODES: &[(&str, &str)] = &[
    ("TI", "Title"),
    ("ABTX", "Abstract"),
    ("ISD", "Issue Date"),
    ("PN", "Patent Number"),
    ("AD", "Application Date"),
    ("AP", "Application Serial Number"),
    ("KD", "Application Type"),
    ("AANM", "Applicant Name"),
    ("AACI", "Applicant City"),
    ("AAST", "Applicant State"),
    ("AACO", "Applicant Country"),
    ("AAAT", "Applicant Type"),
    ("ASNM", "Assignee Name"),
    ("ASCI", "Assignee City"),
    ("ASST", "Assignee State"),
    ("ASCO", "Assignee Country"),
    ("CIPC", "International Classification"),
    ("CPC", "Current CPC Classification"),
    ("ORCL", "Current US Classification"),
    ("XP", "Primary Examiner"),
    ("XA", "Assistant Examiner"),
    ("INNM", "Inventor Name"),
    ("INCI", "Inventor City"),
    ("INST", "Inventor State"),
    ("INCO", "Inventor Country"),
    ("GOTX", "Government Interest"),
    ("LREP", "Attorney or Agent"),
    ("PCTA", "PCT Information"),
    ("PT3D", "PCT 371C124 Date"),
    ("PTAD", "PCT Filing Date"),
    ("PRFR", "Foreign Priority"),
    ("REIS", "Reissue Data"),
    ("RPAF", "Reissued Patent Application Filing Date"),
    ("RLAP", "Related US App. Data"),
    ("RLFD", "Related Application Filing Date"),
    ("PRAD", "Priority Claims Date"),
    ("PPPD", "Prior Published Document Date"),
    ("UREF", "Referenced By"),
    ("FREF", "Foreign References"),
    ("OREF", "Other References"),
    ("ACLM", "Claim(s)"),
    ("PPDB", "Description/Specification"),
    ("FMID", "Patent Family ID"),
];

/// Case-insensitive lookup in [`FIELD_CODES`].
pub fn describe(code: &str) -> Option<&'static str> {
    FIELD_CODES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, d)| *d)
}

/// Ordered `CODE/value` terms, joined with `AND`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<(String, String)>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term. Re-adding a code replaces its value in place.
    pub fn add_term(&mut self, code: &str, value: &str) -> &mut Self {
        let code = code.trim().to_ascii_uppercase();
        let value = value.trim().to_string();
        match self.terms.iter_mut().find(|(c, _)| *c == code) {
            Some(slot) => slot.1 = value,
            None => self.terms.push((code, value)),
        }
        self
    }

    /// `"TTL=\"video games\""` → `("TTL", "\"video games\"")`.
    pub fn parse_term(spec: &str) -> Option<(String, String)> {
        let (code, value) = spec.split_once('=')?;
        let (code, value) = (code.trim(), value.trim());
        if code.is_empty() || value.is_empty() {
            return None;
        }
        Some((code.to_string(), value.to_string()))
    }

    pub fn terms(&self) -> &[(String, String)] {
        &self.terms
    }

    /// `TTL/"video games" AND AN/acme`
    pub fn to_query(&self) -> Result<String> {
        if self.terms.is_empty() {
            return Err(ScrapeError::EmptyQuery);
        }
        Ok(self
            .terms
            .iter()
            .map(|(c, v)| format!("{c}/{v}"))
            .collect::<Vec<_>>()
            .join(" AND "))
    }
}
