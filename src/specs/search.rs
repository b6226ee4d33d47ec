// src/specs/search.rs
//! Scraping *spec* for a search results listing.
//!
//! A listing is a table with one hit per row; the patent number is the text of
//! a link sitting alone in its cell. Paging is a "next list" image link at the
//! bottom. Numbers are returned exactly as printed and in page order: no
//! deduplication, commas kept.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::sanitize::decode_quotes;

/// Alt text on the image inside the next-page link.
pub const NEXT_LIST_MARKER: &str = "[NEXT_LIST]";

static RESULT_CELL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<TD[^>]*>\s*<A\s[^>]*>\s*((?:RE|PP|P|D)?\d[\d,]*)\s*</A>\s*</TD>").unwrap()
});
static NEXT_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?is)<A\s+HREF\s*=\s*["']?([^"'\s>]+)["']?[^>]*>\s*<IMG\s[^>]*ALT\s*=\s*["']?\[NEXT_LIST\]"#,
    )
    .unwrap()
});
static TOTAL_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)strong> out of <strong>(\d+)</strong>").unwrap());

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultsPage {
    pub identifiers: Vec<String>,
    pub next_page: Option<String>,
}

pub fn parse_results_page(html: &str) -> ResultsPage {
    let identifiers = RESULT_CELL
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect();
    ResultsPage { identifiers, next_page: parse_next_page(html) }
}

/// The next-page link, with `&quot;` turned back into a quote.
pub fn parse_next_page(html: &str) -> Option<String> {
    NEXT_LINK
        .captures(html)
        .map(|c| decode_quotes(&c[1]))
        .filter(|u| !u.is_empty())
}

/// "Results of Search ... <strong>1</strong> through <strong>50</strong> out of <strong>1234</strong>"
pub fn parse_total_count(html: &str) -> Option<u64> {
    TOTAL_COUNT.captures(html)?[1].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(n: u32, number: &str) -> String {
        format!(
            "<TR><TD valign=top>{n}</TD>\n<TD valign=top><A  HREF=/netacgi/nph-Parser?Sect1=PTO2&r={n}&f=G>{number}</A></TD>\n\
             <TD valign=top><A  HREF=/netacgi/nph-Parser?r={n}>Some   title</A></TD>\n</TR>\n"
        )
    }

    #[test]
    fn three_rows_one_malformed() {
        let html = format!(
            "<TABLE><TR><TD>PAT. NO.</TD><TD>Title</TD></TR>\n{}{}<TR><TD valign=top>3</TD><TD valign=top>8,407,999</TD></TR>\n{}</TABLE>",
            row(1, "8,407,102"),
            row(2, "RE44,123"),
            row(4, "D678,001"),
        );
        let page = parse_results_page(&html);
        assert_eq!(page.identifiers, vec!["8,407,102", "RE44,123", "D678,001"]);
        assert!(page.next_page.is_none());
    }

    #[test]
    fn duplicates_are_kept() {
        let html = format!("<TABLE>{}{}</TABLE>", row(1, "5,881,811"), row(2, "5,881,811"));
        assert_eq!(parse_results_page(&html).identifiers.len(), 2);
    }

    #[test]
    fn next_link_has_quotes_restored() {
        let html = r#"<A HREF=/netacgi/nph-Parser?Sect1=PTO2&p=2&Query=TTL/&quot;video+games&quot;><IMG src="/netaicon/PTO/nextlist.gif" border="0" ALT="[NEXT_LIST]"></A>"#;
        assert_eq!(
            parse_next_page(html).as_deref(),
            Some(r#"/netacgi/nph-Parser?Sect1=PTO2&p=2&Query=TTL/"video+games""#)
        );
    }

    #[test]
    fn other_image_links_are_not_next() {
        let html = r#"<A HREF="/netahtml/PTO/index.html"><IMG src="/netaicon/PTO/home.gif" ALT="[Home]"></A>"#;
        assert!(parse_next_page(html).is_none());
    }

    #[test]
    fn total_count() {
        let html = "<strong>1</strong> through <strong>50</strong> out of <strong>1234</strong>";
        assert_eq!(parse_total_count(html), Some(1234));
        assert_eq!(parse_total_count("no hits"), None);
    }
}
