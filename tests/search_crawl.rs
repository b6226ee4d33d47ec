// tests/search_crawl.rs
//
// Crawl and list fetch against canned pages.
//
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use patent_scrape::config::ScrapeOptions;
use patent_scrape::progress::{NullProgress, Progress};
use patent_scrape::query::SearchQuery;
use patent_scrape::scrape::{self, crawl_search, fetch_list, patent_url, search_url};
use patent_scrape::store::PatentStore;
use patent_scrape::{Fetch, PatentNumber, Result, ScrapeError};

const BASE: &str = "http://patents.test";
const PAGE: &str = include_str!("fixtures/patent_5881811.html");

/// URL → body. Unknown URLs answer 404. Every request is recorded.
#[derive(Default)]
struct CannedFetch {
    pages: HashMap<String, String>,
    seen: RefCell<Vec<String>>,
}

impl CannedFetch {
    fn with(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }
}

impl Fetch for CannedFetch {
    fn get(&self, url: &str) -> Result<String> {
        self.seen.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Status { status: 404, url: url.to_string() })
    }
}

#[derive(Default)]
struct Recorder {
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn item_done(&mut self, id: &str) { self.done.push(id.to_string()); }
    fn item_failed(&mut self, id: &str, _reason: &str) { self.failed.push(id.to_string()); }
    fn finish(&mut self) { self.finished = true; }
}

fn opts(max_pages: usize) -> ScrapeOptions {
    ScrapeOptions {
        base_url: s(BASE),
        max_pages,
        request_pause_ms: 0,
        ..Default::default()
    }
}

fn s(v: &str) -> String { v.to_string() }

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("patent_scrape_it_{}", name));
    let _ = fs::remove_dir_all(&p);
    p
}

fn results_page(numbers: &[&str], next: Option<&str>) -> String {
    let mut html = s("<HTML><BODY>Results of Search in US Patent Collection db for:<BR>\
        <strong>1</strong> through <strong>2</strong> out of <strong>5</strong><BR>\n<TABLE>\n");
    for (i, n) in numbers.iter().enumerate() {
        html.push_str(&format!(
            "<TR><TD valign=top>{i}</TD>\n<TD valign=top><A  HREF=/netacgi/nph-Parser?r={i}&f=G>{n}</A></TD>\n\
             <TD valign=top><A  HREF=/netacgi/nph-Parser?r={i}&f=G>A title</A></TD></TR>\n"
        ));
    }
    html.push_str("</TABLE>\n");
    if let Some(link) = next {
        html.push_str(&format!(
            "<A HREF={link}><IMG border=0 src=\"/netaicon/PTO/nextlist.gif\" ALT=\"[NEXT_LIST]\"></A>\n"
        ));
    }
    html.push_str("</BODY></HTML>");
    html
}

fn query() -> SearchQuery {
    let mut q = SearchQuery::new();
    q.add_term("TTL", "stent");
    q
}

#[test]
fn crawl_follows_next_links_until_the_last_page() {
    let o = opts(20);
    let first = search_url(&o, &query()).unwrap();
    let fetch = CannedFetch::default()
        .with(&first, &results_page(&["5,881,811", "RE44,123"], Some("/netacgi/nph-Parser?p=2&Query=TTL/&quot;stent&quot;")))
        .with(&format!("{BASE}/netacgi/nph-Parser?p=2&Query=TTL/%22stent%22"), &results_page(&["D678,001"], Some("/p3")))
        .with(&format!("{BASE}/p3"), &results_page(&["4,733,665"], None));

    let mut progress = Recorder::default();
    let outcome = crawl_search(&fetch, &o, &query(), &mut progress).unwrap();

    assert_eq!(outcome.identifiers, ["5,881,811", "RE44,123", "D678,001", "4,733,665"]);
    assert_eq!(outcome.pages, 3);
    assert_eq!(outcome.total, Some(5));
    assert_eq!(progress.done.len(), 3);
    assert!(progress.finished);
}

#[test]
fn crawl_stops_at_max_pages() {
    let o = opts(1);
    let first = search_url(&o, &query()).unwrap();
    let fetch = CannedFetch::default()
        .with(&first, &results_page(&["5,881,811"], Some("/p2")))
        .with(&format!("{BASE}/p2"), &results_page(&["6,000,001"], None));

    let outcome = crawl_search(&fetch, &o, &query(), &mut NullProgress).unwrap();
    assert_eq!(outcome.identifiers, ["5,881,811"]);
    assert_eq!(outcome.pages, 1);
    assert_eq!(fetch.seen.borrow().len(), 1);
}

#[test]
fn crawl_fails_on_short_page() {
    let o = opts(5);
    let first = search_url(&o, &query()).unwrap();
    let fetch = CannedFetch::default().with(&first, "oops");
    let err = crawl_search(&fetch, &o, &query(), &mut NullProgress).unwrap_err();
    assert!(matches!(err, ScrapeError::ShortDocument { len: 4, min: 10, .. }));
}

#[test]
fn empty_query_never_fetches() {
    let fetch = CannedFetch::default();
    let err = crawl_search(&fetch, &opts(5), &SearchQuery::new(), &mut NullProgress).unwrap_err();
    assert!(matches!(err, ScrapeError::EmptyQuery));
    assert!(fetch.seen.borrow().is_empty());
}

#[test]
fn list_fetch_counts_failures_and_carries_on() {
    let o = opts(1).with_storage_root(tmp_dir("list"));
    let store = PatentStore::open(&o.storage_root).unwrap();
    let good = PatentNumber::parse("5,881,811").unwrap();
    let short = PatentNumber::parse("6,000,001").unwrap();
    let fetch = CannedFetch::default()
        .with(&patent_url(&o, &good), PAGE)
        .with(&patent_url(&o, &short), "<HTML>");

    let ids = vec![s("5,881,811"), s("6,000,001"), s("7,000,000"), s("12")];
    let mut progress = Recorder::default();
    let summary = fetch_list(&fetch, &store, &o, &ids, &mut progress);

    assert_eq!(summary.fetched, 1);
    assert_eq!(summary.failed.len(), 3);
    assert_eq!(progress.done, ["5,881,811"]);
    assert_eq!(progress.failed, ["6,000,001", "7,000,000", "12"]);

    let saved = store.load_record(&good).unwrap().unwrap();
    assert_eq!(saved.title(), Some("Modular stent delivery system"));
    assert!(store.load_html(&short).unwrap().is_none());
}

#[test]
fn cached_page_is_used_unless_refreshing() {
    let o = opts(1).with_storage_root(tmp_dir("cache"));
    let store = PatentStore::open(&o.storage_root).unwrap();
    let n = PatentNumber::parse("5,881,811").unwrap();
    store.save_html(&n, PAGE).unwrap();

    let offline = CannedFetch::default();
    let r = scrape::scrape_patent(&offline, &store, &o, "5,881,811", false).unwrap();
    assert_eq!(r.numeric_patent_number(), Some(5_881_811));
    assert!(offline.seen.borrow().is_empty());

    let err = scrape::scrape_patent(&offline, &store, &o, "5,881,811", true).unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 404, .. }));
    assert_eq!(offline.seen.borrow().len(), 1);
}

#[test]
fn missing_identifier_is_fatal() {
    let o = opts(1).with_storage_root(tmp_dir("missing"));
    let store = PatentStore::new(&o.storage_root);
    let err = scrape::scrape_patent(&CannedFetch::default(), &store, &o, "", false).unwrap_err();
    assert!(matches!(err, ScrapeError::MissingIdentifier));
}

#[test]
fn page_with_another_number_is_stored_under_the_requested_key() {
    let o = opts(1).with_storage_root(tmp_dir("renumbered"));
    let store = PatentStore::open(&o.storage_root).unwrap();
    let requested = PatentNumber::parse("6,000,001").unwrap();
    let printed = PatentNumber::parse("5,881,811").unwrap();
    let fetch = CannedFetch::default().with(&patent_url(&o, &requested), PAGE);

    let r = scrape::scrape_patent(&fetch, &store, &o, "6,000,001", false).unwrap();
    assert_eq!(r.numeric_patent_number(), Some(5_881_811));

    let saved = store.load_record(&requested).unwrap().unwrap();
    assert_eq!(saved.title(), Some("Modular stent delivery system"));
    assert!(store.load_html(&requested).unwrap().is_some());
    assert!(store.path_for(&requested, "html").exists());
    assert!(store.path_for(&requested, "dat").exists());
    assert!(!store.path_for(&printed, "dat").exists());
    assert!(!store.path_for(&printed, "html").exists());

    let again = scrape::scrape_patent(&fetch, &store, &o, "6,000,001", false).unwrap();
    assert_eq!(again, r);
    assert_eq!(fetch.seen.borrow().len(), 1);
}
