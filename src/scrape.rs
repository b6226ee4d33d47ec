// src/scrape.rs
//! Orchestration: URLs, cache-aware retrieval, list fetches and the search
//! crawl. All network access goes through a [`Fetch`]; all parsing through
//! `specs`.

use std::{thread, time::Duration};

use reqwest::Url;
use tracing::{debug, info, warn};

use crate::{
    config::{ScrapeOptions, consts::{PATENT_NUMBER_SLOT, PATENT_PATH, SEARCH_FORM, SEARCH_PATH}},
    core::Fetch,
    error::{Result, ScrapeError},
    progress::Progress,
    query::SearchQuery,
    record::{PatentNumber, PatentRecord},
    specs,
    store::PatentStore,
};

pub fn patent_url(opts: &ScrapeOptions, number: &PatentNumber) -> String {
    join!(opts.origin(), &PATENT_PATH.replace(PATENT_NUMBER_SLOT, &number.query_key()))
}

/// GET `url`; bodies shorter than `min_len` bytes are error pages.
pub fn fetch_document(fetcher: &dyn Fetch, url: &str, min_len: usize) -> Result<String> {
    let body = fetcher.get(url)?;
    if body.len() < min_len {
        return Err(ScrapeError::ShortDocument { url: url.to_string(), len: body.len(), min: min_len });
    }
    Ok(body)
}

/// Cached page if there is a usable one, otherwise fetch and cache.
pub fn load_or_fetch(
    fetcher: &dyn Fetch,
    store: &PatentStore,
    opts: &ScrapeOptions,
    number: &PatentNumber,
    refresh: bool,
) -> Result<String> {
    if !refresh {
        if let Some(html) = store.load_html(number)? {
            if html.len() >= opts.min_document_len {
                debug!("{number}: using cached page");
                return Ok(html);
            }
            debug!("{number}: cached page too short, refetching");
        }
    }
    let html = fetch_document(fetcher, &patent_url(opts, number), opts.min_document_len)?;
    store.save_html(number, &html)?;
    Ok(html)
}

/// Load or fetch one page, parse it, save the record.
pub fn scrape_patent(
    fetcher: &dyn Fetch,
    store: &PatentStore,
    opts: &ScrapeOptions,
    identifier: &str,
    refresh: bool,
) -> Result<PatentRecord> {
    let number = PatentNumber::parse(identifier).ok_or(ScrapeError::MissingIdentifier)?;
    let html = load_or_fetch(fetcher, store, opts, &number, refresh)?;
    let record = PatentRecord::parse(identifier, &html);
    store.save_record_as(&number, &record)?;
    Ok(record)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListSummary {
    pub fetched: usize,
    pub failed: Vec<(String, String)>,
}

/// One identifier at a time, pausing between network requests. A failed
/// identifier is reported and skipped.
pub fn fetch_list(
    fetcher: &dyn Fetch,
    store: &PatentStore,
    opts: &ScrapeOptions,
    identifiers: &[String],
    progress: &mut dyn Progress,
) -> ListSummary {
    let mut summary = ListSummary::default();
    progress.begin(identifiers.len());
    progress.log(&format!("Fetching {} patents…", identifiers.len()));

    for (i, id) in identifiers.iter().enumerate() {
        match scrape_patent(fetcher, store, opts, id, false) {
            Ok(_) => {
                summary.fetched += 1;
                progress.item_done(id);
            }
            Err(e) => {
                warn!("{id}: {e}");
                progress.item_failed(id, &e.to_string());
                summary.failed.push((id.clone(), e.to_string()));
            }
        }
        if i + 1 < identifiers.len() {
            pause(opts);
        }
    }

    progress.finish();
    info!(fetched = summary.fetched, failed = summary.failed.len(), "list done");
    summary
}

/// First results page for `query`.
pub fn search_url(opts: &ScrapeOptions, query: &SearchQuery) -> Result<String> {
    let q = query.to_query()?;
    let base = join!(opts.origin(), SEARCH_PATH);
    let mut url = Url::parse(&base)
        .map_err(|e| ScrapeError::InvalidUrl { url: base.clone(), reason: e.to_string() })?;
    url.query_pairs_mut()
        .append_pair("Sect1", "PTO2")
        .append_pair("Sect2", "HITOFF")
        .append_pair("p", "1")
        .append_pair("u", SEARCH_FORM)
        .append_pair("r", "0")
        .append_pair("f", "S")
        .append_pair("l", &opts.results_per_page.to_string())
        .append_pair("d", "PTXT")
        .append_pair("OS", &q)
        .append_pair("RS", &q)
        .append_pair("Query", &q);
    Ok(url.into())
}

/// Next-page links are site-relative; resolve them against the base URL.
pub fn absolute_url(opts: &ScrapeOptions, link: &str) -> Result<String> {
    let base = join!(opts.origin(), "/");
    let base_url = Url::parse(&base)
        .map_err(|e| ScrapeError::InvalidUrl { url: base.clone(), reason: e.to_string() })?;
    let url = base_url
        .join(link)
        .map_err(|e| ScrapeError::InvalidUrl { url: link.to_string(), reason: e.to_string() })?;
    Ok(url.into())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub identifiers: Vec<String>,
    /// "out of N" from the first page, when printed.
    pub total: Option<u64>,
    pub pages: usize,
}

/// Sequential paging: stop when a page has no next link or `max_pages` pages
/// were read. A page that fails to load ends the crawl with an error.
pub fn crawl_search(
    fetcher: &dyn Fetch,
    opts: &ScrapeOptions,
    query: &SearchQuery,
    progress: &mut dyn Progress,
) -> Result<SearchOutcome> {
    let mut outcome = SearchOutcome::default();
    let mut next = Some(search_url(opts, query)?);
    progress.begin(opts.max_pages);
    progress.log(&format!("Searching: {}", query.to_query()?));

    while let Some(url) = next.take() {
        if outcome.pages >= opts.max_pages {
            info!(max_pages = opts.max_pages, "page limit reached");
            break;
        }
        if outcome.pages > 0 {
            pause(opts);
        }
        let html = fetch_document(fetcher, &url, opts.min_document_len)?;
        let page = specs::search::parse_results_page(&html);
        if outcome.pages == 0 {
            outcome.total = specs::search::parse_total_count(&html);
        }
        outcome.pages += 1;
        debug!(page = outcome.pages, hits = page.identifiers.len(), "results page");
        progress.item_done(&format!("page {} ({} hits)", outcome.pages, page.identifiers.len()));

        outcome.identifiers.extend(page.identifiers);
        next = page.next_page.map(|link| absolute_url(opts, &link)).transpose()?;
    }

    progress.finish();
    info!(
        hits = outcome.identifiers.len(),
        pages = outcome.pages,
        total = ?outcome.total,
        "search done"
    );
    Ok(outcome)
}

fn pause(opts: &ScrapeOptions) {
    if opts.request_pause_ms > 0 {
        thread::sleep(Duration::from_millis(opts.request_pause_ms));
    }
}
