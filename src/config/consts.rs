// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "http://patft.uspto.gov";
pub const PATENT_NUMBER_SLOT: &str = "<PATENT_NUMBER>";
/// Single patent, full text. The number goes into `PATENT_NUMBER_SLOT`.
pub const PATENT_PATH: &str = "/netacgi/nph-Parser?Sect2=PTO1&Sect2=HITOFF&p=1&u=%2Fnetahtml%2FPTO%2Fsearch-bool.html&r=1&f=G&l=50&d=PALL&RefSrch=yes&Query=PN%2F<PATENT_NUMBER>";
/// Advanced search results. Query parameters are appended by the crawler.
pub const SEARCH_PATH: &str = "/netacgi/nph-Parser";
pub const SEARCH_FORM: &str = "/netahtml/PTO/search-adv.htm";
pub const USER_AGENT: &str = concat!("patent_scrape/", env!("CARGO_PKG_VERSION"));
pub const REFERER: &str = "patent_scrape";
pub const TIMEOUT_SECS: u64 = 120; // USPTO can be slow sometimes

// Anything shorter is an error page, not a document
pub const MIN_DOCUMENT_LEN: usize = 10;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const RESULTS_FILE: &str = "search_results.txt";
pub const LOG_FILE: &str = "debug.log";
pub const HTML_EXT: &str = "html";
pub const RECORD_EXT: &str = "dat";

// Crawl
pub const MAX_PAGES: usize = 20;
pub const RESULTS_PER_PAGE: u32 = 50;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite

// Export
pub const DEFAULT_EXPORT_FILE: &str = "patents";
