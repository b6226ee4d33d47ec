// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;

/// Everything the fetch/crawl collaborators need. The parsers take none of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub base_url: String,
    pub max_pages: usize,
    pub results_per_page: u32,
    pub storage_root: PathBuf,
    pub timeout_secs: u64,
    pub min_document_len: usize,
    pub request_pause_ms: u64,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            max_pages: MAX_PAGES,
            results_per_page: RESULTS_PER_PAGE,
            storage_root: PathBuf::from(STORE_DIR),
            timeout_secs: TIMEOUT_SECS,
            min_document_len: MIN_DOCUMENT_LEN,
            request_pause_ms: REQUEST_PAUSE_MS,
        }
    }
}

impl ScrapeOptions {
    /// Base URL without a trailing slash, ready for a path to be appended.
    pub fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn results_path(&self) -> PathBuf {
        self.storage_root.join(RESULTS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.storage_root.join(LOG_FILE)
    }

    pub fn default_export_path(&self, format: ExportFormat) -> PathBuf {
        self.storage_root.join(join!(DEFAULT_EXPORT_FILE, ".", format.ext()))
    }

    pub fn with_storage_root<P: AsRef<Path>>(mut self, root: P) -> Self {
        self.storage_root = root.as_ref().to_path_buf();
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}
