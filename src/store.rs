// src/store.rs
//! On-disk cache under the storage root.
//!
//! One raw page (`<key>.html`) and one parsed record (`<key>.dat`, JSON) per
//! patent, keyed by [`PatentNumber::query_key`]. The search crawl writes its
//! identifiers to a plain text file, one per line.

use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::config::consts::{HTML_EXT, RECORD_EXT};
use crate::error::{Result, ScrapeError};
use crate::file::ensure_directory;
use crate::record::{PatentNumber, PatentRecord};

#[derive(Clone, Debug)]
pub struct PatentStore {
    root: PathBuf,
}

impl PatentStore {
    /// Does not touch the filesystem.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Like [`new`](Self::new), creating the root directory if missing.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let store = Self::new(root);
        ensure_directory(&store.root)?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, number: &PatentNumber, ext: &str) -> PathBuf {
        self.root.join(join!(number.query_key(), ".", ext))
    }

    /// `Ok(None)` when nothing is cached.
    pub fn load_html(&self, number: &PatentNumber) -> Result<Option<String>> {
        read_optional(&self.path_for(number, HTML_EXT))
    }

    pub fn save_html(&self, number: &PatentNumber, html: &str) -> Result<PathBuf> {
        let path = self.path_for(number, HTML_EXT);
        ensure_directory(&self.root)?;
        fs::write(&path, html)?;
        debug!(path = %path.display(), bytes = html.len(), "cached page");
        Ok(path)
    }

    pub fn load_record(&self, number: &PatentNumber) -> Result<Option<PatentRecord>> {
        match read_optional(&self.path_for(number, RECORD_EXT))? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Records without a patent number have no key and cannot be stored.
    pub fn save_record(&self, record: &PatentRecord) -> Result<PathBuf> {
        let number = record.patent_number().ok_or(ScrapeError::MissingIdentifier)?;
        self.save_record_as(number, record)
    }

    /// Store `record` under `number`'s key, whatever number the record
    /// itself carries. Keeps the `.dat` next to the `.html` it came from.
    pub fn save_record_as(&self, number: &PatentNumber, record: &PatentRecord) -> Result<PathBuf> {
        let path = self.path_for(number, RECORD_EXT);
        ensure_directory(&self.root)?;
        let file = fs::File::create(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, record)?;
        writer.flush()?;
        debug!(path = %path.display(), "saved record");
        Ok(path)
    }

    /// Every `.dat` record under the root, ordered by patent number. Files
    /// that do not deserialize are skipped with a warning.
    pub fn load_all_records(&self) -> Result<Vec<PatentRecord>> {
        let mut records = Vec::new();
        if !self.root.is_dir() {
            return Ok(records);
        }
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some(RECORD_EXT) { continue; }
            let text = fs::read_to_string(&path)?;
            match serde_json::from_str::<PatentRecord>(&text) {
                Ok(r) => records.push(r),
                Err(e) => warn!(path = %path.display(), "skipping unreadable record: {e}"),
            }
        }
        records.sort_by_key(|r| r.numeric_patent_number());
        Ok(records)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Identifiers from a results file. Blank lines are skipped.
pub fn read_results(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScrapeError::MissingInput(path.to_path_buf()),
        _ => e.into(),
    })?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn write_results(path: &Path, identifiers: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut writer = BufWriter::new(fs::File::create(path)?);
    for id in identifiers {
        writeln!(writer, "{id}")?;
    }
    writer.flush()?;
    Ok(())
}
