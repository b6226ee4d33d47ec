// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::ExportFormat;
use crate::csv::rows_to_string;
use crate::error::Result;

/// Write one export file. Parent directories are created as needed.
/// Returns the final path written to.
pub fn write_export(
    path: &Path,
    format: ExportFormat,
    headers: Option<&[String]>,
    rows: &[Vec<String>],
) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, rows_to_string(rows, headers, format.delim()))?;
    Ok(path.to_path_buf())
}

/// A user-supplied `-o` value: empty means the default; a directory (or a
/// trailing separator) means "default file name inside it".
pub fn resolve_single_out_path(user_o: &str, default_path: &Path) -> Result<PathBuf> {
    if user_o.is_empty() { return Ok(default_path.to_path_buf()); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(user_o) || p.is_dir() {
        ensure_directory(&p)?;
        let name = default_path.file_name().map(PathBuf::from).unwrap_or_default();
        Ok(p.join(name))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &str) -> bool {
    p.ends_with('/') || p.ends_with('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_dir(name: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!("patent_scrape_file_{}", name));
        let _ = fs::remove_dir_all(&p);
        p
    }

    #[test]
    fn export_creates_parents() {
        let dir = tmp_dir("export");
        let path = dir.join("nested").join("out.tsv");
        let rows = vec![vec![s!("5,881,811"), s!("Stent")]];
        let headers = [s!("Patent"), s!("Title")];
        let written = write_export(&path, ExportFormat::Tsv, Some(&headers[..]), &rows).unwrap();
        assert_eq!(written, path);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Patent\tTitle\n5,881,811\tStent\n");
    }

    #[test]
    fn dir_hint_gets_default_file_name() {
        let dir = tmp_dir("hint");
        let hint = format!("{}/", dir.display());
        let out = resolve_single_out_path(&hint, Path::new(".store/patents.csv")).unwrap();
        assert_eq!(out.file_name().unwrap(), "patents.csv");
        assert!(dir.is_dir());

        let default = resolve_single_out_path("", Path::new(".store/patents.csv")).unwrap();
        assert_eq!(default, PathBuf::from(".store/patents.csv"));
    }

    #[test]
    fn file_in_the_way_is_an_error() {
        let dir = tmp_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("not_a_dir");
        fs::write(&file, "x").unwrap();
        assert!(ensure_directory(&file).is_err());
    }
}
