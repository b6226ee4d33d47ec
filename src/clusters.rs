// src/clusters.rs
//! Reader for k-means cluster dumps run over a patent list.
//!
//! Input is a pair of files: the text dump (one `:VL-<id>{n=<count> ...`
//! chunk per cluster, each with a "Top Terms" block) and the matching CSV of
//! document assignments.

use std::{fs, io, path::Path};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::csv::parse_rows;
use crate::error::{Result, ScrapeError};

const CLUSTER_SEPARATOR: &str = ":VL-";

static CLUSTER_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\{n=(\d+)").unwrap());
static TOP_TERMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)Top Terms:(.*?)Weight :").unwrap());
static TERM_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.*)=>(.*)").unwrap());

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TermWeight {
    pub term: String,
    pub weight: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cluster {
    pub id: String,
    pub num_docs: u64,
    pub terms: Vec<TermWeight>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterDump {
    pub text: String,
    pub rows: Vec<Vec<String>>,
}

impl ClusterDump {
    /// Both files must exist.
    pub fn read(txt: &Path, csv: &Path) -> Result<Self> {
        for p in [txt, csv] {
            if !p.exists() {
                return Err(ScrapeError::MissingInput(p.to_path_buf()));
            }
        }
        let text = read_input(txt)?;
        let rows = parse_rows(&read_input(csv)?, ',')
            .into_iter()
            .map(|row| row.into_iter().map(|f| f.trim_matches('/').to_string()).collect())
            .collect();
        Ok(Self { text, rows })
    }

    pub fn clusters(&self) -> Vec<Cluster> {
        parse_clusters(&self.text)
    }
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScrapeError::MissingInput(path.to_path_buf()),
        _ => e.into(),
    })
}

pub fn parse_clusters(text: &str) -> Vec<Cluster> {
    let clusters: Vec<Cluster> = text.split(CLUSTER_SEPARATOR).filter_map(parse_cluster).collect();
    info!(clusters = clusters.len(), "parsed cluster dump");
    clusters
}

fn parse_cluster(chunk: &str) -> Option<Cluster> {
    let head = CLUSTER_HEADER.captures(chunk)?;
    let num_docs = head[2].parse().ok()?;
    let terms = TOP_TERMS
        .captures(chunk)
        .map(|block| {
            TERM_LINE
                .captures_iter(&block[1])
                .map(|t| TermWeight {
                    term: t[1].trim().to_string(),
                    weight: t[2].trim().parse().unwrap_or(0.0),
                })
                .collect()
        })
        .unwrap_or_default();
    Some(Cluster { id: head[1].to_string(), num_docs, terms })
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterShare {
    pub id: String,
    pub num_docs: u64,
    /// Fraction of all documents, 0..=1.
    pub share: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterStats {
    pub num_docs: u64,
    pub num_clusters: usize,
    pub avg: Option<f64>,
    pub min: Option<u64>,
    pub max: Option<u64>,
    /// Sample standard deviation (n - 1).
    pub std_dev: Option<f64>,
    pub shares: Vec<ClusterShare>,
}

pub fn summarize(clusters: &[Cluster]) -> ClusterStats {
    let num_docs: u64 = clusters.iter().map(|c| c.num_docs).sum();
    let num_clusters = clusters.len();
    let avg = (num_clusters > 0).then(|| num_docs as f64 / num_clusters as f64);
    let std_dev = match avg {
        Some(avg) if num_clusters > 1 => {
            let sum_sq: f64 = clusters.iter().map(|c| (c.num_docs as f64 - avg).powi(2)).sum();
            Some((sum_sq / (num_clusters as f64 - 1.0)).sqrt())
        }
        _ => None,
    };
    let shares = clusters
        .iter()
        .map(|c| ClusterShare {
            id: c.id.clone(),
            num_docs: c.num_docs,
            share: if num_docs == 0 { 0.0 } else { c.num_docs as f64 / num_docs as f64 },
        })
        .collect();

    ClusterStats {
        num_docs,
        num_clusters,
        avg,
        min: clusters.iter().map(|c| c.num_docs).min(),
        max: clusters.iter().map(|c| c.num_docs).max(),
        std_dev,
        shares,
    }
}
