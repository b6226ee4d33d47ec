// src/cli.rs
use std::{fs, path::PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, bail};
use tracing::info;

use crate::clusters::{ClusterDump, summarize};
use crate::config::{ExportFormat, ScrapeOptions, consts::*};
use crate::core::HttpFetcher;
use crate::file::{resolve_single_out_path, write_export};
use crate::progress::LogProgress;
use crate::query::{FIELD_CODES, SearchQuery, describe};
use crate::record::{PatentRecord, SUMMARY_HEADERS};
use crate::{log, scrape, store};

#[derive(Debug, Parser)]
#[command(name = "patent_scrape", version, about = "Scrape and parse USPTO full-text patent pages")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Site root for patent and search pages.
    #[arg(long, global = true, env = "PATENT_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    /// Cache directory (pages, records, results list, debug.log).
    #[arg(long, global = true, env = "PATENT_STORE", default_value = STORE_DIR)]
    pub store: PathBuf,

    #[arg(long, global = true, default_value_t = MAX_PAGES)]
    pub max_pages: usize,

    #[arg(long, global = true, default_value_t = RESULTS_PER_PAGE)]
    pub per_page: u32,

    /// HTTP timeout in seconds.
    #[arg(long, global = true, default_value_t = TIMEOUT_SECS)]
    pub timeout: u64,

    /// -v info, -vv debug, -vvv trace.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GlobalOpts {
    pub fn scrape_options(&self) -> ScrapeOptions {
        ScrapeOptions {
            base_url: self.base_url.clone(),
            max_pages: self.max_pages,
            results_per_page: self.per_page,
            storage_root: self.store.clone(),
            timeout_secs: self.timeout,
            ..Default::default()
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch (or load from cache) and parse patents.
    Fetch {
        #[arg(required = true)]
        numbers: Vec<String>,
        /// Ignore cached pages.
        #[arg(long)]
        refresh: bool,
        /// Print full records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Parse a saved page without touching the network.
    Parse {
        file: PathBuf,
        /// Number to assume if the page does not print one.
        #[arg(long, default_value = "")]
        number: String,
        #[arg(long)]
        json: bool,
    },
    /// Run a search and write the hits to the results list.
    Search {
        /// CODE=VALUE, repeatable. See `terms`.
        #[arg(long = "term", required = true)]
        terms: Vec<String>,
        /// Results list path (default: <store>/search_results.txt).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Fetch every patent in a results list.
    FetchList {
        /// Results list path (default: <store>/search_results.txt).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Write cached records as one summary row each.
    Export {
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// File or directory; empty means <store>/patents.<ext>.
        #[arg(short, long, default_value = "")]
        out: String,
        #[arg(long)]
        no_headers: bool,
    },
    /// Statistics over a k-means cluster dump.
    Clusters { txt: PathBuf, csv: PathBuf },
    /// List search field codes, or describe one.
    Terms {
        /// e.g. `TI`, `asnm`
        code: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
}

impl From<Format> for ExportFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let opts = cli.global.scrape_options();
    let log_path = opts.log_path();
    log::init(&log_path, cli.global.verbose)
        .wrap_err_with(|| format!("Cannot open log file {}", log_path.display()))?;
    info!("patent_scrape v{}", env!("CARGO_PKG_VERSION"));
    dispatch(cli.command, &opts)
}

fn dispatch(command: Command, opts: &ScrapeOptions) -> Result<()> {
    match command {
        Command::Fetch { numbers, refresh, json } => {
            let fetcher = HttpFetcher::new(opts)?;
            let store = store::PatentStore::open(&opts.storage_root)?;
            for n in &numbers {
                let record = scrape::scrape_patent(&fetcher, &store, opts, n, refresh)
                    .wrap_err_with(|| format!("Fetching {n}"))?;
                print_record(&record, json)?;
            }
        }
        Command::Parse { file, number, json } => {
            let html = fs::read_to_string(&file)
                .wrap_err_with(|| format!("Reading {}", file.display()))?;
            print_record(&PatentRecord::parse(&number, &html), json)?;
        }
        Command::Search { terms, out } => {
            let mut query = SearchQuery::new();
            for t in &terms {
                let Some((code, value)) = SearchQuery::parse_term(t) else {
                    bail!("Expected CODE=VALUE, got {t:?}");
                };
                query.add_term(&code, &value);
            }
            let fetcher = HttpFetcher::new(opts)?;
            let outcome = scrape::crawl_search(&fetcher, opts, &query, &mut LogProgress::default())?;
            let path = out.unwrap_or_else(|| opts.results_path());
            store::write_results(&path, &outcome.identifiers)?;
            let total = outcome.total.map(|t| format!(" of {t}")).unwrap_or_default();
            println!(
                "{} hits{total} over {} pages → {}",
                outcome.identifiers.len(),
                outcome.pages,
                path.display()
            );
        }
        Command::FetchList { input } => {
            let path = input.unwrap_or_else(|| opts.results_path());
            let ids = store::read_results(&path)?;
            let fetcher = HttpFetcher::new(opts)?;
            let store = store::PatentStore::open(&opts.storage_root)?;
            let summary = scrape::fetch_list(&fetcher, &store, opts, &ids, &mut LogProgress::default());
            println!("Fetched {} of {}", summary.fetched, ids.len());
            for (id, reason) in &summary.failed {
                println!("  {id}: {reason}");
            }
        }
        Command::Export { format, out, no_headers } => {
            let format = ExportFormat::from(format);
            let store = store::PatentStore::new(&opts.storage_root);
            let rows: Vec<Vec<String>> =
                store.load_all_records()?.iter().map(PatentRecord::summary_row).collect();
            let path = resolve_single_out_path(&out, &opts.default_export_path(format))?;
            let headers: Vec<String> = SUMMARY_HEADERS.iter().map(|h| s!(*h)).collect();
            let written = write_export(&path, format, (!no_headers).then_some(&headers[..]), &rows)?;
            println!("Wrote {} rows → {}", rows.len(), written.display());
        }
        Command::Clusters { txt, csv } => {
            let dump = ClusterDump::read(&txt, &csv)?;
            let clusters = dump.clusters();
            let stats = summarize(&clusters);
            println!("{}", serde_json::to_string_pretty(&clusters)?);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Terms { code: Some(code) } => {
            let Some(desc) = describe(&code) else {
                bail!("Unknown search field {code:?}; run `terms` for the list");
            };
            println!("{} => {desc}", code.to_ascii_uppercase());
        }
        Command::Terms { code: None } => {
            println!("The following search fields are available.\n");
            for (code, desc) in FIELD_CODES {
                println!("\t{code} => {desc}");
            }
        }
    }
    Ok(())
}

fn print_record(record: &PatentRecord, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }
    let na = "-";
    println!("{}", record.patent_number().map(|n| n.to_string()).unwrap_or_else(|| s!(na)));
    println!("  Title:     {}", record.title().unwrap_or(na));
    println!("  Issued:    {}", record.issue_date().unwrap_or(na));
    println!("  Filed:     {}", record.filed_date().unwrap_or(na));
    println!("  Assignee:  {}", record.assignee().unwrap_or(na));
    if let Some(inventors) = record.inventors() {
        let names: Vec<&str> = inventors.iter().map(|i| i.name.as_str()).collect();
        println!("  Inventors: {}", names.join("; "));
    }
    if let Some(classes) = record.current_us_class() {
        println!("  US class:  {}", classes.join("; "));
    }
    if let Some(refs) = record.referenced_patents() {
        println!("  Cites:     {} patents", refs.len());
    }
    Ok(())
}
