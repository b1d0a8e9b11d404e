// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::consts::{DEFAULT_OUT_DIR, TIMEOUT_SECS};
use crate::config::options::{
    AppOptions, CrawlOptions, ErrorPolicy, ExportOptions, FetchOptions, ProjectionSpec,
};
use crate::progress::Progress;

/// Crawl a paginated HTML listing and consolidate its tables into JSON.
#[derive(Debug, Parser)]
#[command(name = "table_crawl", version, about)]
pub struct Args {
    /// Site root every link is resolved against
    #[arg(long)]
    pub base_url: String,

    /// First listing page, relative to the base URL
    #[arg(long, default_value = "/")]
    pub start: String,

    /// Directory for tables.json (and list.json / dict.json)
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub out_dir: PathBuf,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// What a failed hyperlink expansion does
    #[arg(long, value_enum, default_value_t = Policy::Abort)]
    pub on_link_error: Policy,

    /// What a failed listing page does
    #[arg(long, value_enum, default_value_t = Policy::Abort)]
    pub on_page_error: Policy,

    /// Follow links even into pages that are already being expanded
    #[arg(long)]
    pub no_cycle_guard: bool,

    /// Stop after this many listing pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    #[arg(long, default_value_t = TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Keep raw whitespace instead of minifying pages before parsing
    #[arg(long)]
    pub no_minify: bool,

    /// Also write list.json and dict.json built from each row's detail page
    #[arg(long)]
    pub project: bool,

    /// Projection: listing table index
    #[arg(long, requires = "project")]
    pub project_table: Option<usize>,

    /// Projection: listing column holding the detail link
    #[arg(long, requires = "project")]
    pub link_column: Option<usize>,

    /// Projection: detail column holding key attribute and value
    #[arg(long, requires = "project")]
    pub key_column: Option<usize>,

    /// Projection: attribute naming each detail field
    #[arg(long, requires = "project")]
    pub key_attr: Option<String>,

    /// Projection: field keying entries in dict.json
    #[arg(long, requires = "project")]
    pub name_field: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    Abort,
    Skip,
}

impl From<Policy> for ErrorPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Abort => ErrorPolicy::Abort,
            Policy::Skip => ErrorPolicy::Skip,
        }
    }
}

impl Args {
    pub fn into_options(self) -> AppOptions {
        let project = self.project.then(|| {
            let d = ProjectionSpec::default();
            ProjectionSpec {
                table: self.project_table.unwrap_or(d.table),
                link_column: self.link_column.unwrap_or(d.link_column),
                key_column: self.key_column.unwrap_or(d.key_column),
                key_attr: self.key_attr.clone().unwrap_or(d.key_attr),
                name_field: self.name_field.clone().unwrap_or(d.name_field),
            }
        });

        AppOptions {
            fetch: FetchOptions {
                base_url: self.base_url,
                start_path: self.start,
                timeout_secs: self.timeout_secs,
                minify: !self.no_minify,
                ..Default::default()
            },
            crawl: CrawlOptions {
                on_link_error: self.on_link_error.into(),
                on_page_error: self.on_page_error.into(),
                guard_cycles: !self.no_cycle_guard,
                max_pages: self.max_pages,
            },
            export: ExportOptions {
                out_dir: self.out_dir,
                pretty: self.pretty,
                project,
            },
        }
    }
}

/// Prints crawl progress to stderr.
struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn page_done(&mut self, index: usize, path: &str, tables: usize) {
        eprintln!("[{index:>3}] {path}: {tables} table(s)");
    }
    fn page_skipped(&mut self, index: usize, path: &str, reason: &str) {
        eprintln!("[{index:>3}] {path}: skipped ({reason})");
    }
}

pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    crate::log::init()?;

    let opts = Args::parse().into_options();
    let summary = crate::runner::run(&opts, Some(&mut CliProgress))?;

    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_flags_to_options() {
        let args = Args::parse_from([
            "table_crawl",
            "--base-url", "http://listing.example",
            "--start", "/companies",
            "--on-link-error", "skip",
            "--no-cycle-guard",
            "--project",
            "--key-attr", "data-field",
        ]);
        let opts = args.into_options();

        assert_eq!(opts.fetch.base_url, "http://listing.example");
        assert_eq!(opts.fetch.start_path, "/companies");
        assert!(opts.fetch.minify);
        assert_eq!(opts.crawl.on_link_error, ErrorPolicy::Skip);
        assert_eq!(opts.crawl.on_page_error, ErrorPolicy::Abort);
        assert!(!opts.crawl.guard_cycles);

        let spec = opts.export.project.unwrap();
        assert_eq!(spec.key_attr, "data-field");
        assert_eq!(spec.link_column, 1);
    }

    #[test]
    fn projection_flags_require_project() {
        let res = Args::try_parse_from([
            "table_crawl", "--base-url", "http://x", "--key-attr", "id",
        ]);
        assert!(res.is_err());
    }
}
