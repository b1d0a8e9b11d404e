// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::options::AppOptions,
    crawl::Crawler,
    error::Result,
    file,
    model::Table,
    progress::Progress,
    project::{self, Projection},
    source::{HttpSource, PageSource},
};

/// Summary of what was produced.
pub struct RunSummary {
    pub tables: Vec<Table>,
    pub projection: Option<Projection>,
    pub files_written: Vec<PathBuf>,
}

/// Top-level runner: crawl over HTTP, project if asked, export.
pub fn run(opts: &AppOptions, progress: Option<&mut (dyn Progress + '_)>) -> Result<RunSummary> {
    let source = HttpSource::new(&opts.fetch)?;
    run_with_source(source, opts, progress)
}

/// Same as [`run`] with any page source, e.g. captured fixtures.
pub fn run_with_source<S: PageSource>(
    source: S,
    opts: &AppOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary> {
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Crawling from {}", opts.fetch.start_path));
    }

    let crawler = Crawler::new(source, opts.crawl.clone());
    let tables = crawler.crawl_with_progress(&opts.fetch.start_path, progress.as_deref_mut())?;

    let projection = match &opts.export.project {
        Some(spec) => Some(project::project(&tables, spec)?),
        None => None,
    };

    let files_written = file::export(&opts.export, &tables, projection.as_ref())?;
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("{} table(s), {} file(s) written", tables.len(), files_written.len()));
    }

    Ok(RunSummary { tables, projection, files_written })
}
