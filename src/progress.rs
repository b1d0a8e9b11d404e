// src/progress.rs
/// Lightweight progress reporting used by the crawl.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A listing page was extracted and merged.
    fn page_done(&mut self, _index: usize, _path: &str, _tables: usize) {}

    /// A listing page failed and was skipped.
    fn page_skipped(&mut self, _index: usize, _path: &str, _reason: &str) {}

    /// Called at the end of a crawl that did not fail.
    fn finish(&mut self) {}
}
