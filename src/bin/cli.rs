// src/bin/cli.rs
fn main() -> color_eyre::Result<()> {
    table_crawl::cli::run()
}
