// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::config::options::ExportOptions;
use crate::error::{Error, Result};
use crate::model::Table;
use crate::project::Projection;

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io { path: path.to_path_buf(), source }
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(io_err(dir))
}

/// Write `data` as JSON. Pretty output is indented by four spaces.
/// Map keys come out sorted: records and projections are built that way.
pub fn write_json<T: Serialize + ?Sized>(data: &T, path: &Path, pretty: bool) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent)?;
    }

    let file = File::create(path).map_err(io_err(path))?;
    let mut w = BufWriter::new(file);
    if pretty {
        let mut ser = Serializer::with_formatter(&mut w, PrettyFormatter::with_indent(b"    "));
        data.serialize(&mut ser)?;
    } else {
        serde_json::to_writer(&mut w, data)?;
    }
    w.flush().map_err(io_err(path))?;
    Ok(path.to_path_buf())
}

/// Write the consolidated tables and, when given, the projection.
/// Returns every path written.
pub fn export(
    export: &ExportOptions,
    tables: &[Table],
    projection: Option<&Projection>,
) -> Result<Vec<PathBuf>> {
    let mut written = vec![write_json(tables, &export.tables_path(), export.pretty)?];

    if let Some(p) = projection {
        written.push(write_json(&p.list, &export.list_path(), export.pretty)?);
        written.push(write_json(&p.by_name, &export.dict_path(), export.pretty)?);
    }

    for path in &written {
        logf!("Wrote {}", path.display());
    }
    Ok(written)
}
