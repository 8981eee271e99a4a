pub mod export;
pub mod output;

pub use export::{to_delimited_text, write_delimited};
pub use output::{create_writer, JsonWriter, MarkdownWriter, OutputWriter, TerminalWriter};

use crate::core::errors::{Error, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Read a whole input file as bytes.
///
/// # Errors
///
/// Returns [`Error::FileSystem`] carrying the path when the file cannot be
/// read.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::file_system_io("Failed to read input file", path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    fs::write(path, content).map_err(|e| Error::file_system_io("Failed to write file", path, e))
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| Error::file_system_io("Failed to create directory", path, e))?;
    }
    Ok(())
}

/// Buffered writer for `path`, or stdout when no path is given.
pub fn destination(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_dir(parent)?;
            }
            let file = fs::File::create(path)
                .map_err(|e| Error::file_system_io("Failed to create output file", path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}
