//! Reading chat exports from disk
//!
//! Thin layer between the filesystem and the parser: structural path
//! validation, an existence check with a useful error, then a buffered
//! line-by-line read into the pipeline.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};
use crate::parse::TranscriptParser;
use crate::path::{is_valid_path, PathStyle};
use crate::types::{ImportOptions, ParseResult};

/// Load and parse an exported chat file from disk.
///
/// The path is validated structurally for the native platform style before
/// any filesystem access.
pub fn parse_chat_path(path: &Path, options: &ImportOptions) -> Result<ParseResult> {
    let style = PathStyle::native();
    let display_path = path.display().to_string();

    if !is_valid_path(&display_path, style) {
        return Err(Error::InvalidPath(format!(
            "{} is not a valid {} path",
            display_path, style
        )));
    }

    if !path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            display_path,
        )));
    }

    let file = File::open(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to open {}: {}", display_path, e),
        ))
    })?;

    tracing::info!(path = %display_path, "Parsing chat export");
    parse_chat_reader(BufReader::new(file), options)
}

/// Parse an exported chat from any buffered reader.
pub fn parse_chat_reader<R: BufRead>(reader: R, options: &ImportOptions) -> Result<ParseResult> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    TranscriptParser::new(options.clone()).parse_lines(lines)
}
