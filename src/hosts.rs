//! Mapping-file parsing module
//!
//! Responsible for:
//! - Reading the authoritative (address, hostname) mapping file
//! - Skipping comments and blank lines
//! - Discarding lines that do not split into exactly two tokens

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::MappingEntry;

/// Read a mapping file into ordered entries.
///
/// One entry per line, fields separated by whitespace, first field the
/// address, second the hostname. Lines whose first non-whitespace character
/// is `#` are comments. Malformed lines are skipped silently, not errors.
pub fn load_mapping(path: &Path) -> Result<Vec<MappingEntry>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open mapping file {}", path.display()))?;
    parse_mapping(BufReader::new(file))
}

/// Parse mapping entries from any line-oriented reader
pub fn parse_mapping<R: BufRead>(reader: R) -> Result<Vec<MappingEntry>> {
    let mut entries = Vec::new();

    for line in reader.lines() {
        let line = line.context("Failed to read mapping line")?;
        if let Some(entry) = parse_line(&line) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Parse a single line into an entry, or None for comments, blanks, and
/// lines with a token count other than 2
fn parse_line(line: &str) -> Option<MappingEntry> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut tokens = trimmed.split_whitespace();
    let address = tokens.next()?;
    let hostname = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }

    Some(MappingEntry {
        address: address.to_string(),
        hostname: hostname.to_string(),
    })
}
