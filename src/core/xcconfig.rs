//! The textual `.xcconfig` format.
//!
//! Output is one `KEY = value` line per setting, in table order, each line
//! terminated by `\n`. The reader accepts the same format plus `//` comments
//! and `#include` directives, which is enough to compare a file on disk with
//! a freshly generated table.

use std::path::Path;

use anyhow::Result;
use indexmap::IndexMap;
use thiserror::Error;

use crate::core::settings::SettingsTable;
use crate::util::fs::write_string;

/// Errors found while reading an xcconfig.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XcconfigError {
    #[error("line {line}: expected `KEY = value`, found `{content}`")]
    MissingAssignment { line: usize, content: String },

    #[error("line {line}: empty setting name")]
    EmptyKey { line: usize },
}

/// A parsed xcconfig document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Xcconfig {
    /// Paths of `#include` directives, in file order
    pub includes: Vec<String>,

    pub settings: SettingsTable,
}

/// Render a settings table as xcconfig text.
pub fn render(table: &SettingsTable) -> String {
    table.to_string()
}

/// Write a settings table to `path`, creating parent directories.
pub fn save(table: &SettingsTable, path: &Path) -> Result<()> {
    write_string(path, &render(table))
}

/// Parse xcconfig text. A repeated key keeps its last value, as Xcode does.
pub fn parse(contents: &str) -> Result<Xcconfig, XcconfigError> {
    let mut includes = Vec::new();
    let mut entries = IndexMap::new();

    for (index, raw) in contents.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("#include") {
            let path = rest.trim().trim_start_matches('?').trim().trim_matches('"');
            includes.push(path.to_string());
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(XcconfigError::MissingAssignment {
                line: line_no,
                content: line.to_string(),
            });
        };

        let key = key.trim();
        if key.is_empty() {
            return Err(XcconfigError::EmptyKey { line: line_no });
        }

        entries.insert(key.to_string(), value.trim().to_string());
    }

    Ok(Xcconfig {
        includes,
        settings: SettingsTable::from(entries),
    })
}

/// Drop a trailing `//` comment. `//` inside a value such as a URL is kept
/// when it is not preceded by whitespace or at the line start.
fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut search = 0;
    while let Some(pos) = line[search..].find("//") {
        let at = search + pos;
        if at == 0 || bytes[at - 1].is_ascii_whitespace() {
            return &line[..at];
        }
        search = at + 2;
    }
    line
}
