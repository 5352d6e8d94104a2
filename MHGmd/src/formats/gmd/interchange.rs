//! Line-based text export/import
//!
//! Export writes one line per label, fields separated by a tab:
//!
//! ```text
//! [text id<TAB>][name<TAB>]text
//! 0	NAME_001	Great Sword<br>Second line
//! ```
//!
//! Line breaks inside a text become [`LINE_BREAK_MARKER`] and are restored
//! as `\r\n` on import. No other escaping is applied. Files are UTF-8
//! without a byte-order mark.

use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::document::GmdDocument;
use crate::error::{Error, Result};

/// Marker standing in for a line break in exported text
pub const LINE_BREAK_MARKER: &str = "<br>";

/// Field separator
pub const DELIMITER: char = '\t';

/// Which columns go in front of the text on export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Prefix each line with the label's text id
    pub include_id: bool,
    /// Prefix each line with the label's name (only for documents with named labels)
    pub include_name: bool,
}

/// How imported lines are matched to labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImportMode {
    /// Line `i` updates label `i`
    #[default]
    Positional,
    /// The field before the text names the label to update
    ByName,
}

/// Result of importing texts
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of labels whose text was assigned
    pub updated: usize,
    /// Names from the input with no matching label (by-name mode)
    pub unmatched: Vec<String>,
}

/// Render a document as export lines
///
/// # Errors
/// Returns [`Error::EmptyDocument`] for a document with no labels.
pub fn export_lines(doc: &GmdDocument, options: ExportOptions) -> Result<Vec<String>> {
    if doc.is_empty() {
        return Err(Error::EmptyDocument);
    }

    let with_name = options.include_name && doc.has_named_labels();
    let lines = doc
        .labels()
        .iter()
        .map(|label| {
            let mut line = String::new();
            if options.include_id {
                line.push_str(&label.text_id().to_string());
                line.push(DELIMITER);
            }
            if with_name {
                line.push_str(&label.display_name());
                line.push(DELIMITER);
            }
            line.push_str(&encode_line_breaks(label.text()));
            line
        })
        .collect();

    Ok(lines)
}

/// Export a document to a file, one line per label
///
/// # Errors
/// Returns an error if the document has no labels or the file cannot be written.
pub fn export_to_path<P: AsRef<Path>>(
    doc: &GmdDocument,
    path: P,
    options: ExportOptions,
) -> Result<usize> {
    let lines = export_lines(doc, options)?;

    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for line in &lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;

    Ok(lines.len())
}

/// Assign texts from export lines.
///
/// The line count must equal the label count; otherwise nothing is changed.
///
/// # Errors
/// Returns [`Error::RecordCountMismatch`] on a count mismatch and
/// [`Error::InvalidRecord`] for a by-name line without a name field.
pub fn import_lines(doc: &mut GmdDocument, content: &str, mode: ImportMode) -> Result<ImportResult> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() != doc.len() {
        return Err(Error::RecordCountMismatch {
            expected: doc.len(),
            found: lines.len(),
        });
    }

    let mut result = ImportResult::default();

    match mode {
        ImportMode::Positional => {
            let texts: Vec<String> = lines
                .iter()
                .map(|line| decode_line_breaks(split_record(line).1))
                .collect();
            for (index, text) in texts.into_iter().enumerate() {
                doc.set_text(index, text)?;
                result.updated += 1;
            }
        }
        ImportMode::ByName => {
            let mut updates = Vec::with_capacity(lines.len());
            for (number, line) in lines.iter().enumerate() {
                let (name, text) = match split_record(line) {
                    (Some(name), text) => (name, text),
                    (None, _) => {
                        return Err(Error::InvalidRecord {
                            line: number + 1,
                            message: "missing name field".to_string(),
                        });
                    }
                };
                match doc.find_by_name(name) {
                    Some(label) => updates.push((label.text_id(), decode_line_breaks(text))),
                    None => result.unmatched.push(name.to_string()),
                }
            }
            for (index, text) in updates {
                doc.set_text(index, text)?;
                result.updated += 1;
            }
        }
    }

    if !result.unmatched.is_empty() {
        tracing::warn!("{} imported names matched no label", result.unmatched.len());
    }
    Ok(result)
}

/// Assign texts from an export file
///
/// # Errors
/// Returns an error if the file cannot be read or [`import_lines`] fails.
pub fn import_from_path<P: AsRef<Path>>(
    doc: &mut GmdDocument,
    path: P,
    mode: ImportMode,
) -> Result<ImportResult> {
    let content = std::fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{FEFF}').unwrap_or(&content);
    import_lines(doc, content, mode)
}

// ============================================================================
// Helper functions
// ============================================================================

/// Split a line into (name field, text field). The text is the last field,
/// the name the one before it.
fn split_record(line: &str) -> (Option<&str>, &str) {
    match line.rsplit_once(DELIMITER) {
        Some((front, text)) => {
            let name = front.rsplit(DELIMITER).next().unwrap_or(front);
            (Some(name), text)
        }
        None => (None, line),
    }
}

fn encode_line_breaks(text: &str) -> String {
    text.replace("\r\n", LINE_BREAK_MARKER)
        .replace('\n', LINE_BREAK_MARKER)
}

fn decode_line_breaks(text: &str) -> String {
    text.replace(LINE_BREAK_MARKER, "\r\n")
}
