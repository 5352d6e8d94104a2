//! Copying texts between GMD documents

use super::document::GmdDocument;
use crate::error::{Error, Result};

/// Result of a merge
#[derive(Debug, Clone, Default)]
pub struct MergeResult {
    /// Number of labels whose text was copied
    pub updated: usize,
    /// Names of target labels with no counterpart in the source
    pub unmatched: Vec<String>,
}

impl GmdDocument {
    /// Copy label texts from `source` into this document.
    ///
    /// Without named labels the two documents must have the same number of
    /// labels, and texts are copied by position. With named labels, each
    /// label takes the text of the first source label with the same name;
    /// labels without a match, or without a name, keep their text.
    ///
    /// Names are not compared raw: an unnamed target label is never paired
    /// with an unnamed source label, so texts past the named labels are left
    /// as they are.
    ///
    /// # Errors
    /// Returns [`Error::DocumentNotLoaded`] if either document is unloaded and
    /// [`Error::RecordCountMismatch`] if a positional merge has mismatched
    /// label counts. Nothing is changed on error.
    pub fn merge_texts_from(&mut self, source: &GmdDocument) -> Result<MergeResult> {
        if !self.is_loaded() || !source.is_loaded() {
            return Err(Error::DocumentNotLoaded);
        }

        let mut result = MergeResult::default();

        if !self.has_named_labels() {
            if self.len() != source.len() {
                return Err(Error::RecordCountMismatch {
                    expected: self.len(),
                    found: source.len(),
                });
            }
            for (target, from) in self.labels.iter_mut().zip(source.labels()) {
                target.set_text(from.text().to_string());
                result.updated += 1;
            }
            return Ok(result);
        }

        for target in &mut self.labels {
            if target.name().is_empty() {
                continue;
            }
            match source.labels().iter().find(|l| l.name() == target.name()) {
                Some(from) => {
                    target.set_text(from.text().to_string());
                    result.updated += 1;
                }
                None => result.unmatched.push(target.name().to_string()),
            }
        }

        tracing::debug!(
            "Merged {} labels, {} without a match",
            result.updated,
            result.unmatched.len()
        );
        Ok(result)
    }
}
