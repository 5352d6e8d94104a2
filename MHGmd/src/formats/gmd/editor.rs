//! GMD editing operations
//!
//! Labels keep their names, order and count; these operations only touch
//! label texts.

use super::document::GmdDocument;
use super::Label;
use crate::error::{Error, Result};

/// Result of a bulk replace operation
#[derive(Debug, Clone, Default)]
pub struct ReplaceResult {
    /// Number of labels modified
    pub labels_modified: usize,
    /// Total number of replacements made
    pub replacements: usize,
    /// Text ids of modified labels
    pub modified_ids: Vec<usize>,
}

impl GmdDocument {
    /// Get a label by index
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Replace the text of the label at `index`
    ///
    /// # Errors
    /// Returns [`Error::LabelIndexOutOfRange`] if there is no such label.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let count = self.labels.len();
        let label = self
            .labels
            .get_mut(index)
            .ok_or(Error::LabelIndexOutOfRange { index, count })?;
        label.set_text(text.into());
        Ok(())
    }

    /// First label whose display name is `name`
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.display_name() == name)
    }

    /// Labels whose display name contains `pattern` (case-insensitive)
    #[must_use]
    pub fn find_by_name_pattern(&self, pattern: &str) -> Vec<&Label> {
        let pattern = pattern.to_lowercase();
        self.labels
            .iter()
            .filter(|l| l.display_name().to_lowercase().contains(&pattern))
            .collect()
    }

    /// Labels whose text contains `text`
    #[must_use]
    pub fn find_by_text(&self, text: &str, case_sensitive: bool) -> Vec<&Label> {
        if case_sensitive {
            self.labels.iter().filter(|l| l.text().contains(text)).collect()
        } else {
            let text_lower = text.to_lowercase();
            self.labels
                .iter()
                .filter(|l| l.text().to_lowercase().contains(&text_lower))
                .collect()
        }
    }

    /// Replace all occurrences of `find` with `replace` in every label text
    pub fn replace_all(&mut self, find: &str, replace: &str, case_sensitive: bool) -> ReplaceResult {
        let mut result = ReplaceResult::default();
        if find.is_empty() {
            return result;
        }

        for label in &mut self.labels {
            let (new_text, count) = if case_sensitive {
                replace_counting(label.text(), find, replace)
            } else {
                replace_case_insensitive_counting(label.text(), find, replace)
            };

            if count > 0 {
                label.set_text(new_text);
                result.labels_modified += 1;
                result.replacements += count;
                result.modified_ids.push(label.text_id());
            }
        }

        result
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn replace_counting(text: &str, find: &str, replace: &str) -> (String, usize) {
    let count = text.matches(find).count();
    if count == 0 {
        return (text.to_string(), 0);
    }
    (text.replace(find, replace), count)
}

/// Case-insensitive replace with counting, keeping the case of unmatched text
fn replace_case_insensitive_counting(text: &str, find: &str, replace: &str) -> (String, usize) {
    let find_lower = find.to_lowercase();
    let mut result = String::with_capacity(text.len());
    let mut count = 0;
    let mut rest = text;

    // Compare char by char so byte offsets always refer to the original text,
    // even where lowercasing changes a character's length.
    'outer: while !rest.is_empty() {
        let mut matched_lower = String::new();
        for (offset, ch) in rest.char_indices() {
            matched_lower.extend(ch.to_lowercase());
            if matched_lower == find_lower {
                let end = offset + ch.len_utf8();
                result.push_str(replace);
                rest = &rest[end..];
                count += 1;
                continue 'outer;
            }
            if !find_lower.starts_with(&matched_lower) {
                break;
            }
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            result.push(ch);
        }
        rest = chars.as_str();
    }

    (result, count)
}
