//! Search predicate.

use crate::record::Record;

/// Case-insensitive substring filter against one designated text field.
///
/// An empty predicate matches every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPredicate {
    field: String,
    text: String,
    needle: String,
}

impl SearchPredicate {
    /// An empty predicate over `field` (name or dotted path).
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            text: String::new(),
            needle: String::new(),
        }
    }

    /// The designated field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The text as the user typed it.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the predicate filters nothing out.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Replace the search text.
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.needle = self.text.to_lowercase();
    }

    /// Remove the search text.
    pub fn clear(&mut self) {
        self.set(String::new());
    }

    /// Does `record` match? Records without the field only match an empty
    /// predicate.
    pub fn matches(&self, record: &Record) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        record
            .text(&self.field)
            .is_some_and(|value| value.to_lowercase().contains(&self.needle))
    }
}
