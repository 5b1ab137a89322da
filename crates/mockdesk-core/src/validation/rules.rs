//! Individual field rules.

/// Character-class pattern a value must match in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// ASCII letters and digits only.
    Alphanumeric,
}

impl Pattern {
    /// Returns true if the whole value matches.
    pub fn matches(self, value: &str) -> bool {
        match self {
            Pattern::Alphanumeric => value.chars().all(|c| c.is_ascii_alphanumeric()),
        }
    }
}

/// One rule applied to a field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Value must be present and not blank.
    Required,
    /// At least this many characters.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
    /// Value must match the pattern.
    Pattern(Pattern),
    /// Value must look like an email address.
    Email,
    /// Value must equal the value of another field.
    EqualsField(String),
}

impl Rule {
    /// Check a present, non-blank value. `lookup` resolves other fields.
    pub(crate) fn check(&self, value: &str, lookup: &dyn Fn(&str) -> Option<String>) -> bool {
        match self {
            Rule::Required => !value.is_empty(),
            Rule::MinLength(min) => value.chars().count() >= *min,
            Rule::MaxLength(max) => value.chars().count() <= *max,
            Rule::Pattern(pattern) => pattern.matches(value),
            Rule::Email => is_email(value),
            Rule::EqualsField(other) => lookup(other).as_deref() == Some(value),
        }
    }
}

/// Structural email check: `local@domain.tld`, no whitespace, one `@`,
/// dot-separated non-empty domain labels.
fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
}
