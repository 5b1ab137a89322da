//! Field rule sets and their evaluation.

use serde_json::Value;

use super::{Pattern, Rule, ValidationErrors};
use crate::record::Record;

/// The rules for one field, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    field: String,
    rules: Vec<(Rule, String)>,
}

impl FieldRules {
    /// Rules for a field name or dotted path.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
        }
    }

    /// Add a rule with its violation message.
    pub fn rule(mut self, rule: Rule, message: impl Into<String>) -> Self {
        self.rules.push((rule, message.into()));
        self
    }

    pub fn required(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Required, message)
    }

    pub fn min(self, length: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MinLength(length), message)
    }

    pub fn max(self, length: usize, message: impl Into<String>) -> Self {
        self.rule(Rule::MaxLength(length), message)
    }

    pub fn alphanumeric(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Pattern(Pattern::Alphanumeric), message)
    }

    pub fn email(self, message: impl Into<String>) -> Self {
        self.rule(Rule::Email, message)
    }

    pub fn equals(self, other: impl Into<String>, message: impl Into<String>) -> Self {
        self.rule(Rule::EqualsField(other.into()), message)
    }

    /// The field path these rules apply to.
    pub fn field(&self) -> &str {
        &self.field
    }

    fn required_message(&self) -> Option<&str> {
        self.rules
            .iter()
            .find(|(rule, _)| *rule == Rule::Required)
            .map(|(_, message)| message.as_str())
    }
}

/// A named, ordered set of field rules for one kind of form.
///
/// # Example
///
/// ```
/// use mockdesk_core::validation::{FieldRules, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new("login").field(
///     FieldRules::new("username")
///         .required("Username is required")
///         .min(3, "Username must be at least 3 characters"),
/// );
///
/// let errors = schema.validate(&json!({"username": "ab"})).unwrap_err();
/// assert_eq!(errors.get("username"), Some("Username must be at least 3 characters"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldRules>,
}

impl Schema {
    /// An empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append the rules for one field.
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.push(rules);
        self
    }

    /// Schema name, for logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the schema against a JSON object.
    ///
    /// A missing or empty value reports the field's `Required` message, or
    /// skips the field if it is optional. Otherwise the first failing rule
    /// in declaration order is reported.
    pub fn validate(&self, input: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let lookup = |path: &str| field_text(input, path);

        for field in &self.fields {
            let value = field_text(input, &field.field).filter(|v| !v.is_empty());

            let Some(value) = value else {
                if let Some(message) = field.required_message() {
                    errors.add(&field.field, message);
                }
                continue;
            };

            if let Some((_, message)) = field
                .rules
                .iter()
                .find(|(rule, _)| !rule.check(&value, &lookup))
            {
                errors.add(&field.field, message);
            }
        }

        errors.into_result()
    }

    /// Evaluate the schema against a record's fields.
    pub fn validate_record(&self, record: &Record) -> Result<(), ValidationErrors> {
        self.validate(&record.to_value())
    }
}

/// Text of a field by dotted path. Strings are taken as-is, other scalars
/// by their JSON rendering; null, objects and arrays count as absent.
fn field_text(input: &Value, path: &str) -> Option<String> {
    let mut current = input;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    match current {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn username_schema() -> Schema {
        Schema::new("username").field(
            FieldRules::new("username")
                .required("required")
                .min(3, "too short")
                .max(20, "too long")
                .alphanumeric("alphanumeric only"),
        )
    }

    #[test]
    fn first_failing_rule_wins() {
        let errors = username_schema()
            .validate(&json!({"username": "a!"}))
            .unwrap_err();
        assert_eq!(errors.get("username"), Some("too short"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn missing_and_empty_report_required() {
        let schema = username_schema();
        for input in [json!({}), json!({"username": ""}), json!({"username": null})] {
            let errors = schema.validate(&input).unwrap_err();
            assert_eq!(errors.get("username"), Some("required"));
        }
    }

    #[test]
    fn optional_fields_are_skipped_when_absent() {
        let schema = Schema::new("optional").field(FieldRules::new("nickname").min(3, "short"));
        assert!(schema.validate(&json!({})).is_ok());
        assert!(schema.validate(&json!({"nickname": "ab"})).is_err());
    }

    #[test]
    fn nested_paths_are_reported_by_path() {
        let schema = Schema::new("company").field(
            FieldRules::new("company.name")
                .required("Company name is required")
                .min(3, "short"),
        );
        let errors = schema
            .validate(&json!({"company": {"name": "C"}}))
            .unwrap_err();
        assert_eq!(errors.get("company.name"), Some("short"));

        let errors = schema.validate(&json!({"company": {}})).unwrap_err();
        assert_eq!(errors.get("company.name"), Some("Company name is required"));
    }

    #[test]
    fn validation_is_deterministic() {
        let schema = username_schema();
        let input = json!({"username": "valid_user!"});
        assert_eq!(schema.validate(&input), schema.validate(&input));
    }
}
