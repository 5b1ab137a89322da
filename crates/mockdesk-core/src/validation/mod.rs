//! Declarative form validation.
//!
//! A [`Schema`] is an ordered list of fields, each with an ordered list of
//! rules and the message to report when the rule fails. Evaluation is pure:
//! the same input and schema always give the same result.

mod errors;
mod rules;
mod schema;
pub mod schemas;

pub use errors::ValidationErrors;
pub use rules::{Pattern, Rule};
pub use schema::{FieldRules, Schema};
