//! The rule sets used by the login, signup and user forms.

use super::{FieldRules, Schema};

fn username() -> FieldRules {
    FieldRules::new("username")
        .required("Username is required")
        .min(3, "Username must be at least 3 characters")
        .max(20, "Username must be less than 20 characters")
        .alphanumeric("Username must contain only alphanumeric characters")
}

fn password() -> FieldRules {
    FieldRules::new("password")
        .required("Password is required")
        .min(5, "Password must be at least 5 characters")
        .max(20, "Password must be less than 20 characters")
}

/// Login form: `username`, `password`.
pub fn login() -> Schema {
    Schema::new("login").field(username()).field(password())
}

/// Signup form: `username`, `password`, `confirmPassword`.
pub fn signup() -> Schema {
    Schema::new("signup")
        .field(username())
        .field(password())
        .field(
            FieldRules::new("confirmPassword")
                .required("Confirm Password is required")
                .equals("password", "Passwords must match"),
        )
}

/// User create/edit form: `name`, `username`, `email`, `company.name`.
pub fn user() -> Schema {
    Schema::new("user")
        .field(
            FieldRules::new("name")
                .required("Name is required")
                .min(3, "Name must be at least 3 characters"),
        )
        .field(username())
        .field(
            FieldRules::new("email")
                .required("Email is required")
                .email("Invalid email format"),
        )
        .field(
            FieldRules::new("company.name")
                .required("Company name is required")
                .min(3, "Company name must be at least 3 characters"),
        )
}
