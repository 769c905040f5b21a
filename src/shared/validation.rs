use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::shared::types::FieldMessages;

lazy_static! {
    /// Unsigned integers only
    /// - Valid: "1", "10", "007"
    /// - Invalid: "", "-1", "1.5", "ten", " 1"
    pub static ref NUMERIC_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Error codes understood by [`describe`].
pub const CODE_REQUIRED: &str = "required";
pub const CODE_MAX: &str = "max";
pub const CODE_NUMERIC: &str = "numeric";
pub const CODE_INVALID: &str = "invalid";

/// Custom validator for query parameters that must be numeric.
pub fn validate_numeric(value: &str) -> Result<(), ValidationError> {
    if NUMERIC_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new(CODE_NUMERIC))
    }
}

/// Render one failed tag as the message clients have always received.
pub fn describe(field: &str, code: &str) -> String {
    match code {
        CODE_REQUIRED => format!("{} is required.", field),
        CODE_NUMERIC => format!("{} must be a number.", field),
        CODE_MAX => format!("{} exceeds the maximum digit limit.", field),
        "omitempty" => format!("{} is optional.", field),
        _ => format!("{} is invalid.", field),
    }
}

/// Flatten validator errors into `{ field: reason }`, first failure per field.
pub fn field_messages(errors: &ValidationErrors) -> FieldMessages {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first()
                .map(|err| (field.to_string(), describe(&field, &err.code)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_regex() {
        assert!(NUMERIC_REGEX.is_match("1"));
        assert!(NUMERIC_REGEX.is_match("250"));
        assert!(!NUMERIC_REGEX.is_match(""));
        assert!(!NUMERIC_REGEX.is_match("-1"));
        assert!(!NUMERIC_REGEX.is_match("1.5"));
        assert!(!NUMERIC_REGEX.is_match("ten"));
    }

    #[test]
    fn test_describe_tag_table() {
        assert_eq!(describe("name", "required"), "name is required.");
        assert_eq!(describe("page", "numeric"), "page must be a number.");
        assert_eq!(
            describe("code", "max"),
            "code exceeds the maximum digit limit."
        );
        assert_eq!(describe("icon", "omitempty"), "icon is optional.");
        assert_eq!(describe("sort_by", "whatever"), "sort_by is invalid.");
    }

    #[test]
    fn test_field_messages_keeps_first_error() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new(CODE_REQUIRED));
        errors.add("name", ValidationError::new(CODE_MAX));
        errors.add("page", ValidationError::new(CODE_NUMERIC));

        let messages = field_messages(&errors);
        assert_eq!(messages["name"], "name is required.");
        assert_eq!(messages["page"], "page must be a number.");
        assert_eq!(messages.len(), 2);
    }
}
