use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

lazy_static! {
    /// Regex for academic year labels
    /// Two four-digit years joined by a hyphen
    /// - Valid: "2025-2026", "1999-2000"
    /// - Invalid: "2025", "25-26", "2025/2026", "2025-2026 "
    pub static ref YEAR_RANGE_REGEX: Regex = Regex::new(r"^\d{4}-\d{4}$").unwrap();
}

/// Rejects strings that are empty once surrounding whitespace is removed
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

/// Flattens validator output into `"field: message"` lines, nested paths joined with `.`
pub fn flatten_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort();
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    out.push(format!("{}: {}", path, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    collect(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "not_blank"))]
        name: String,
        #[validate(range(min = 1, message = "must be positive"))]
        quantity: i64,
    }

    #[test]
    fn test_year_range_regex_valid() {
        assert!(YEAR_RANGE_REGEX.is_match("2025-2026"));
        assert!(YEAR_RANGE_REGEX.is_match("1999-2000"));
    }

    #[test]
    fn test_year_range_regex_invalid() {
        assert!(!YEAR_RANGE_REGEX.is_match("2025"));
        assert!(!YEAR_RANGE_REGEX.is_match("25-26"));
        assert!(!YEAR_RANGE_REGEX.is_match("2025/2026"));
        assert!(!YEAR_RANGE_REGEX.is_match("2025-2026 "));
        assert!(!YEAR_RANGE_REGEX.is_match(""));
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("Lamp").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   ").is_err());
    }

    #[test]
    fn test_flatten_errors_reports_each_field() {
        let sample = Sample {
            name: " ".to_string(),
            quantity: 0,
        };
        let errors = sample.validate().unwrap_err();

        assert_eq!(
            flatten_errors(&errors),
            vec![
                "name: must not be empty".to_string(),
                "quantity: must be positive".to_string(),
            ]
        );
    }
}
