//! Field checks used by the entity builder and `Product::update`.

use std::fmt;

use crate::error::{ProductError, ProductResult};

/// Unwraps `value`, failing with `NullArgument` when it is absent.
pub fn not_null<T>(value: Option<T>, field: &str, message: &str) -> ProductResult<T> {
    value.ok_or_else(|| ProductError::NullArgument {
        field: field.to_string(),
        message: message.to_string(),
    })
}

pub fn not_empty(value: &str, field: &str, message: &str) -> ProductResult<()> {
    is_true(!value.is_empty(), field, format_args!("{message}"))
}

/// Fails with `InvalidArgument` unless `condition` holds.
///
/// ```ignore
/// is_true(len <= 100, "title", format_args!("Title cannot be longer than {} characters", 100))?;
/// ```
pub fn is_true(condition: bool, field: &str, message: fmt::Arguments<'_>) -> ProductResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ProductError::InvalidArgument {
            field: field.to_string(),
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_null() {
        assert_eq!(not_null(Some("x"), "title", "Title cannot be null"), Ok("x"));
        assert_eq!(
            not_null(None::<String>, "title", "Title cannot be null"),
            Err(ProductError::NullArgument {
                field: "title".into(),
                message: "Title cannot be null".into(),
            })
        );
    }

    #[test]
    fn test_not_empty() {
        assert!(not_empty("Widget", "title", "Title cannot be empty").is_ok());
        assert!(matches!(
            not_empty("", "title", "Title cannot be empty"),
            Err(ProductError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_is_true_formats_message() {
        let err = is_true(false, "title", format_args!("at most {} characters", 100)).unwrap_err();
        assert_eq!(err.to_string(), "at most 100 characters");
    }
}
