use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    /// A required field was absent
    #[error("{message}")]
    NullArgument { field: String, message: String },

    /// A field is present but empty or too long
    #[error("{message}")]
    InvalidArgument { field: String, message: String },

    /// No product for the given lookup key (`id` or `type`)
    #[error("No product found with {key}: <{value}>")]
    NotFound { key: &'static str, value: String },

    #[error("Database error: {0}")]
    Database(String),
}

impl ProductError {
    pub fn not_found_by_id(id: impl Into<String>) -> Self {
        Self::NotFound {
            key: "id",
            value: id.into(),
        }
    }

    pub fn not_found_by_type(product_type: impl Into<String>) -> Self {
        Self::NotFound {
            key: "type",
            value: product_type.into(),
        }
    }
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NullArgument { field, message }
            | ProductError::InvalidArgument { field, message } => {
                AppError::InvalidFields(vec![FieldError::new(field, message)])
            }
            not_found @ ProductError::NotFound { .. } => AppError::NotFound(not_found.to_string()),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            ProductError::not_found_by_id("42").to_string(),
            "No product found with id: <42>"
        );
        assert_eq!(
            ProductError::not_found_by_type("book").to_string(),
            "No product found with type: <book>"
        );
    }

    #[test]
    fn test_argument_errors_map_to_field_details() {
        let err = ProductError::InvalidArgument {
            field: "title".into(),
            message: "Title cannot be empty".into(),
        };

        match AppError::from(err) {
            AppError::InvalidFields(fields) => {
                assert_eq!(fields, vec![FieldError::new("title", "Title cannot be empty")])
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_status_codes() {
        let null = ProductError::NullArgument {
            field: "price".into(),
            message: "Price cannot be null".into(),
        };
        assert_eq!(null.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ProductError::not_found_by_id("x").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ProductError::Database("timeout".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
