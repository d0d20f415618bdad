use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::validation::{is_true, not_empty, not_null};

pub const MAX_LENGTH_TITLE: usize = 100;
pub const MAX_LENGTH_DESCRIPTION: usize = 500;

/// Product entity - represents a product stored in MongoDB
///
/// Only obtainable through [`Product::builder`] or by deserializing a stored
/// document, and both paths run the same checks, so `title` and `price` are
/// always non-empty and length limits always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductDocument")]
pub struct Product {
    /// Assigned by the repository on first save (stored as _id in MongoDB)
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    title: String,
    description: Option<String>,
    /// Free-form, e.g. "9.99"
    price: String,
    /// Secondary lookup key
    #[serde(rename = "type")]
    product_type: Option<String>,
}

/// Raw stored shape of a [`Product`], validated before it becomes one.
#[derive(Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<String>,
    #[serde(rename = "type", default)]
    product_type: Option<String>,
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(document: ProductDocument) -> ProductResult<Self> {
        let (title, price) = check_fields(
            document.title,
            document.description.as_deref(),
            document.price,
        )?;

        Ok(Self {
            id: document.id,
            title,
            description: document.description,
            price,
            product_type: document.product_type,
        })
    }
}

/// Validates the mutable fields and returns the unwrapped title and price.
fn check_fields(
    title: Option<String>,
    description: Option<&str>,
    price: Option<String>,
) -> ProductResult<(String, String)> {
    let title = not_null(title, "title", "Title cannot be null")?;
    let price = not_null(price, "price", "Price cannot be null")?;
    not_empty(&title, "title", "Title cannot be empty")?;
    is_true(
        title.chars().count() <= MAX_LENGTH_TITLE,
        "title",
        format_args!("Title cannot be longer than {} characters", MAX_LENGTH_TITLE),
    )?;

    if let Some(description) = description {
        is_true(
            description.chars().count() <= MAX_LENGTH_DESCRIPTION,
            "description",
            format_args!(
                "Description cannot be longer than {} characters",
                MAX_LENGTH_DESCRIPTION
            ),
        )?;
    }

    not_empty(&price, "price", "Price cannot be empty")?;

    Ok((title, price))
}

impl Product {
    pub fn builder() -> ProductBuilder {
        ProductBuilder::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn product_type(&self) -> Option<&str> {
        self.product_type.as_deref()
    }

    /// Replaces title, description, price and type after re-validating them.
    ///
    /// The product is left untouched when validation fails.
    pub fn update(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        price: Option<String>,
        product_type: Option<String>,
    ) -> ProductResult<()> {
        let (title, price) = check_fields(title, description.as_deref(), price)?;

        self.title = title;
        self.description = description;
        self.price = price;
        self.product_type = product_type;
        Ok(())
    }

    /// Only repositories assign ids.
    pub(crate) fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// Collects product fields; [`ProductBuilder::build`] validates them.
#[derive(Debug, Default)]
pub struct ProductBuilder {
    title: Option<String>,
    description: Option<String>,
    price: Option<String>,
    product_type: Option<String>,
}

impl ProductBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    /// Title and price are checked for presence before any emptiness or
    /// length rule, so a missing field is always reported as `NullArgument`.
    pub fn build(self) -> ProductResult<Product> {
        let (title, price) = check_fields(self.title, self.description.as_deref(), self.price)?;

        Ok(Product {
            id: None,
            title,
            description: self.description,
            price,
            product_type: self.product_type,
        })
    }
}

/// Starts from the fields of `dto`; its `id` is ignored.
impl From<ProductDto> for ProductBuilder {
    fn from(dto: ProductDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            price: dto.price,
            product_type: dto.product_type,
        }
    }
}

/// Product as sent and received over HTTP
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductDto {
    /// Assigned on create; ignored in create requests
    #[schema(example = "01932c07-a2c4-7f3e-9d1a-5b8e2f4c6a10")]
    pub id: Option<String>,

    #[validate(
        required(message = "Title cannot be null"),
        length(min = 1, max = 100, message = "Title must be between 1 and 100 characters")
    )]
    #[schema(example = "Widget", min_length = 1, max_length = 100)]
    pub title: Option<String>,

    #[validate(length(max = 500, message = "Description cannot be longer than 500 characters"))]
    #[schema(max_length = 500)]
    pub description: Option<String>,

    #[validate(
        required(message = "Price cannot be null"),
        length(min = 1, message = "Price cannot be empty")
    )]
    #[schema(example = "9.99", min_length = 1)]
    pub price: Option<String>,

    #[serde(rename = "type")]
    #[schema(example = "gadget")]
    pub product_type: Option<String>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: Some(product.title),
            description: product.description,
            price: Some(product.price),
            product_type: product.product_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget() -> Product {
        Product::builder()
            .title("Widget")
            .description("A widget")
            .price("9.99")
            .product_type("gadget")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_valid_product() {
        let product = widget();
        assert_eq!(product.id(), None);
        assert_eq!(product.title(), "Widget");
        assert_eq!(product.description(), Some("A widget"));
        assert_eq!(product.price(), "9.99");
        assert_eq!(product.product_type(), Some("gadget"));
    }

    #[test]
    fn test_build_missing_title_is_null_argument() {
        let err = Product::builder().price("1").build().unwrap_err();
        assert_eq!(
            err,
            ProductError::NullArgument {
                field: "title".into(),
                message: "Title cannot be null".into(),
            }
        );
    }

    #[test]
    fn test_build_missing_price_reported_before_empty_title() {
        let err = Product::builder().title("").build().unwrap_err();
        assert!(matches!(err, ProductError::NullArgument { ref field, .. } if field == "price"));
    }

    #[test]
    fn test_build_empty_title_is_invalid_argument() {
        let err = Product::builder().title("").price("1").build().unwrap_err();
        assert_eq!(err.to_string(), "Title cannot be empty");
    }

    #[test]
    fn test_build_empty_price_is_invalid_argument() {
        let err = Product::builder().title("Widget").price("").build().unwrap_err();
        assert!(matches!(err, ProductError::InvalidArgument { ref field, .. } if field == "price"));
    }

    #[test]
    fn test_title_length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_LENGTH_TITLE);
        assert!(Product::builder().title(at_limit).price("1").build().is_ok());

        let err = Product::builder()
            .title("a".repeat(MAX_LENGTH_TITLE + 1))
            .price("1")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Title cannot be longer than 100 characters");
    }

    #[test]
    fn test_description_length_limit() {
        let at_limit = Product::builder()
            .title("Widget")
            .description("d".repeat(MAX_LENGTH_DESCRIPTION))
            .price("1")
            .build()
            .unwrap();
        assert_eq!(at_limit.description().map(str::len), Some(MAX_LENGTH_DESCRIPTION));

        let err = Product::builder()
            .title("Widget")
            .description("d".repeat(MAX_LENGTH_DESCRIPTION + 1))
            .price("1")
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Description cannot be longer than 500 characters");
    }

    #[test]
    fn test_update_replaces_all_fields_and_keeps_id() {
        let mut product = widget();
        product.set_id("p-1".into());

        product
            .update(Some("Gizmo".into()), None, Some("5".into()), None)
            .unwrap();

        assert_eq!(product.id(), Some("p-1"));
        assert_eq!(product.title(), "Gizmo");
        assert_eq!(product.description(), None);
        assert_eq!(product.price(), "5");
        assert_eq!(product.product_type(), None);
    }

    #[test]
    fn test_failed_update_leaves_product_untouched() {
        let mut product = widget();
        let before = product.clone();

        let err = product
            .update(Some(String::new()), None, Some("5".into()), Some("other".into()))
            .unwrap_err();

        assert!(matches!(err, ProductError::InvalidArgument { .. }));
        assert_eq!(product, before);
    }

    #[test]
    fn test_dto_from_product_serializes_absent_fields_as_null() {
        let product = Product::builder().title("Widget").price("9.99").build().unwrap();
        let json = serde_json::to_value(ProductDto::from(product)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": null,
                "title": "Widget",
                "description": null,
                "price": "9.99",
                "type": null
            })
        );
    }

    #[test]
    fn test_dto_validation() {
        let valid = ProductDto {
            title: Some("Widget".into()),
            price: Some("1".into()),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let invalid = ProductDto {
            title: Some(String::new()),
            description: Some("d".repeat(501)),
            price: None,
            ..Default::default()
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("price"));
    }

    #[test]
    fn test_entity_document_shape() {
        let mut product = widget();
        product.set_id("p-1".into());
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["_id"], "p-1");
        assert_eq!(json["type"], "gadget");

        let back: Product = serde_json::from_value(json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_stored_document_with_missing_type_and_description() {
        let product: Product =
            serde_json::from_value(json!({ "_id": "p-1", "title": "Widget", "price": "1" }))
                .unwrap();
        assert_eq!(product.id(), Some("p-1"));
        assert_eq!(product.description(), None);
        assert_eq!(product.product_type(), None);
    }

    #[test]
    fn test_invalid_stored_document_is_rejected() {
        let empty_title = serde_json::from_value::<Product>(json!({ "title": "", "price": "1" }));
        assert!(empty_title.unwrap_err().to_string().contains("Title cannot be empty"));

        let empty_price = serde_json::from_value::<Product>(json!({
            "_id": "x",
            "title": "Widget",
            "price": "",
        }));
        assert!(empty_price.is_err());

        let long_title = serde_json::from_value::<Product>(json!({
            "title": "t".repeat(MAX_LENGTH_TITLE + 1),
            "price": "1",
        }));
        assert!(long_title.is_err());

        let long_description = serde_json::from_value::<Product>(json!({
            "title": "Widget",
            "description": "d".repeat(MAX_LENGTH_DESCRIPTION + 1),
            "price": "1",
        }));
        assert!(long_description.is_err());

        let missing_price = serde_json::from_value::<Product>(json!({ "title": "Widget" }));
        assert!(missing_price.unwrap_err().to_string().contains("Price cannot be null"));
    }
}
