//! Product documents and the inputs used to create and edit them.

use crate::ids::ProductId;
use crate::pricing::{final_price, PriceBreakdown};
use crate::slug::normalize;
use crate::CatalogError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Field names follow the document-store layout (`_id`, `createdAt`, ...)
/// so snapshots written by older tooling load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier, assigned at creation.
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    /// URL-friendly slug (unique). Empty only on legacy documents.
    #[serde(default)]
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Base price.
    pub price: f64,
    /// Discount percentage (0-100); `None` or zero means no discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<f64>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Category name, matched exactly by catalog filters.
    pub category: String,
    /// Image URLs; the first one is the cover.
    #[serde(default)]
    pub images: Vec<String>,
    /// Whether the item has already been sold.
    #[serde(default)]
    pub sold: bool,
    /// Condition notes (e.g., "Usado, ótimo estado").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Dimensions as free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    /// Creation time; never changed after creation.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Time of the last mutation.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Start building a product. Mostly useful for fixtures and imports;
    /// admin creation goes through [`ProductInput`].
    pub fn builder(name: impl Into<String>, price: f64, category: impl Into<String>) -> ProductBuilder {
        ProductBuilder::new(name.into(), price, category.into())
    }

    /// Price after the optional discount.
    pub fn final_price(&self) -> f64 {
        final_price(self.price, self.discount)
    }

    pub fn price_breakdown(&self) -> PriceBreakdown {
        PriceBreakdown::new(self.price, self.discount)
    }

    /// Check if a positive discount is set.
    pub fn has_discount(&self) -> bool {
        self.discount.is_some_and(|d| d > 0.0)
    }

    /// Check if the product can still be bought.
    pub fn is_available(&self) -> bool {
        !self.sold
    }

    /// The cover image used in listings.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn has_slug(&self) -> bool {
        !self.slug.is_empty()
    }

    /// Creation time in milliseconds; missing timestamps count as the epoch.
    pub fn created_millis(&self) -> i64 {
        self.created_at.map(|t| t.timestamp_millis()).unwrap_or(0)
    }
}

/// Builder for [`Product`] values.
#[derive(Debug, Clone)]
pub struct ProductBuilder {
    product: Product,
    explicit_slug: bool,
}

impl ProductBuilder {
    fn new(name: String, price: f64, category: String) -> Self {
        Self {
            product: Product {
                id: ProductId::generate(),
                slug: String::new(),
                name,
                price,
                discount: None,
                description: String::new(),
                category,
                images: Vec::new(),
                sold: false,
                condition: None,
                dimensions: None,
                created_at: None,
                updated_at: None,
            },
            explicit_slug: false,
        }
    }

    pub fn id(mut self, id: impl Into<ProductId>) -> Self {
        self.product.id = id.into();
        self
    }

    /// Override the slug instead of deriving it from the name.
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.product.slug = slug.into();
        self.explicit_slug = true;
        self
    }

    pub fn discount(mut self, percent: f64) -> Self {
        self.product.discount = Some(percent);
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.product.description = description.into();
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.product.images.push(url.into());
        self
    }

    pub fn sold(mut self, sold: bool) -> Self {
        self.product.sold = sold;
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.product.condition = Some(condition.into());
        self
    }

    pub fn dimensions(mut self, dimensions: impl Into<String>) -> Self {
        self.product.dimensions = Some(dimensions.into());
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.product.created_at = Some(at);
        self.product.updated_at = Some(at);
        self
    }

    pub fn build(mut self) -> Product {
        if !self.explicit_slug {
            self.product.slug = normalize(&self.product.name);
        }
        self.product
    }
}

/// Fields an admin supplies when creating or fully replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sold: bool,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub dimensions: Option<String>,
}

impl ProductInput {
    pub fn new(name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
            ..Default::default()
        }
    }

    /// Reject inputs that would break catalog invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        validate_discount(self.discount)?;
        validate_category(&self.category)
    }

    /// Turn the input into a new product document.
    pub fn into_product(self, id: ProductId, slug: String, now: DateTime<Utc>) -> Product {
        Product {
            id,
            slug,
            name: self.name,
            price: self.price,
            discount: self.discount,
            description: self.description,
            category: self.category,
            images: self.images,
            sold: self.sold,
            condition: self.condition,
            dimensions: self.dimensions,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Replace every editable field of `product`, keeping its id and creation time.
    pub fn replace(self, product: &mut Product, slug: String, now: DateTime<Utc>) {
        let id = product.id.clone();
        let created_at = product.created_at;
        *product = self.into_product(id, slug, now);
        product.created_at = created_at;
    }
}

/// A partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    /// `Some(0.0)` clears the discount.
    #[serde(default)]
    pub discount: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub sold: Option<bool>,
    /// `Some("")` clears the condition notes.
    #[serde(default)]
    pub condition: Option<String>,
    /// `Some("")` clears the dimensions.
    #[serde(default)]
    pub dimensions: Option<String>,
}

impl ProductPatch {
    /// Patch that only flips the sold flag.
    pub fn sold(sold: bool) -> Self {
        Self {
            sold: Some(sold),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        validate_discount(self.discount)?;
        if let Some(category) = &self.category {
            validate_category(category)?;
        }
        Ok(())
    }

    /// The new name, if the patch actually renames `product`.
    pub fn renames<'a>(&'a self, product: &Product) -> Option<&'a str> {
        self.name.as_deref().filter(|name| *name != product.name)
    }

    /// Apply the patch. Slug changes are the caller's job.
    pub fn apply_to(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(discount) = self.discount {
            product.discount = (discount > 0.0).then_some(discount);
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(images) = self.images {
            product.images = images;
        }
        if let Some(sold) = self.sold {
            product.sold = sold;
        }
        if let Some(condition) = self.condition {
            product.condition = non_blank(condition);
        }
        if let Some(dimensions) = self.dimensions {
            product.dimensions = non_blank(dimensions);
        }
        product.updated_at = Some(now);
    }
}

fn non_blank(text: String) -> Option<String> {
    (!text.trim().is_empty()).then_some(text)
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::invalid("name must not be empty"));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<(), CatalogError> {
    if category.trim().is_empty() {
        return Err(CatalogError::invalid("category must not be empty"));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), CatalogError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::invalid(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(())
}

fn validate_discount(discount: Option<f64>) -> Result<(), CatalogError> {
    match discount {
        Some(d) if !(0.0..=100.0).contains(&d) => Err(CatalogError::invalid(format!(
            "discount must be between 0 and 100, got {}",
            d
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builder_derives_slug() {
        let product = Product::builder("Cadeira de Escritório", 350.0, "Escritório").build();
        assert_eq!(product.slug, "cadeira-de-escritorio");
        assert!(product.is_available());
        assert!(!product.has_discount());
        assert_eq!(product.final_price(), 350.0);
    }

    #[test]
    fn test_final_price_uses_discount() {
        let product = Product::builder("Geladeira", 1000.0, "Cozinha")
            .discount(20.0)
            .build();
        assert!(product.has_discount());
        assert_eq!(product.final_price(), 800.0);
    }

    #[test]
    fn test_cover_image_and_missing_timestamp() {
        let product = Product::builder("Abajur", 40.0, "Quarto")
            .image("https://img/1.jpg")
            .image("https://img/2.jpg")
            .build();
        assert_eq!(product.cover_image(), Some("https://img/1.jpg"));
        assert_eq!(product.created_millis(), 0);
    }

    #[test]
    fn test_document_layout() {
        let at = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        let product = Product::builder("Mesa", 300.0, "Sala")
            .id("65a0f0aa0000000000000001")
            .created_at(at)
            .build();
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["_id"], "65a0f0aa0000000000000001");
        assert_eq!(json["slug"], "mesa");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("discount").is_none());
    }

    #[test]
    fn test_legacy_document_loads() {
        let json = r#"{"_id":"abc","name":"Sofá","price":900,"category":"Sala"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(!product.has_slug());
        assert!(!product.sold);
        assert!(product.created_at.is_none());
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_input_validation() {
        assert!(ProductInput::new("Mesa", 100.0, "Sala").validate().is_ok());
        assert!(ProductInput::new("  ", 100.0, "Sala").validate().is_err());
        assert!(ProductInput::new("Mesa", -1.0, "Sala").validate().is_err());
        assert!(ProductInput::new("Mesa", f64::NAN, "Sala").validate().is_err());
        assert!(ProductInput::new("Mesa", 100.0, "").validate().is_err());

        let mut input = ProductInput::new("Mesa", 100.0, "Sala");
        input.discount = Some(101.0);
        assert!(input.validate().is_err());
        input.discount = Some(100.0);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_replace_keeps_identity() {
        let at = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 2, 1, 8, 30, 0).unwrap();
        let mut product = Product::builder("Mesa", 300.0, "Sala").created_at(at).build();
        let id = product.id.clone();

        ProductInput::new("Mesa de Jantar", 450.0, "Sala").replace(&mut product, "mesa-de-jantar".into(), later);

        assert_eq!(product.id, id);
        assert_eq!(product.created_at, Some(at));
        assert_eq!(product.updated_at, Some(later));
        assert_eq!(product.slug, "mesa-de-jantar");
        assert_eq!(product.price, 450.0);
    }

    #[test]
    fn test_patch() {
        let now = Utc::now();
        let mut product = Product::builder("Mesa", 300.0, "Sala").discount(10.0).build();

        let patch = ProductPatch {
            discount: Some(0.0),
            sold: Some(true),
            ..Default::default()
        };
        assert!(patch.renames(&product).is_none());
        patch.apply_to(&mut product, now);

        assert!(product.sold);
        assert_eq!(product.discount, None);
        assert_eq!(product.name, "Mesa");
        assert_eq!(product.updated_at, Some(now));
    }

    #[test]
    fn test_patch_renames() {
        let product = Product::builder("Mesa", 300.0, "Sala").build();
        let same = ProductPatch {
            name: Some("Mesa".into()),
            ..Default::default()
        };
        let renamed = ProductPatch {
            name: Some("Mesa Redonda".into()),
            ..Default::default()
        };
        assert!(same.renames(&product).is_none());
        assert_eq!(renamed.renames(&product), Some("Mesa Redonda"));
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch::sold(true).is_empty());
    }

    #[test]
    fn test_patch_sets_and_clears_notes() {
        let mut product = Product::builder("Cômoda", 400.0, "Quarto")
            .condition("Pequenos riscos")
            .build();
        let now = Utc::now();

        let patch = ProductPatch {
            dimensions: Some("80x45x90 cm".into()),
            ..Default::default()
        };
        patch.apply_to(&mut product, now);
        assert_eq!(product.condition.as_deref(), Some("Pequenos riscos"));
        assert_eq!(product.dimensions.as_deref(), Some("80x45x90 cm"));

        let patch = ProductPatch {
            condition: Some(String::new()),
            dimensions: Some("  ".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut product, now);
        assert_eq!(product.condition, None);
        assert_eq!(product.dimensions, None);
    }
}
