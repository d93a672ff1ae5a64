//! Catalog reads and admin product mutations on top of a repository.

use crate::repository::ProductRepository;
use crate::StoreError;
use chrono::Utc;
use mercurius_auth::{AuthSession, Principal, Role};
use mercurius_catalog::prelude::*;
use mercurius_catalog::view;
use serde::{Deserialize, Serialize};

/// How many related products a detail page shows.
pub const RELATED_LIMIT: usize = 3;

/// Dashboard figures: headline counts and per-category totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: InventoryStats,
    pub categories: Vec<CategoryTotal>,
}

/// Read-only catalog queries.
pub struct ProductService<'r, R: ProductRepository + ?Sized> {
    repo: &'r R,
}

impl<'r, R: ProductRepository + ?Sized> ProductService<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self { repo }
    }

    /// All products, newest first.
    pub fn list(&self) -> Result<Vec<Product>, StoreError> {
        self.repo.list()
    }

    /// The storefront view for a filter.
    pub fn catalog(&self, filter: &CatalogFilter) -> Result<Vec<Product>, StoreError> {
        let products = self.repo.list()?;
        Ok(apply(&products, filter))
    }

    pub fn get(&self, id: &ProductId) -> Result<Product, StoreError> {
        self.repo
            .get(id)?
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()).into())
    }

    pub fn by_slug(&self, slug: &str) -> Result<Product, StoreError> {
        self.repo
            .find_by_slug(slug)?
            .ok_or_else(|| CatalogError::SlugNotFound(slug.to_string()).into())
    }

    /// The product behind `slug` and up to `limit` others from its category.
    pub fn related(&self, slug: &str, limit: usize) -> Result<(Product, Vec<Product>), StoreError> {
        let product = self.by_slug(slug)?;
        let products = self.repo.list()?;
        let others = view::related(&products, &product, limit)
            .into_iter()
            .cloned()
            .collect();
        Ok((product, others))
    }

    pub fn categories(&self) -> Result<Vec<String>, StoreError> {
        Ok(categories(&self.repo.list()?))
    }

    pub fn dashboard(&self) -> Result<Dashboard, StoreError> {
        let products = self.repo.list()?;
        Ok(Dashboard {
            stats: InventoryStats::from_products(&products),
            categories: category_totals(&products),
        })
    }
}

/// Outcome of [`ProductAdmin::backfill_slugs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackfillReport {
    /// Products that received a slug.
    pub updated: usize,
    /// Products that already had one.
    pub skipped: usize,
}

/// Outcome of [`ProductAdmin::import`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImportReport {
    /// Products written, in input order.
    pub imported: Vec<Product>,
    /// Products removed before importing.
    pub removed: usize,
}

/// Product mutations, available only to an unexpired admin session.
pub struct ProductAdmin<'r, R: ProductRepository + ?Sized> {
    repo: &'r R,
    principal: Principal,
}

impl<'r, R: ProductRepository + ?Sized> ProductAdmin<'r, R> {
    pub fn new(repo: &'r R, session: &AuthSession) -> Result<Self, StoreError> {
        let principal = session.require_role(Role::Admin)?.clone();
        Ok(Self { repo, principal })
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    fn load(&self, id: &ProductId) -> Result<Product, StoreError> {
        self.repo
            .get(id)?
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()).into())
    }

    /// Create a product with a fresh id and a unique slug.
    pub fn create(&self, input: ProductInput) -> Result<Product, StoreError> {
        input.validate()?;
        let slug = slug_for(&input.name, &self.repo.slugs(None)?);
        let product = input.into_product(ProductId::generate(), slug, Utc::now());
        let product = self.repo.insert(product)?;
        tracing::info!(
            id = %product.id,
            slug = %product.slug,
            by = %self.principal.username,
            "product created"
        );
        Ok(product)
    }

    /// Replace every editable field. The slug follows the name.
    pub fn update(&self, id: &ProductId, input: ProductInput) -> Result<Product, StoreError> {
        input.validate()?;
        let mut product = self.load(id)?;
        let slug = if input.name != product.name || !product.has_slug() {
            slug_for(&input.name, &self.repo.slugs(Some(id))?)
        } else {
            product.slug.clone()
        };
        input.replace(&mut product, slug, Utc::now());
        let product = self.repo.replace(product)?;
        tracing::info!(id = %product.id, slug = %product.slug, by = %self.principal.username, "product updated");
        Ok(product)
    }

    /// Change only the fields present in `patch`.
    pub fn patch(&self, id: &ProductId, patch: ProductPatch) -> Result<Product, StoreError> {
        patch.validate()?;
        let mut product = self.load(id)?;
        let reslug = patch.renames(&product).is_some() || !product.has_slug();
        patch.apply_to(&mut product, Utc::now());
        if reslug {
            product.slug = slug_for(&product.name, &self.repo.slugs(Some(id))?);
        }
        let product = self.repo.replace(product)?;
        tracing::info!(id = %product.id, sold = product.sold, by = %self.principal.username, "product patched");
        Ok(product)
    }

    pub fn set_sold(&self, id: &ProductId, sold: bool) -> Result<Product, StoreError> {
        self.patch(id, ProductPatch::sold(sold))
    }

    /// Remove a product and return it.
    pub fn delete(&self, id: &ProductId) -> Result<Product, StoreError> {
        let product = self
            .repo
            .remove(id)?
            .ok_or_else(|| StoreError::from(CatalogError::ProductNotFound(id.to_string())))?;
        tracing::info!(id = %product.id, by = %self.principal.username, "product deleted");
        Ok(product)
    }

    /// Seed the catalog from a batch of inputs.
    ///
    /// Nothing is written unless every input validates. With `replace`, the
    /// existing products are removed first.
    pub fn import(
        &self,
        inputs: Vec<ProductInput>,
        replace: bool,
    ) -> Result<ImportReport, StoreError> {
        for (i, input) in inputs.iter().enumerate() {
            input.validate().map_err(|e| {
                CatalogError::invalid(format!("product #{} ({}): {}", i + 1, input.name, e))
            })?;
        }

        let mut report = ImportReport::default();
        if replace {
            for product in self.repo.list()? {
                if self.repo.remove(&product.id)?.is_some() {
                    report.removed += 1;
                }
            }
        }

        let mut taken = self.repo.slugs(None)?;
        let now = Utc::now();
        for input in inputs {
            let slug = slug_for(&input.name, &taken);
            taken.insert(slug.clone());
            let product = self
                .repo
                .insert(input.into_product(ProductId::generate(), slug, now))?;
            report.imported.push(product);
        }

        tracing::info!(
            imported = report.imported.len(),
            removed = report.removed,
            by = %self.principal.username,
            "products imported"
        );
        Ok(report)
    }

    /// Give every product without a slug a unique one.
    ///
    /// Slugs already in use are collected up front, so a generated slug can
    /// never collide with one stored on a product visited later.
    pub fn backfill_slugs(&self) -> Result<BackfillReport, StoreError> {
        let mut taken = self.repo.slugs(None)?;
        let mut report = BackfillReport::default();
        let now = Utc::now();

        for mut product in self.repo.list()? {
            if product.has_slug() {
                report.skipped += 1;
                continue;
            }
            let slug = slug_for(&product.name, &taken);
            taken.insert(slug.clone());
            product.slug = slug;
            product.updated_at = Some(now);
            let product = self.repo.replace(product)?;
            tracing::info!(id = %product.id, slug = %product.slug, "slug assigned");
            report.updated += 1;
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use mercurius_auth::SessionConfig;
    use mercurius_catalog::UserId;

    fn session(role: Role) -> AuthSession {
        let principal = Principal {
            id: UserId::new("u1"),
            username: "admin".into(),
            name: "Administrador".into(),
            email: "admin@mercurius.com".into(),
            role,
        };
        AuthSession::start(principal, &SessionConfig::default(), Utc::now()).unwrap()
    }

    #[test]
    fn test_admin_requires_admin_role() {
        let store = MemoryStore::new();
        let err = ProductAdmin::new(&store, &session(Role::User)).err().unwrap();
        assert!(err.is_auth_error());
        assert!(ProductAdmin::new(&store, &session(Role::Admin)).is_ok());
    }

    #[test]
    fn test_create_assigns_unique_slugs() {
        let store = MemoryStore::new();
        let admin = ProductAdmin::new(&store, &session(Role::Admin)).unwrap();

        let first = admin.create(ProductInput::new("Mesa", 250.0, "Sala")).unwrap();
        let second = admin.create(ProductInput::new("Mesa", 300.0, "Sala")).unwrap();
        let third = admin.create(ProductInput::new("!!!", 10.0, "Sala")).unwrap();

        assert_eq!(first.slug, "mesa");
        assert_eq!(second.slug, "mesa-1");
        assert_eq!(third.slug, "product");
        assert!(first.created_at.is_some());
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let store = MemoryStore::new();
        let admin = ProductAdmin::new(&store, &session(Role::Admin)).unwrap();
        let mut input = ProductInput::new("Mesa", 250.0, "Sala");
        input.discount = Some(150.0);
        assert!(matches!(
            admin.create(input),
            Err(StoreError::Catalog(CatalogError::ValidationError(_)))
        ));
        assert_eq!(store.product_count().unwrap(), 0);
    }

    #[test]
    fn test_update_keeps_slug_unless_renamed() {
        let store = MemoryStore::new();
        let admin = ProductAdmin::new(&store, &session(Role::Admin)).unwrap();
        let mesa = admin.create(ProductInput::new("Mesa", 250.0, "Sala")).unwrap();

        let repriced = admin
            .update(&mesa.id, ProductInput::new("Mesa", 200.0, "Sala"))
            .unwrap();
        assert_eq!(repriced.slug, "mesa");
        assert_eq!(repriced.created_at, mesa.created_at);

        let renamed = admin
            .update(&mesa.id, ProductInput::new("Mesa de Jantar", 200.0, "Sala"))
            .unwrap();
        assert_eq!(renamed.slug, "mesa-de-jantar");
        assert_eq!(renamed.id, mesa.id);
    }

    #[test]
    fn test_patch_renames_and_marks_sold() {
        let store = MemoryStore::new();
        let admin = ProductAdmin::new(&store, &session(Role::Admin)).unwrap();
        let sofa = admin.create(ProductInput::new("Sofá", 1000.0, "Sala")).unwrap();

        let patch = ProductPatch {
            name: Some("Sofá Retrátil".into()),
            ..Default::default()
        };
        let patched = admin.patch(&sofa.id, patch).unwrap();
        assert_eq!(patched.slug, "sofa-retratil");
        assert_eq!(patched.price, 1000.0);

        let sold = admin.set_sold(&sofa.id, true).unwrap();
        assert!(sold.sold);
        assert_eq!(sold.slug, "sofa-retratil");
    }

    #[test]
    fn test_delete_missing_product() {
        let store = MemoryStore::new();
        let admin = ProductAdmin::new(&store, &session(Role::Admin)).unwrap();
        let err = admin.delete(&ProductId::new("nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_backfill_slugs() {
        let store = MemoryStore::new();
        store
            .insert(Product::builder("Mesa", 1.0, "Sala").slug("mesa").build())
            .unwrap();
        for _ in 0..2 {
            store
                .insert(Product::builder("Mesa", 1.0, "Sala").slug("").build())
                .unwrap();
        }

        let admin = ProductAdmin::new(&store, &session(Role::Admin)).unwrap();
        let report = admin.backfill_slugs().unwrap();
        assert_eq!(report, BackfillReport { updated: 2, skipped: 1 });

        let slugs = store.slugs(None).unwrap();
        assert_eq!(slugs.len(), 3);
        assert!(slugs.contains("mesa-1"));
        assert!(slugs.contains("mesa-2"));

        assert_eq!(admin.backfill_slugs().unwrap().updated, 0);
    }

    #[test]
    fn test_related_and_dashboard() {
        let store = MemoryStore::new();
        let admin = ProductAdmin::new(&store, &session(Role::Admin)).unwrap();
        let sofa = admin.create(ProductInput::new("Sofá", 1000.0, "Sala")).unwrap();
        admin.create(ProductInput::new("Rack", 300.0, "Sala")).unwrap();
        admin.create(ProductInput::new("Fogão", 500.0, "Cozinha")).unwrap();
        admin.set_sold(&sofa.id, true).unwrap();

        let service = ProductService::new(&store);
        let (product, related) = service.related("sofa", RELATED_LIMIT).unwrap();
        assert_eq!(product.id, sofa.id);
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].name, "Rack");

        let dashboard = service.dashboard().unwrap();
        assert_eq!(dashboard.stats.total, 3);
        assert_eq!(dashboard.stats.sold, 1);
        assert_eq!(dashboard.categories[0].category, "Cozinha");
        assert_eq!(dashboard.categories[1].value, 300.0);

        assert!(service.by_slug("cadeira").unwrap_err().is_not_found());
    }

    #[test]
    fn test_import_rejects_whole_batch_on_invalid_input() {
        let store = MemoryStore::new();
        let admin = ProductAdmin::new(&store, &session(Role::Admin)).unwrap();
        let inputs = vec![
            ProductInput::new("Mesa", 250.0, "Sala"),
            ProductInput::new("", 10.0, "Sala"),
        ];
        let err = admin.import(inputs, false).unwrap_err();
        assert!(matches!(err, StoreError::Catalog(CatalogError::ValidationError(_))));
        assert_eq!(store.product_count().unwrap(), 0);
    }
}
