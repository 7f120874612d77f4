use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ProductRepository;
use crate::error::AppError;
use crate::models::product::{NewProduct, Product, ProductChanges};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    products: Vec<Product>,
}

/// In-process product store, selected with `DATABASE_URL=memory://`.
#[derive(Debug, Default)]
pub struct MemoryProductRepository {
    inner: RwLock<Inner>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        let mut inner = self.inner.write().await;
        if inner.products.iter().any(|p| p.code == product.code) {
            return Err(AppError::duplicate_code(&product.code));
        }
        inner.next_id += 1;
        let product = product.into_product(inner.next_id);
        inner.products.push(product.clone());
        Ok(product)
    }

    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| p.code == code).cloned())
    }

    async fn update_by_code(
        &self,
        code: &str,
        changes: ProductChanges,
    ) -> Result<Option<Product>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.products.iter().position(|p| p.code == code) else {
            return Ok(None);
        };

        if let Some(new_code) = changes.code.as_deref() {
            let taken = inner
                .products
                .iter()
                .enumerate()
                .any(|(i, p)| i != index && p.code == new_code);
            if taken {
                return Err(AppError::duplicate_code(new_code));
            }
        }

        let product = &mut inner.products[index];
        changes.apply_to(product);
        Ok(Some(product.clone()))
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.products.len();
        inner.products.retain(|p| p.code != code);
        Ok(inner.products.len() != before)
    }
}
