// src/repository/mod.rs
//! Storage for product records, keyed by product code.

mod memory;
mod postgres;

pub use memory::MemoryProductRepository;
pub use postgres::PgProductRepository;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::product::{NewProduct, Product, ProductChanges};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fails with [`AppError::DuplicateCode`] when the code is taken.
    async fn create(&self, product: NewProduct) -> Result<Product, AppError>;

    /// Every product, in storage order.
    async fn list_all(&self) -> Result<Vec<Product>, AppError>;

    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, AppError>;

    /// Returns `None` when no product has `code`.
    async fn update_by_code(
        &self,
        code: &str,
        changes: ProductChanges,
    ) -> Result<Option<Product>, AppError>;

    /// Returns whether a product was removed.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;
}
