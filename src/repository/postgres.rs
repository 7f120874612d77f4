use async_trait::async_trait;
use sqlx::{Error as SqlxError, PgPool};
use tracing::{error, instrument};

use super::ProductRepository;
use crate::error::AppError;
use crate::models::product::{NewProduct, Product, ProductChanges};

const PRODUCT_COLUMNS: &str =
    "id, name, description, code, image_path, selling_price, cost_price, quantity";

fn map_unique_violation(err: SqlxError, code: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            AppError::duplicate_code(code)
        }
        other => other.into(),
    }
}

#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self, product), fields(code = %product.code))]
    async fn create(&self, product: NewProduct) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO products
                 (name, description, code, image_path, selling_price, cost_price, quantity)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&sql)
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.code)
            .bind(&product.image_path)
            .bind(product.selling_price)
            .bind(product.cost_price)
            .bind(product.quantity)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &product.code))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Product>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
        match sqlx::query_as::<_, Product>(&sql).fetch_all(&self.pool).await {
            Ok(products) => Ok(products),
            Err(e) => {
                error!(?e, "Failed to fetch products");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self))]
    async fn find_by_code(&self, code: &str) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE code = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    #[instrument(skip(self, changes))]
    async fn update_by_code(
        &self,
        code: &str,
        changes: ProductChanges,
    ) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE products SET
             name = COALESCE($2, name),
             description = COALESCE($3, description),
             code = COALESCE($4, code),
             image_path = COALESCE($5, image_path),
             selling_price = COALESCE($6, selling_price),
             cost_price = COALESCE($7, cost_price),
             quantity = COALESCE($8, quantity)
             WHERE code = $1
             RETURNING {PRODUCT_COLUMNS}"
        );
        let target_code = changes.code.clone().unwrap_or_else(|| code.to_string());
        sqlx::query_as::<_, Product>(&sql)
            .bind(code)
            .bind(changes.name)
            .bind(changes.description)
            .bind(changes.code)
            .bind(changes.image_path)
            .bind(changes.selling_price)
            .bind(changes.cost_price)
            .bind(changes.quantity)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, &target_code))
    }

    #[instrument(skip(self))]
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
