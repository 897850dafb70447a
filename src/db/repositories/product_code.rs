use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::entities::prelude::*;
use crate::entities::{alphanumeric_product_codes, numeric_product_codes};

/// The two product-code tables share a shape but not a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRegistry {
    Numeric,
    Alphanumeric,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCode {
    pub id: i32,
    pub product_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<numeric_product_codes::Model> for ProductCode {
    fn from(model: numeric_product_codes::Model) -> Self {
        Self {
            id: model.id,
            product_code: model.product_code,
            created_at: model.created_at,
        }
    }
}

impl From<alphanumeric_product_codes::Model> for ProductCode {
    fn from(model: alphanumeric_product_codes::Model) -> Self {
        Self {
            id: model.id,
            product_code: model.product_code,
            created_at: model.created_at,
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub struct ProductCodeRepository {
    conn: DatabaseConnection,
    registry: CodeRegistry,
}

impl ProductCodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection, registry: CodeRegistry) -> Self {
        Self { conn, registry }
    }

    /// Newest first
    pub async fn list(&self) -> Result<Vec<ProductCode>> {
        let codes = match self.registry {
            CodeRegistry::Numeric => NumericProductCodes::find()
                .order_by_desc(numeric_product_codes::Column::Id)
                .all(&self.conn)
                .await?
                .into_iter()
                .map(ProductCode::from)
                .collect(),
            CodeRegistry::Alphanumeric => AlphanumericProductCodes::find()
                .order_by_desc(alphanumeric_product_codes::Column::Id)
                .all(&self.conn)
                .await?
                .into_iter()
                .map(ProductCode::from)
                .collect(),
        };

        Ok(codes)
    }

    pub async fn exists(&self, code: &str) -> Result<bool> {
        let count = match self.registry {
            CodeRegistry::Numeric => {
                NumericProductCodes::find()
                    .filter(numeric_product_codes::Column::ProductCode.eq(code))
                    .count(&self.conn)
                    .await?
            }
            CodeRegistry::Alphanumeric => {
                AlphanumericProductCodes::find()
                    .filter(alphanumeric_product_codes::Column::ProductCode.eq(code))
                    .count(&self.conn)
                    .await?
            }
        };

        Ok(count > 0)
    }

    /// Returns `None` when the code is already registered.
    pub async fn add(&self, code: &str, now: DateTime<Utc>) -> Result<Option<ProductCode>> {
        let inserted = match self.registry {
            CodeRegistry::Numeric => numeric_product_codes::ActiveModel {
                product_code: Set(code.to_string()),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&self.conn)
            .await
            .map(ProductCode::from),
            CodeRegistry::Alphanumeric => alphanumeric_product_codes::ActiveModel {
                product_code: Set(code.to_string()),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(&self.conn)
            .await
            .map(ProductCode::from),
        };

        match inserted {
            Ok(code) => Ok(Some(code)),
            Err(e) if is_unique_violation(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to insert product code"),
        }
    }

    /// Returns whether a row was deleted.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = match self.registry {
            CodeRegistry::Numeric => NumericProductCodes::delete_by_id(id).exec(&self.conn).await,
            CodeRegistry::Alphanumeric => {
                AlphanumericProductCodes::delete_by_id(id)
                    .exec(&self.conn)
                    .await
            }
        }
        .context("Failed to delete product code")?;

        Ok(result.rows_affected > 0)
    }
}
