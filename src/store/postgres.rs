//! PostgreSQL backend. Tables live in a schema chosen by configuration (default `public`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::ConnectOptions;
use sqlx::postgres::PgConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use super::Store;
use crate::error::AppError;
use crate::model::{
    Category, Garment, GarmentDraft, GarmentId, Product, ProductDraft, ProductId, Size,
};

const PRODUCT_COLUMNS: &str =
    "id, name, brand, price, color, size, category, description, garment_id, created_at, updated_at";
const GARMENT_COLUMNS: &str = "id, name, location, contact, product_ids, created_at";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    brand: String,
    price: f64,
    color: String,
    size: String,
    category: String,
    description: Option<String>,
    garment_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = AppError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let size = Size::from_str(&row.size)
            .map_err(|_| AppError::Internal(format!("product {}: bad size {:?}", row.id, row.size)))?;
        let category = Category::from_str(&row.category).map_err(|_| {
            AppError::Internal(format!("product {}: bad category {:?}", row.id, row.category))
        })?;
        Ok(Product {
            id: ProductId::from_uuid(row.id),
            name: row.name,
            brand: row.brand,
            price: row.price,
            color: row.color,
            size,
            category,
            description: row.description,
            garment_id: row.garment_id.map(GarmentId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct GarmentRow {
    id: Uuid,
    name: String,
    location: Option<String>,
    contact: f64,
    product_ids: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<GarmentRow> for Garment {
    fn from(row: GarmentRow) -> Self {
        Garment {
            id: GarmentId::from_uuid(row.id),
            name: row.name,
            location: row.location,
            contact: row.contact,
            products: row.product_ids.into_iter().map(ProductId::from_uuid).collect(),
            created_at: row.created_at,
        }
    }
}

fn products_from_rows(rows: Vec<ProductRow>) -> Result<Vec<Product>, AppError> {
    rows.into_iter().map(Product::try_from).collect()
}

pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self {
            pool,
            schema: schema.into(),
        }
    }

    /// Schema-qualified table name (e.g. `public.products`).
    fn table(&self, name: &str) -> String {
        format!("{}.{}", quote_ident(&self.schema), name)
    }

    /// Create the schema and both tables if they do not exist yet.
    pub async fn ensure_tables(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(&self.schema)))
            .execute(&self.pool)
            .await?;

        let garments = self.table("garments");
        let products = self.table("products");

        let garments_ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                location TEXT,
                contact DOUBLE PRECISION NOT NULL,
                product_ids UUID[] NOT NULL DEFAULT '{{}}',
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            garments
        );
        sqlx::query(&garments_ddl).execute(&self.pool).await?;

        let products_ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id UUID PRIMARY KEY,
                name TEXT NOT NULL,
                brand TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
                color TEXT NOT NULL,
                size TEXT NOT NULL,
                category TEXT NOT NULL,
                description TEXT,
                garment_id UUID REFERENCES {}(id) ON DELETE SET NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            products, garments
        );
        sqlx::query(&products_ddl).execute(&self.pool).await?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS products_category_idx ON {} (category)",
            products
        ))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn insert_product_row<'e, E>(&self, executor: E, product: &Product) -> Result<(), AppError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        sqlx::query(&format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            self.table("products"),
            PRODUCT_COLUMNS
        ))
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.price)
        .bind(&product.color)
        .bind(product.size.as_str())
        .bind(product.category.as_str())
        .bind(&product.description)
        .bind(product.garment_id.map(|g| g.as_uuid()))
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(executor)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_products(&self, category: Option<&str>) -> Result<Vec<Product>, AppError> {
        let table = self.table("products");
        let rows: Vec<ProductRow> = match category {
            Some(c) => {
                let sql = format!(
                    "SELECT {} FROM {} WHERE category = $1 ORDER BY created_at, id",
                    PRODUCT_COLUMNS, table
                );
                tracing::debug!(sql = %sql, category = %c, "query");
                sqlx::query_as(&sql).bind(c).fetch_all(&self.pool).await?
            }
            None => {
                let sql = format!("SELECT {} FROM {} ORDER BY created_at, id", PRODUCT_COLUMNS, table);
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as(&sql).fetch_all(&self.pool).await?
            }
        };
        products_from_rows(rows)
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, AppError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {} FROM {} WHERE id = $1",
            PRODUCT_COLUMNS,
            self.table("products")
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Product::try_from).transpose()
    }

    async fn find_products(&self, ids: &[ProductId]) -> Result<Vec<Product>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(ProductId::as_uuid).collect();
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {} FROM {} WHERE id = ANY($1)",
            PRODUCT_COLUMNS,
            self.table("products")
        ))
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await?;
        let mut found = products_from_rows(rows)?;
        let mut ordered = Vec::with_capacity(found.len());
        for id in ids {
            if let Some(pos) = found.iter().position(|p| p.id == *id) {
                ordered.push(found.swap_remove(pos));
            }
        }
        Ok(ordered)
    }

    async fn insert_product(&self, draft: ProductDraft) -> Result<Product, AppError> {
        let product = draft.into_product(None);
        self.insert_product_row(&self.pool, &product).await?;
        Ok(product)
    }

    async fn insert_product_for_garment(
        &self,
        garment_id: GarmentId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, AppError> {
        let garments = self.table("garments");
        let mut tx = self.pool.begin().await?;

        let exists: Option<(Uuid,)> =
            sqlx::query_as(&format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", garments))
                .bind(garment_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let product = draft.into_product(Some(garment_id));
        self.insert_product_row(&mut *tx, &product).await?;
        sqlx::query(&format!(
            "UPDATE {} SET product_ids = array_append(product_ids, $2) WHERE id = $1",
            garments
        ))
        .bind(garment_id.as_uuid())
        .bind(product.id.as_uuid())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(product))
    }

    async fn update_product(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, AppError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "UPDATE {} SET name = $2, brand = $3, price = $4, color = $5, size = $6, category = $7, \
             description = $8, updated_at = NOW() WHERE id = $1 RETURNING {}",
            self.table("products"),
            PRODUCT_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(&draft.name)
        .bind(&draft.brand)
        .bind(draft.price)
        .bind(&draft.color)
        .bind(draft.size.as_str())
        .bind(draft.category.as_str())
        .bind(&draft.description)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Product::try_from).transpose()
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.table("products")))
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query(&format!(
            "UPDATE {} SET product_ids = array_remove(product_ids, $1) WHERE $1 = ANY(product_ids)",
            self.table("garments")
        ))
        .bind(id.as_uuid())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(deleted > 0)
    }

    async fn list_garments(&self) -> Result<Vec<Garment>, AppError> {
        let rows: Vec<GarmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM {} ORDER BY created_at, id",
            GARMENT_COLUMNS,
            self.table("garments")
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Garment::from).collect())
    }

    async fn find_garment(&self, id: GarmentId) -> Result<Option<Garment>, AppError> {
        let row: Option<GarmentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM {} WHERE id = $1",
            GARMENT_COLUMNS,
            self.table("garments")
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Garment::from))
    }

    async fn insert_garment(&self, draft: GarmentDraft) -> Result<Garment, AppError> {
        let garment = draft.into_garment();
        sqlx::query(&format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6)",
            self.table("garments"),
            GARMENT_COLUMNS
        ))
        .bind(garment.id.as_uuid())
        .bind(&garment.name)
        .bind(&garment.location)
        .bind(garment.contact)
        .bind(Vec::<Uuid>::new())
        .bind(garment.created_at)
        .execute(&self.pool)
        .await?;
        Ok(garment)
    }

    async fn delete_garment_cascade(&self, id: GarmentId) -> Result<Option<Garment>, AppError> {
        let mut tx = self.pool.begin().await?;
        let row: Option<GarmentRow> = sqlx::query_as(&format!(
            "DELETE FROM {} WHERE id = $1 RETURNING {}",
            self.table("garments"),
            GARMENT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        if !row.product_ids.is_empty() {
            sqlx::query(&format!("DELETE FROM {} WHERE id = ANY($1)", self.table("products")))
                .bind(&row.product_ids)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(Some(Garment::from(row)))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Create the database named in `database_url` when it is missing. Runs against the
/// `postgres` maintenance database with the same host, credentials and TLS settings.
/// Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = maintenance_options(database_url)?;
    let Some(db_name) = db_name else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the maintenance connection, plus the target database name when it
/// is one that may need creating.
fn maintenance_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| AppError::Internal(format!("invalid DATABASE_URL: {}", e)))?;
    let db_name = opts
        .get_database()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "postgres")
        .map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
