//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use gigboard_core::{GigboardError, OfferStore, OrderStore, UserStore};
use gigboard_types::{
    NewOffer, NewOrder, NewUser, Offer, OfferUpdate, Order, OrderUpdate, RowId, User, UserUpdate,
    ROLE_MAX_LEN,
};
use sqlx::error::ErrorKind;
use sqlx::sqlite::{
    Sqlite, SqliteConnectOptions, SqliteExecutor, SqliteJournalMode, SqlitePoolOptions,
    SqliteSynchronous,
};
use sqlx::{SqlitePool, Transaction};
use std::path::Path;
use std::str::FromStr;

type StoreResult<T> = gigboard_core::Result<T>;

/// URL of the default, process-local store
pub const MEMORY_URL: &str = "sqlite::memory:";

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = if is_memory_url(database_url) {
            tracing::info!("Opening in-memory SQLite database");
            Self::connect_memory(database_url).await?
        } else {
            Self::connect_file(database_url).await?
        };

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn connect_memory(database_url: &str) -> Result<SqlitePool> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid in-memory database URL: {}", database_url))?
            .foreign_keys(false);

        // Every new connection would open a fresh, empty database, so the
        // pool holds exactly one connection and never recycles it.
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory SQLite database")?;

        Ok(pool)
    }

    async fn connect_file(database_url: &str) -> Result<SqlitePool> {
        let database_path = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url);

        tracing::info!("Opening SQLite database at: {}", database_path);

        if let Some(parent) = Path::new(database_path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        // Foreign keys stay off: deleting a user or order never cascades and
        // never fails because other rows still point at it.
        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .foreign_keys(false)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        Ok(pool)
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        let users_table = format!(
            r#"
            CREATE TABLE IF NOT EXISTS "user" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name VARCHAR(100) NOT NULL,
                last_name VARCHAR(100) NOT NULL,
                age INTEGER,
                email VARCHAR(100) NOT NULL,
                role VARCHAR({max_role}) CHECK (role IS NULL OR length(role) <= {max_role}),
                phone VARCHAR(100) UNIQUE
            )
            "#,
            max_role = ROLE_MAX_LEN
        );
        sqlx::query(&users_table).execute(pool).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS "order" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100),
                description TEXT,
                start_date DATE,
                end_date DATE,
                address VARCHAR(255),
                price REAL,
                customer_id INTEGER REFERENCES "user"(id),
                executor_id INTEGER REFERENCES "user"(id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS offer (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id INTEGER REFERENCES "order"(id),
                executor_id INTEGER REFERENCES "user"(id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Close every pooled connection. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Start a transaction. Dropping it without `commit` rolls back.
    pub async fn begin(&self) -> StoreResult<Transaction<'static, Sqlite>> {
        self.pool.begin().await.map_err(map_sqlx_error)
    }
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Classify constraint failures so the HTTP layer can answer 409/422
/// instead of 500.
fn map_sqlx_error(err: sqlx::Error) -> GigboardError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => {
                return GigboardError::Conflict(db_err.message().to_string())
            }
            ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                return GigboardError::Constraint(db_err.message().to_string())
            }
            _ => {}
        }
    }
    GigboardError::Database(err.to_string())
}

pub(crate) async fn insert_user<'e, E>(executor: E, user: &NewUser) -> StoreResult<RowId>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO "user" (first_name, last_name, age, email, role, phone)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(user.age)
    .bind(&user.email)
    .bind(&user.role)
    .bind(&user.phone)
    .execute(executor)
    .await
    .map_err(map_sqlx_error)?;

    Ok(result.last_insert_rowid())
}

pub(crate) async fn insert_order<'e, E>(executor: E, order: &NewOrder) -> StoreResult<RowId>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO "order" (name, description, start_date, end_date, address, price,
                             customer_id, executor_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&order.name)
    .bind(&order.description)
    .bind(order.start_date)
    .bind(order.end_date)
    .bind(&order.address)
    .bind(order.price)
    .bind(order.customer_id)
    .bind(order.executor_id)
    .execute(executor)
    .await
    .map_err(map_sqlx_error)?;

    Ok(result.last_insert_rowid())
}

pub(crate) async fn insert_offer<'e, E>(executor: E, offer: &NewOffer) -> StoreResult<RowId>
where
    E: SqliteExecutor<'e>,
{
    let result = sqlx::query(
        r#"
        INSERT INTO offer (order_id, executor_id)
        VALUES (?1, ?2)
        "#,
    )
    .bind(offer.order_id)
    .bind(offer.executor_id)
    .execute(executor)
    .await
    .map_err(map_sqlx_error)?;

    Ok(result.last_insert_rowid())
}

pub(crate) async fn count_user_rows<'e, E>(executor: E) -> StoreResult<i64>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_scalar(r#"SELECT COUNT(*) FROM "user""#)
        .fetch_one(executor)
        .await
        .map_err(map_sqlx_error)
}

#[async_trait]
impl UserStore for Database {
    async fn create_user(&self, user: &NewUser) -> StoreResult<RowId> {
        insert_user(&self.pool, user).await
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, age, email, role, phone
            FROM "user" ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_user(&self, id: RowId) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, first_name, last_name, age, email, role, phone
            FROM "user" WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn update_user(&self, id: RowId, update: &UserUpdate) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE "user"
            SET first_name = ?1, last_name = ?2, role = ?3, phone = ?4, email = ?5, age = ?6
            WHERE id = ?7
            "#,
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.role)
        .bind(&update.phone)
        .bind(&update.email)
        .bind(update.age)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: RowId) -> StoreResult<bool> {
        let result = sqlx::query(r#"DELETE FROM "user" WHERE id = ?1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_users(&self) -> StoreResult<i64> {
        count_user_rows(&self.pool).await
    }
}

#[async_trait]
impl OrderStore for Database {
    async fn create_order(&self, order: &NewOrder) -> StoreResult<RowId> {
        insert_order(&self.pool, order).await
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, start_date, end_date, address, price,
                   customer_id, executor_id
            FROM "order" ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_order(&self, id: RowId) -> StoreResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, start_date, end_date, address, price,
                   customer_id, executor_id
            FROM "order" WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn update_order(&self, id: RowId, update: &OrderUpdate) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE "order"
            SET name = ?1, description = ?2, start_date = ?3, end_date = ?4, address = ?5,
                price = ?6, customer_id = ?7, executor_id = ?8
            WHERE id = ?9
            "#,
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.start_date)
        .bind(update.end_date)
        .bind(&update.address)
        .bind(update.price)
        .bind(update.customer_id)
        .bind(update.executor_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_order(&self, id: RowId) -> StoreResult<bool> {
        let result = sqlx::query(r#"DELETE FROM "order" WHERE id = ?1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl OfferStore for Database {
    async fn create_offer(&self, offer: &NewOffer) -> StoreResult<RowId> {
        insert_offer(&self.pool, offer).await
    }

    async fn list_offers(&self) -> StoreResult<Vec<Offer>> {
        let rows: Vec<OfferRow> =
            sqlx::query_as(r#"SELECT id, order_id, executor_id FROM offer ORDER BY id"#)
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_offer(&self, id: RowId) -> StoreResult<Option<Offer>> {
        let row: Option<OfferRow> =
            sqlx::query_as(r#"SELECT id, order_id, executor_id FROM offer WHERE id = ?1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into()))
    }

    async fn update_offer(&self, id: RowId, update: &OfferUpdate) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE offer SET order_id = ?1, executor_id = ?2
            WHERE id = ?3
            "#,
        )
        .bind(update.order_id)
        .bind(update.executor_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_offer(&self, id: RowId) -> StoreResult<bool> {
        let result = sqlx::query(r#"DELETE FROM offer WHERE id = ?1"#)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

// Helper structs for sqlx query_as
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    age: Option<i64>,
    email: String,
    role: Option<String>,
    phone: Option<String>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            first_name: r.first_name,
            last_name: r.last_name,
            age: r.age,
            email: r.email,
            role: r.role,
            phone: r.phone,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    name: Option<String>,
    description: Option<String>,
    start_date: Option<chrono::NaiveDate>,
    end_date: Option<chrono::NaiveDate>,
    address: Option<String>,
    price: Option<f64>,
    customer_id: Option<i64>,
    executor_id: Option<i64>,
}

impl From<OrderRow> for Order {
    fn from(r: OrderRow) -> Self {
        Order {
            id: r.id,
            name: r.name,
            description: r.description,
            start_date: r.start_date,
            end_date: r.end_date,
            address: r.address,
            price: r.price,
            customer_id: r.customer_id,
            executor_id: r.executor_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OfferRow {
    id: i64,
    order_id: Option<i64>,
    executor_id: Option<i64>,
}

impl From<OfferRow> for Offer {
    fn from(r: OfferRow) -> Self {
        Offer {
            id: r.id,
            order_id: r.order_id,
            executor_id: r.executor_id,
        }
    }
}
