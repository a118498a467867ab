//! Startup seed data
//!
//! The seed file is a JSON object with `users`, `orders` and `offers` lists.
//! Entries use the same field whitelists as the POST endpoints, except that
//! order dates are written as `MM/DD/YYYY`. Rows are inserted in file order,
//! so on an empty store the n-th user gets id n and later entries can refer
//! to it by that id.

use super::db::{count_user_rows, insert_offer, insert_order, insert_user, Database};
use chrono::NaiveDate;
use gigboard_core::{GigboardError, Result, RowId};
use gigboard_types::{NewOffer, NewOrder, NewUser};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Date format used by order dates in seed files
pub const SEED_DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<NewUser>,
    #[serde(default)]
    pub orders: Vec<SeedOrder>,
    #[serde(default)]
    pub offers: Vec<NewOffer>,
}

/// Order entry as written in a seed file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedOrder {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub customer_id: Option<RowId>,
    #[serde(default)]
    pub executor_id: Option<RowId>,
}

impl SeedOrder {
    pub fn into_new_order(self) -> Result<NewOrder> {
        Ok(NewOrder {
            name: self.name,
            description: self.description,
            start_date: self.start_date.as_deref().map(parse_seed_date).transpose()?,
            end_date: self.end_date.as_deref().map(parse_seed_date).transpose()?,
            address: self.address,
            price: self.price,
            customer_id: self.customer_id,
            executor_id: self.executor_id,
        })
    }
}

/// Number of rows inserted per table
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub orders: usize,
    pub offers: usize,
}

impl SeedData {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| GigboardError::Seed(format!("Invalid seed data: {}", e)))
    }

    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&content).map_err(|e| {
            GigboardError::Seed(format!("Invalid seed data in {}: {}", path.display(), e))
        })
    }
}

/// Parse an `MM/DD/YYYY` seed date
pub fn parse_seed_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), SEED_DATE_FORMAT).map_err(|e| {
        GigboardError::Seed(format!(
            "Invalid date `{}` (expected MM/DD/YYYY): {}",
            text, e
        ))
    })
}

/// Insert the seed rows unless the store already holds users.
///
/// Every order date is parsed before the first insert, and all rows go in
/// through one transaction, so a failed seed leaves the store untouched.
pub async fn load_seed(db: &Database, data: SeedData) -> Result<SeedReport> {
    let mut tx = db.begin().await?;

    let existing = count_user_rows(&mut *tx).await?;
    if existing > 0 {
        info!("Store already holds {} users, skipping seed data", existing);
        return Ok(SeedReport::default());
    }

    let orders = data
        .orders
        .into_iter()
        .map(SeedOrder::into_new_order)
        .collect::<Result<Vec<_>>>()?;

    let mut report = SeedReport::default();

    for user in &data.users {
        insert_user(&mut *tx, user).await?;
        report.users += 1;
    }
    for order in &orders {
        insert_order(&mut *tx, order).await?;
        report.orders += 1;
    }
    for offer in &data.offers {
        insert_offer(&mut *tx, offer).await?;
        report.offers += 1;
    }

    tx.commit()
        .await
        .map_err(|e| GigboardError::Database(e.to_string()))?;

    info!(
        "Seeded {} users, {} orders, {} offers",
        report.users, report.orders, report.offers
    );

    Ok(report)
}
