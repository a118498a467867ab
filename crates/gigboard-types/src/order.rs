//! Order types

use crate::RowId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored order row
///
/// `customer_id` and `executor_id` point at users, but nothing guarantees the
/// referenced rows still exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: RowId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub price: Option<f64>,
    pub customer_id: Option<RowId>,
    pub executor_id: Option<RowId>,
}

/// Order creation request (`POST /orders`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOrder {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub customer_id: Option<RowId>,
    #[serde(default)]
    pub executor_id: Option<RowId>,
}

/// Replacement values for every mutable order column (`PUT /orders/{id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderUpdate {
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub name: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub description: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub start_date: Option<NaiveDate>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub end_date: Option<NaiveDate>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub address: Option<String>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub customer_id: Option<RowId>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub executor_id: Option<RowId>,
}
