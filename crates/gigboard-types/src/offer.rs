//! Offer types

use crate::RowId;
use serde::{Deserialize, Serialize};

/// Stored offer row: an executor bidding on an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: RowId,
    pub order_id: Option<RowId>,
    pub executor_id: Option<RowId>,
}

/// Offer creation request (`POST /offers`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewOffer {
    #[serde(default)]
    pub order_id: Option<RowId>,
    #[serde(default)]
    pub executor_id: Option<RowId>,
}

/// Replacement values for every mutable offer column (`PUT /offers/{id}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OfferUpdate {
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub order_id: Option<RowId>,
    #[serde(deserialize_with = "crate::nullable::deserialize")]
    pub executor_id: Option<RowId>,
}
