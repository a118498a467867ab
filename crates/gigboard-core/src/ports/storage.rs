//! Storage traits for persistence
//!
//! Every operation touches exactly one row (or reads one table) and either
//! succeeds completely or leaves the store unchanged. `update_*` and
//! `delete_*` return `false` when no row has the given id.

use crate::Result;
use async_trait::async_trait;
use gigboard_types::{
    NewOffer, NewOrder, NewUser, Offer, OfferUpdate, Order, OrderUpdate, RowId, User, UserUpdate,
};

/// User store
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return the assigned id
    async fn create_user(&self, user: &NewUser) -> Result<RowId>;
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn get_user(&self, id: RowId) -> Result<Option<User>>;
    async fn update_user(&self, id: RowId, update: &UserUpdate) -> Result<bool>;
    async fn delete_user(&self, id: RowId) -> Result<bool>;
    async fn count_users(&self) -> Result<i64>;
}

/// Order store
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert an order and return the assigned id
    async fn create_order(&self, order: &NewOrder) -> Result<RowId>;
    async fn list_orders(&self) -> Result<Vec<Order>>;
    async fn get_order(&self, id: RowId) -> Result<Option<Order>>;
    async fn update_order(&self, id: RowId, update: &OrderUpdate) -> Result<bool>;
    async fn delete_order(&self, id: RowId) -> Result<bool>;
}

/// Offer store
#[async_trait]
pub trait OfferStore: Send + Sync {
    /// Insert an offer and return the assigned id
    async fn create_offer(&self, offer: &NewOffer) -> Result<RowId>;
    async fn list_offers(&self) -> Result<Vec<Offer>>;
    async fn get_offer(&self, id: RowId) -> Result<Option<Offer>>;
    async fn update_offer(&self, id: RowId, update: &OfferUpdate) -> Result<bool>;
    async fn delete_offer(&self, id: RowId) -> Result<bool>;
}

/// A backend holding all three tables
pub trait Store: UserStore + OrderStore + OfferStore {}

impl<T> Store for T where T: UserStore + OrderStore + OfferStore {}
