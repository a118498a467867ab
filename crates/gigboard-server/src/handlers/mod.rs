//! HTTP handlers
//!
//! One module per entity, each exposing `list`/`create` for the collection
//! route and `get`/`update`/`delete` for the item route.

pub mod health;
pub mod offers;
pub mod orders;
pub mod users;

pub use health::health;

use crate::error::ApiError;
use crate::AppState;
use gigboard_core::{GigboardError, OrderStore, RowId, UserStore};

/// Reject a user reference that points at no row.
///
/// Only enforced when `check_references` is enabled; a `None` reference is
/// always accepted.
pub(crate) async fn ensure_user_exists(
    state: &AppState,
    field: &'static str,
    id: Option<RowId>,
) -> Result<(), ApiError> {
    let Some(id) = id.filter(|_| state.check_references) else {
        return Ok(());
    };
    if state.store.get_user(id).await?.is_none() {
        return Err(GigboardError::MissingReference {
            field,
            entity: "user",
            id,
        }
        .into());
    }
    Ok(())
}

/// Order counterpart of [`ensure_user_exists`]
pub(crate) async fn ensure_order_exists(
    state: &AppState,
    field: &'static str,
    id: Option<RowId>,
) -> Result<(), ApiError> {
    let Some(id) = id.filter(|_| state.check_references) else {
        return Ok(());
    };
    if state.store.get_order(id).await?.is_none() {
        return Err(GigboardError::MissingReference {
            field,
            entity: "order",
            id,
        }
        .into());
    }
    Ok(())
}
