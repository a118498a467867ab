//! Gigboard Core Library
//!
//! Domain error type and the storage ports the server implements.

// Re-export pure types from gigboard-types
pub use gigboard_types::*;

pub mod error;
pub mod ports;

pub use error::{GigboardError, Result};
pub use ports::{OfferStore, OrderStore, Store, UserStore};
