//! Ports implemented by storage adapters

pub mod storage;

pub use storage::{OfferStore, OrderStore, Store, UserStore};
