//! Storage layer
//!
//! Uses SQLite (embedded). The default URL keeps the whole store in memory;
//! a file path gives a persistent store with the same schema.

pub mod db;
pub mod seed;

pub use db::{Database, MEMORY_URL};
pub use seed::{load_seed, SeedData};
