//! # jsondb-driver
//!
//! An embedded document store that keeps each record as an indented JSON file
//! under `<root>/<collection>/<resource>.json`.
//!
//! Writes go through a staging file and an atomic rename, so readers never
//! see a partially written record. Mutations of one collection are serialized
//! through a per-collection lock; distinct collections never block each other.

mod atomic;
mod driver;
pub mod error;
mod locks;
pub mod logger;
pub mod names;

pub use driver::Driver;
pub use error::{Error, Result};
pub use logger::{LogFacade, Logger, Options};
