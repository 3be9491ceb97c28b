//! Persistence and the document manager for Factura.
//!
//! This crate provides:
//! - Key-value backends (in-memory and one JSON file per collection)
//! - A typed repository over the fixed set of collections
//! - `DocumentManager`, the stateful facade the binaries drive

pub mod backend;
pub mod clock;
pub mod error;
pub mod manager;
pub mod repository;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StoreError, StoreResult};
pub use manager::{DocumentManager, QuoteRow};
pub use repository::{Collection, Repository};
