//! Catalog ingestion and storage.
//!
//! These sit outside the planner: the builder turns timeslot listings into
//! a validated [`Catalog`](crate::domain::Catalog), and the store keeps it
//! on disk between runs.

mod error;
mod ingest;
mod store;

pub use error::{IngestError, StoreError};
pub use ingest::{CatalogBuilder, TimeslotOutcome};
pub use store::CatalogStore;
