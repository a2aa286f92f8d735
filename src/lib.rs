//! SQLite-backed person registry with GDPR utilities.
//!
//! # Intention
//!
//! - Keep a single `persons` table, seeded with demo rows on first start.
//! - Offer the two privacy operations: hard delete of all rows and
//!   anonymization of all names.
//!
//! # Architectural Boundaries
//!
//! - Only SQLite/database code belongs here; printing and signal handling
//!   live in the binary.
//! - Configuration is passed in explicitly via [`StoreConfig`].

pub mod config;
pub mod error;
pub mod record;
pub mod schema;
pub mod sqlite;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use record::{NewPerson, PersonRecord, ANONYMIZED_NAME, SEED_PERSONS};
pub use sqlite::{InitOutcome, PersonStore};
