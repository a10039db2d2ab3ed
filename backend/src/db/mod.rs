//! Session storage.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP handlers / CLI                                    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - ingest on the blocking pool, then replace or reset   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - SessionRepository     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼──────────────────────────────┐
//!     │  LocalRepository (in-memory, RwLock<HashMap>) │
//!     └──────────────────────────────────────────────┘
//! ```

pub mod checksum;
pub mod repositories;
pub mod repository;
pub mod services;

pub use checksum::batch_checksum;
pub use repositories::LocalRepository;
pub use repository::{ErrorContext, RepositoryError, RepositoryResult, SessionRepository};
pub use services::{health_check, session_table, store_upload, UploadError};
