//! Repository abstraction for session storage.

pub mod error;
pub mod session;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use session::SessionRepository;
