//! Repository implementations.
//!
//! - `local`: in-memory session store used by the server and the tests
pub mod local;

pub use local::LocalRepository;
