//! # storage-adapters
//!
//! Concrete implementations of the `domains` persistence ports.
//! The in-memory stores back the client-side application and the test
//! suites; a persistent backend would implement the same traits.

pub mod memory;
pub mod session_file;

pub use memory::{MemorySubmissionRepo, MemoryVerseRepo};
pub use session_file::FileSessionStorage;
