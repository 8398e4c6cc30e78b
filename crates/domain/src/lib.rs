//! # Campus Domain
//!
//! Domain types and models for the Campus LMS data-access facade.
//!
//! This crate contains:
//! - Resource types (Course, CourseVideo, Role, Group, Enrollment)
//! - The pagination contract (`Page<T>`, `ListQuery`)
//! - The error taxonomy (`ApiError`, `ErrorKind`)
//! - Client configuration structures
//!
//! ## Architecture
//! - No dependencies on other Campus crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures; no I/O

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
