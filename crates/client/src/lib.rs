//! # Campus Client
//!
//! Data-access facade for the Campus LMS backend.
//!
//! This crate contains:
//! - HTTP transport (auth injection, response unwrapping, global 401 handling)
//! - Error normalization into the shared taxonomy
//! - Per-resource API modules (courses, videos, roles, groups, enrollments)
//! - A fixture-backed offline data source, indistinguishable from the
//!   network path by return shape or error kind
//!
//! ## Architecture
//! - Domain types live in `campus-domain`; this crate holds all "impure" code
//! - Auth is injected through the [`auth::TokenProvider`] / [`auth::SessionGuard`]
//!   traits, never read from a global
//! - Online vs. offline is a strategy decision made once at composition time
//!   (see [`api::CampusClient`]), not a flag checked per call

pub mod api;
pub mod auth;
pub mod config;
pub mod datasource;
pub mod http;

// Re-export commonly used items
pub use api::CampusClient;
pub use auth::{MemorySession, SessionGuard, TokenProvider};
pub use datasource::{FixtureDataSource, RemoteDataSource};
pub use http::{normalize, HttpClient, ProgressSink, TransportError};
