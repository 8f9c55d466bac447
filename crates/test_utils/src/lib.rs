//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim settlement test suite.
//!
//! # Modules
//!
//! - `fixtures`: Raw claim payloads for the reference scenarios and a fixed-clock engine
//! - `builders`: Builder for raw claim payloads
//! - `assertions`: Custom assertion helpers for settlement results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
