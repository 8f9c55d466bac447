//! Core Kernel - Foundational types shared by the settlement crates
//!
//! This crate provides the building blocks used across the workspace:
//! - Money and rate types with precise decimal arithmetic
//! - Clocks and jurisdiction timezones
//! - Claim references with sentinel defaults
//! - The error type and marker trait for collaborator ports

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, Rate};
pub use temporal::{Clock, SystemClock, FixedClock, Timezone, TemporalError};
pub use identifiers::{ClaimId, RegistrationPlate, NOT_AVAILABLE};
pub use ports::{PortError, PortResult, DomainPort};
