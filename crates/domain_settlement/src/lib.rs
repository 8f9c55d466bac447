//! Claim Settlement Domain
//!
//! This crate turns a vehicle repair claim into a settlement: who pays what
//! and why.
//!
//! # Pipeline
//!
//! ```text
//! raw payload -> normalize -> depreciate parts -> tax -> resolve coverage -> assemble
//! ```
//!
//! Amounts are carried as exact decimals and rounded once, when the
//! settlement is assembled. The [`ports`] module declares the collaborators
//! around the engine (claim store, queue, publisher, documents, notifier).

pub mod claim;
pub mod config;
pub mod coverage;
pub mod depreciation;
pub mod tax;
pub mod settlement;
pub mod normalizer;
pub mod engine;
pub mod message;
pub mod ports;
pub mod error;

pub use claim::{ClaimInput, Customer, Vehicle, PolicyTerms, RepairDetails};
pub use config::SettlementConfig;
pub use coverage::{CoverageType, CoverageSplit, resolve_coverage};
pub use depreciation::{Depreciation, DepreciationRule};
pub use tax::{TaxBreakdown, compute_tax};
pub use settlement::SettlementResult;
pub use normalizer::normalize_claim;
pub use engine::SettlementEngine;
pub use message::{SettlementMessage, FinancialDetail};
pub use ports::{
    ClaimStore, ClaimQueue, SettlementPublisher, DocumentRenderer, DocumentStore, Notifier,
    StoredClaim, RenderedDocument, DocumentRef,
};
pub use error::SettlementError;
