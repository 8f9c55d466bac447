//! Settlement Domain Ports
//!
//! Collaborators the claim workflow talks to. Each port is a trait so that
//! managed services, in-memory fakes and test doubles are interchangeable.
//!
//! # Workflow
//!
//! ```text
//! intake ──► ClaimStore::save_claim ──► ClaimQueue::enqueue
//!                                            │
//! queue worker ◄─────────────────────────────┘
//!     │ settle
//!     ├──► ClaimStore::record_settlement
//!     └──► SettlementPublisher::publish
//!
//! settle now
//!     │ settle
//!     ├──► DocumentRenderer::render ──► DocumentStore::put
//!     └──► Notifier::notify
//! ```
//!
//! All methods return `PortResult<T>` so callers treat every adapter alike.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{ClaimId, DomainPort, PortResult};
use crate::claim::{ClaimInput, Customer};
use crate::message::SettlementMessage;
use crate::settlement::SettlementResult;

/// A claim as persisted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredClaim {
    pub claim: ClaimInput,
    /// Present once the claim has been settled
    pub settlement: Option<SettlementResult>,
}

/// Persistence of claims and their settlements
#[async_trait]
pub trait ClaimStore: DomainPort {
    /// Stores a newly received claim
    ///
    /// Returns `PortError::Conflict` if a claim with the same id is already
    /// stored; the stored claim is left untouched.
    async fn save_claim(&self, claim: &ClaimInput) -> PortResult<()>;

    /// Attaches a settlement to an existing claim
    ///
    /// Returns `PortError::NotFound` if the claim was never saved.
    async fn record_settlement(&self, result: &SettlementResult) -> PortResult<()>;

    async fn find_claim(&self, claim_id: &ClaimId) -> PortResult<StoredClaim>;
}

/// Hand-off between intake and the asynchronous settlement stage
#[async_trait]
pub trait ClaimQueue: DomainPort {
    /// Queues a raw claim body for settlement
    async fn enqueue(&self, body: &Value) -> PortResult<()>;
}

/// Destination of settlement messages
#[async_trait]
pub trait SettlementPublisher: DomainPort {
    async fn publish(&self, message: &SettlementMessage) -> PortResult<()>;
}

/// A rendered document ready for storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Produces the customer-facing document for a settlement
#[async_trait]
pub trait DocumentRenderer: DomainPort {
    async fn render(
        &self,
        claim: &ClaimInput,
        result: &SettlementResult,
    ) -> PortResult<RenderedDocument>;
}

/// Reference to a stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRef {
    pub claim_id: ClaimId,
    pub key: String,
    /// Where the document can be fetched from
    pub location: String,
}

/// Storage of rendered documents
#[async_trait]
pub trait DocumentStore: DomainPort {
    async fn put(&self, claim_id: &ClaimId, document: RenderedDocument) -> PortResult<DocumentRef>;
}

/// Tells the customer a document is available
#[async_trait]
pub trait Notifier: DomainPort {
    async fn notify(&self, customer: &Customer, document: &DocumentRef) -> PortResult<()>;
}
