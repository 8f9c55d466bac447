//! Claim processing workflow
//!
//! The [`ClaimProcessor`] is the single place where the settlement engine and
//! its collaborators meet. Both entry points share it:
//!
//! - the synchronous path settles a claim and produces its invoice
//! - the asynchronous path persists the claim, queues it, and later settles
//!   and publishes it from the queue worker

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::ClaimId;
use domain_settlement::{
    ClaimInput, ClaimQueue, ClaimStore, DocumentRef, DocumentRenderer, DocumentStore, Notifier,
    SettlementEngine, SettlementMessage, SettlementPublisher, SettlementResult, StoredClaim,
};

use crate::error::ProcessingError;

/// The ports the processor depends on
#[derive(Clone)]
pub struct Collaborators {
    pub store: Arc<dyn ClaimStore>,
    pub queue: Arc<dyn ClaimQueue>,
    pub publisher: Arc<dyn SettlementPublisher>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub documents: Arc<dyn DocumentStore>,
    pub notifier: Arc<dyn Notifier>,
}

/// Outcome of the synchronous settlement path
#[derive(Debug, Clone)]
pub struct SettledClaim {
    pub claim: ClaimInput,
    pub result: SettlementResult,
    pub document: DocumentRef,
}

/// Orchestrates settlement and the side effects around it
#[derive(Clone)]
pub struct ClaimProcessor {
    engine: SettlementEngine,
    ports: Collaborators,
}

impl ClaimProcessor {
    pub fn new(engine: SettlementEngine, ports: Collaborators) -> Self {
        Self { engine, ports }
    }

    pub fn engine(&self) -> &SettlementEngine {
        &self.engine
    }

    /// Accepts a claim for asynchronous settlement
    ///
    /// The payload is normalized first so malformed claims are rejected
    /// before anything is persisted. The raw body, not the normalized
    /// record, is what gets queued.
    pub async fn intake(&self, payload: &Value) -> Result<ClaimInput, ProcessingError> {
        let claim = self.engine.normalize(payload)?;

        self.ports.store.save_claim(&claim).await?;
        self.ports.queue.enqueue(payload).await?;

        info!(claim_id = %claim.claim_id, "Claim stored and queued for settlement");
        Ok(claim)
    }

    /// Settles a claim without side effects
    pub fn preview(&self, payload: &Value) -> Result<(ClaimInput, SettlementResult), ProcessingError> {
        Ok(self.engine.settle_raw(payload)?)
    }

    /// Settles a claim, stores its invoice and notifies the customer
    ///
    /// A failed notification is logged; the invoice is already stored and
    /// the settlement stands.
    pub async fn settle_now(&self, payload: &Value) -> Result<SettledClaim, ProcessingError> {
        let (claim, result) = self.engine.settle_raw(payload)?;

        let rendered = self.ports.renderer.render(&claim, &result).await?;
        let document = self.ports.documents.put(&claim.claim_id, rendered).await?;

        if let Err(e) = self.ports.notifier.notify(&claim.customer, &document).await {
            warn!(claim_id = %claim.claim_id, error = %e, "Customer notification failed");
        }

        info!(
            claim_id = %claim.claim_id,
            document = %document.key,
            "Invoice generated"
        );

        Ok(SettledClaim {
            claim,
            result,
            document,
        })
    }

    /// Settles one queued claim and publishes the settlement message
    ///
    /// The body may be the claim object itself or a JSON string holding it.
    /// Recording the settlement on the stored claim is best effort: a
    /// failure is logged and publication still happens.
    pub async fn process_queued(&self, body: &Value) -> Result<SettlementMessage, ProcessingError> {
        let decoded;
        let payload = match body {
            Value::String(text) => {
                decoded = serde_json::from_str::<Value>(text)
                    .map_err(|e| ProcessingError::MalformedRecord(e.to_string()))?;
                &decoded
            }
            other => other,
        };

        let (claim, result) = self.engine.settle_raw(payload)?;

        if let Err(e) = self.ports.store.record_settlement(&result).await {
            warn!(
                claim_id = %result.claim_id(),
                error = %e,
                "Could not record settlement on stored claim"
            );
        }

        let message = SettlementMessage::new(&claim, &result, self.engine.now());
        self.ports.publisher.publish(&message).await?;

        Ok(message)
    }

    /// Looks up a stored claim
    pub async fn find_claim(&self, claim_id: &ClaimId) -> Result<StoredClaim, ProcessingError> {
        Ok(self.ports.store.find_claim(claim_id).await?)
    }
}
