//! In-memory adapters
//!
//! Process-local implementations of every settlement port. They back the
//! development server and the test suites; state lives behind `Arc` so a
//! clone observes the same data as the original.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::info;

use core_kernel::{ClaimId, DomainPort, PortError, PortResult};
use domain_settlement::{
    ClaimInput, ClaimQueue, ClaimStore, Customer, DocumentRef, DocumentStore, Notifier,
    RenderedDocument, SettlementMessage, SettlementPublisher, SettlementResult, StoredClaim,
};

/// Claim store backed by a map
#[derive(Debug, Clone, Default)]
pub struct InMemoryClaimStore {
    claims: Arc<RwLock<HashMap<ClaimId, StoredClaim>>>,
}

impl InMemoryClaimStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.claims.read().await.is_empty()
    }
}

impl DomainPort for InMemoryClaimStore {}

#[async_trait]
impl ClaimStore for InMemoryClaimStore {
    async fn save_claim(&self, claim: &ClaimInput) -> PortResult<()> {
        match self.claims.write().await.entry(claim.claim_id.clone()) {
            Entry::Occupied(_) => Err(PortError::conflict(format!(
                "Claim {} already exists",
                claim.claim_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(StoredClaim {
                    claim: claim.clone(),
                    settlement: None,
                });
                Ok(())
            }
        }
    }

    async fn record_settlement(&self, result: &SettlementResult) -> PortResult<()> {
        let mut claims = self.claims.write().await;
        let stored = claims
            .get_mut(result.claim_id())
            .ok_or_else(|| PortError::not_found("Claim", result.claim_id()))?;
        stored.settlement = Some(result.clone());
        Ok(())
    }

    async fn find_claim(&self, claim_id: &ClaimId) -> PortResult<StoredClaim> {
        self.claims
            .read()
            .await
            .get(claim_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Claim", claim_id))
    }
}

/// Queue backed by an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelClaimQueue {
    sender: mpsc::UnboundedSender<Value>,
}

impl ChannelClaimQueue {
    /// Creates the queue and the receiving end drained by the worker
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Value>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl DomainPort for ChannelClaimQueue {}

#[async_trait]
impl ClaimQueue for ChannelClaimQueue {
    async fn enqueue(&self, body: &Value) -> PortResult<()> {
        self.sender
            .send(body.clone())
            .map_err(|_| PortError::ServiceUnavailable {
                service: "claim-queue".to_string(),
            })
    }
}

/// Publisher that keeps every message it receives
#[derive(Debug, Clone, Default)]
pub struct InMemoryPublisher {
    published: Arc<RwLock<Vec<SettlementMessage>>>,
}

impl InMemoryPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages published so far, oldest first
    pub async fn published(&self) -> Vec<SettlementMessage> {
        self.published.read().await.clone()
    }
}

impl DomainPort for InMemoryPublisher {}

#[async_trait]
impl SettlementPublisher for InMemoryPublisher {
    async fn publish(&self, message: &SettlementMessage) -> PortResult<()> {
        info!(
            message_id = %message.message_id,
            claim_id = %message.claim_id,
            "Settlement message published"
        );
        self.published.write().await.push(message.clone());
        Ok(())
    }
}

/// Document store keyed by file name
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    documents: Arc<RwLock<HashMap<String, RenderedDocument>>>,
}

impl InMemoryDocumentStore {
    const LOCATION_PREFIX: &'static str = "memory://documents/";

    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<RenderedDocument> {
        self.documents.read().await.get(key).cloned()
    }
}

impl DomainPort for InMemoryDocumentStore {}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put(&self, claim_id: &ClaimId, document: RenderedDocument) -> PortResult<DocumentRef> {
        let key = document.file_name.clone();
        self.documents.write().await.insert(key.clone(), document);
        Ok(DocumentRef {
            claim_id: claim_id.clone(),
            location: format!("{}{}", Self::LOCATION_PREFIX, key),
            key,
        })
    }
}

/// A notification as it would have been sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentNotification {
    pub recipient: String,
    pub document: DocumentRef,
}

/// Notifier that logs instead of sending mail
#[derive(Debug, Clone, Default)]
pub struct LoggingNotifier {
    sent: Arc<RwLock<Vec<SentNotification>>>,
}

impl LoggingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentNotification> {
        self.sent.read().await.clone()
    }
}

impl DomainPort for LoggingNotifier {}

#[async_trait]
impl Notifier for LoggingNotifier {
    async fn notify(&self, customer: &Customer, document: &DocumentRef) -> PortResult<()> {
        info!(
            recipient = %customer.email,
            claim_id = %document.claim_id,
            location = %document.location,
            "Invoice available"
        );
        self.sent.write().await.push(SentNotification {
            recipient: customer.email.clone(),
            document: document.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_settlement::{PolicyTerms, RepairDetails, Vehicle};
    use rust_decimal_macros::dec;

    fn claim(id: &str) -> ClaimInput {
        ClaimInput {
            claim_id: ClaimId::new(id),
            customer: Customer::default(),
            vehicle: Vehicle::registered_in(2020),
            policy: PolicyTerms::new("TERCEROS", dec!(0), dec!(0)),
            repair: RepairDetails::new(dec!(100), dec!(0)),
        }
    }

    #[tokio::test]
    async fn test_store_round_trip() {
        let store = InMemoryClaimStore::new();
        store.save_claim(&claim("SIN-1")).await.unwrap();

        let stored = store.find_claim(&ClaimId::new("SIN-1")).await.unwrap();
        assert_eq!(stored.claim.claim_id.as_str(), "SIN-1");
        assert!(stored.settlement.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_claim_is_rejected() {
        let store = InMemoryClaimStore::new();
        let mut first = claim("SIN-1");
        first.customer.name = "Ana".to_string();
        store.save_claim(&first).await.unwrap();

        let mut second = claim("SIN-1");
        second.customer.name = "Luis".to_string();
        let err = store.save_claim(&second).await.unwrap_err();

        assert!(matches!(err, PortError::Conflict { .. }));
        let stored = store.find_claim(&ClaimId::new("SIN-1")).await.unwrap();
        assert_eq!(stored.claim.customer.name, "Ana");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_find_unknown_claim() {
        let store = InMemoryClaimStore::new();
        let err = store.find_claim(&ClaimId::new("NOPE")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_closed_queue_is_unavailable() {
        let (queue, receiver) = ChannelClaimQueue::channel();
        drop(receiver);

        let err = queue.enqueue(&serde_json::json!({})).await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_document_location_uses_key() {
        let store = InMemoryDocumentStore::new();
        let document = RenderedDocument {
            file_name: "invoice_1234ABC_SIN-1.txt".to_string(),
            content_type: "text/plain".to_string(),
            bytes: b"total".to_vec(),
        };

        let reference = store.put(&ClaimId::new("SIN-1"), document).await.unwrap();

        assert_eq!(reference.key, "invoice_1234ABC_SIN-1.txt");
        assert_eq!(reference.location, "memory://documents/invoice_1234ABC_SIN-1.txt");
        assert!(store.get(&reference.key).await.is_some());
    }
}
