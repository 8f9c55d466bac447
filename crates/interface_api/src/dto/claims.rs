//! Claims DTOs

use serde::Serialize;

use core_kernel::ClaimId;
use domain_settlement::{ClaimInput, SettlementResult, StoredClaim};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    pub claim_id: ClaimId,
    pub status: String,
    pub message: String,
}

impl From<&ClaimInput> for IntakeResponse {
    fn from(claim: &ClaimInput) -> Self {
        Self {
            claim_id: claim.claim_id.clone(),
            status: "QUEUED".to_string(),
            message: "Claim received, stored and queued for settlement".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub claim: ClaimInput,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement: Option<SettlementResult>,
}

impl From<StoredClaim> for ClaimResponse {
    fn from(stored: StoredClaim) -> Self {
        let status = if stored.settlement.is_some() { "SETTLED" } else { "QUEUED" };
        Self {
            claim: stored.claim,
            status: status.to_string(),
            settlement: stored.settlement,
        }
    }
}
