//! Unit tests for claim references

use core_kernel::{ClaimId, RegistrationPlate, NOT_AVAILABLE};

#[test]
fn test_claim_id_keeps_supplied_value() {
    let id = ClaimId::new("SIN-2024-0042");
    assert_eq!(id.as_str(), "SIN-2024-0042");
    assert!(!id.is_unknown());
}

#[test]
fn test_empty_claim_id_falls_back_to_sentinel() {
    assert_eq!(ClaimId::new("").as_str(), "UNK-000");
    assert_eq!(ClaimId::from(String::new()), ClaimId::unknown());
}

#[test]
fn test_plate_sentinel_differs_from_claim_sentinel() {
    assert_eq!(RegistrationPlate::default().as_str(), "SIN-MAT");
    assert_ne!(RegistrationPlate::sentinel(), ClaimId::sentinel());
}

#[test]
fn test_references_serialize_transparently() {
    let json = serde_json::to_string(&ClaimId::new("A-1")).unwrap();
    assert_eq!(json, "\"A-1\"");

    let plate: RegistrationPlate = serde_json::from_str("\"1234ABC\"").unwrap();
    assert_eq!(plate.as_str(), "1234ABC");
}

#[test]
fn test_not_available_placeholder() {
    assert_eq!(NOT_AVAILABLE, "N/A");
}
