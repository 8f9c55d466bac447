//! Test Data Builders
//!
//! Provides a builder for raw claim payloads. Tests set only the fields they
//! care about; everything else gets a sensible default.

use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use crate::fixtures::REFERENCE_YEAR;

/// Builder for untyped claim payloads, as received by the API
#[derive(Debug, Clone)]
pub struct RawClaimBuilder {
    claim_id: String,
    customer_name: String,
    national_id: String,
    email: String,
    plate: String,
    make: String,
    model: String,
    registration_year: i32,
    coverage: String,
    deductible: Decimal,
    coverage_limit: Decimal,
    labor_cost: Decimal,
    parts_cost: Decimal,
    workshop: String,
}

impl Default for RawClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RawClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            claim_id: "SIN-TEST-001".to_string(),
            customer_name: "Marta Ruiz".to_string(),
            national_id: "12345678Z".to_string(),
            email: "marta.ruiz@example.com".to_string(),
            plate: "1234ABC".to_string(),
            make: "Seat".to_string(),
            model: "Leon".to_string(),
            registration_year: REFERENCE_YEAR - 5,
            coverage: "TERCEROS".to_string(),
            deductible: dec!(0),
            coverage_limit: dec!(0),
            labor_cost: dec!(1000),
            parts_cost: dec!(500),
            workshop: "Talleres Norte".to_string(),
        }
    }

    pub fn with_claim_id(mut self, id: impl Into<String>) -> Self {
        self.claim_id = id.into();
        self
    }

    /// Replaces the customer with randomly generated data
    pub fn with_fake_customer(mut self) -> Self {
        self.customer_name = Name().fake();
        self.email = SafeEmail().fake();
        self.national_id = format!("{:08}X", (0..99_999_999u32).fake::<u32>());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = plate.into();
        self
    }

    pub fn with_registration_year(mut self, year: i32) -> Self {
        self.registration_year = year;
        self
    }

    /// Sets the registration year so the vehicle is `age` years old in the reference year
    pub fn aged(self, age: i32) -> Self {
        self.with_registration_year(REFERENCE_YEAR - age)
    }

    pub fn with_coverage(mut self, label: impl Into<String>) -> Self {
        self.coverage = label.into();
        self
    }

    pub fn with_deductible(mut self, deductible: Decimal) -> Self {
        self.deductible = deductible;
        self
    }

    pub fn with_limit(mut self, limit: Decimal) -> Self {
        self.coverage_limit = limit;
        self
    }

    /// Sets labor and parts costs
    pub fn with_costs(mut self, labor: Decimal, parts: Decimal) -> Self {
        self.labor_cost = labor;
        self.parts_cost = parts;
        self
    }

    pub fn with_workshop(mut self, workshop: impl Into<String>) -> Self {
        self.workshop = workshop.into();
        self
    }

    /// Builds the payload with camelCase keys
    pub fn build(self) -> Value {
        json!({
            "claimId": self.claim_id,
            "customer": {
                "name": self.customer_name,
                "nationalId": self.national_id,
                "email": self.email
            },
            "vehicle": {
                "registrationPlate": self.plate,
                "make": self.make,
                "model": self.model,
                "registrationYear": self.registration_year
            },
            "policy": {
                "coverageType": self.coverage,
                "deductible": self.deductible.to_string(),
                "coverageLimit": self.coverage_limit.to_string()
            },
            "repair": {
                "laborCost": self.labor_cost.to_string(),
                "partsCost": self.parts_cost.to_string(),
                "workshopName": self.workshop
            }
        })
    }

    /// Builds the payload with the legacy intake-form keys
    pub fn build_legacy(self) -> Value {
        json!({
            "id_siniestro": self.claim_id,
            "cliente": {
                "nombre": self.customer_name,
                "dni": self.national_id,
                "email": self.email
            },
            "vehiculo": {
                "matricula": self.plate,
                "marca": self.make,
                "modelo": self.model,
                "anio_matriculacion": self.registration_year
            },
            "poliza": {
                "tipo": self.coverage,
                "franquicia": self.deductible.to_string(),
                "limite_cobertura": self.coverage_limit.to_string()
            },
            "reparacion": {
                "coste_mano_obra": self.labor_cost.to_string(),
                "coste_piezas": self.parts_cost.to_string(),
                "taller": self.workshop
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_payload_shape() {
        let payload = RawClaimBuilder::new().build();
        assert_eq!(payload["claimId"], "SIN-TEST-001");
        assert_eq!(payload["vehicle"]["registrationYear"], REFERENCE_YEAR - 5);
        assert_eq!(payload["repair"]["laborCost"], "1000");
    }

    #[test]
    fn test_fake_customer_has_email() {
        let payload = RawClaimBuilder::new().with_fake_customer().build();
        let email = payload["customer"]["email"].as_str().unwrap();
        assert!(email.contains('@'));
    }

    #[test]
    fn test_legacy_keys() {
        let payload = RawClaimBuilder::new().with_coverage("FRANQUICIA").build_legacy();
        assert_eq!(payload["poliza"]["tipo"], "FRANQUICIA");
        assert!(payload.get("claimId").is_none());
    }
}
