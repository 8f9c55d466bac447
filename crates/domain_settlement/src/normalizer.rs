//! Input normalization
//!
//! Turns an untyped claim payload into a [`ClaimInput`]. Every field is
//! looked up under its camelCase name first, then under the snake_case and
//! legacy intake-form names:
//!
//! | Field | Accepted keys |
//! |---|---|
//! | claim id | `claimId`, `claim_id`, `id_siniestro` |
//! | customer | `customer`, `cliente` → `name`/`nombre`, `nationalId`/`national_id`/`dni`, `email` |
//! | vehicle | `vehicle`, `vehiculo` → `registrationPlate`/`plate`/`matricula`, `make`/`marca`, `model`/`modelo`, `registrationYear`/`registration_year`/`anio_matriculacion`/`anio` |
//! | policy | `policy`, `poliza` → `coverageType`/`coverage_type`/`tipo`, `deductible`/`franquicia`, `coverageLimit`/`coverage_limit`/`limite_cobertura`/`limite` |
//! | repair | `repair`, `reparacion` → `laborCost`/`labor_cost`/`coste_mano_obra`/`mo`, `partsCost`/`parts_cost`/`coste_piezas`/`piezas`, `workshopName`/`workshop`/`taller` |

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

use core_kernel::{ClaimId, RegistrationPlate, NOT_AVAILABLE};
use crate::claim::{ClaimInput, Customer, PolicyTerms, RepairDetails, Vehicle};
use crate::coverage::THIRD_PARTY_LABEL;
use crate::error::SettlementError;

const CLAIM_ID_KEYS: &[&str] = &["claimId", "claim_id", "id_siniestro"];

const CUSTOMER_KEYS: &[&str] = &["customer", "cliente"];
const NAME_KEYS: &[&str] = &["name", "nombre"];
const NATIONAL_ID_KEYS: &[&str] = &["nationalId", "national_id", "dni"];
const EMAIL_KEYS: &[&str] = &["email"];

const VEHICLE_KEYS: &[&str] = &["vehicle", "vehiculo"];
const PLATE_KEYS: &[&str] = &["registrationPlate", "plate", "matricula"];
const MAKE_KEYS: &[&str] = &["make", "marca"];
const MODEL_KEYS: &[&str] = &["model", "modelo"];
const YEAR_KEYS: &[&str] = &["registrationYear", "registration_year", "anio_matriculacion", "anio"];

const POLICY_KEYS: &[&str] = &["policy", "poliza"];
const COVERAGE_TYPE_KEYS: &[&str] = &["coverageType", "coverage_type", "tipo"];
const DEDUCTIBLE_KEYS: &[&str] = &["deductible", "franquicia"];
const LIMIT_KEYS: &[&str] = &["coverageLimit", "coverage_limit", "limite_cobertura", "limite"];

const REPAIR_KEYS: &[&str] = &["repair", "reparacion"];
const LABOR_KEYS: &[&str] = &["laborCost", "labor_cost", "coste_mano_obra", "mo"];
const PARTS_KEYS: &[&str] = &["partsCost", "parts_cost", "coste_piezas", "piezas"];
const WORKSHOP_KEYS: &[&str] = &["workshopName", "workshop", "taller"];

/// A view over one JSON object of the payload
struct Section<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> Section<'a> {
    fn root(payload: &'a Value) -> Result<Self, SettlementError> {
        match payload {
            Value::Object(map) => Ok(Self { fields: Some(map) }),
            _ => Err(SettlementError::validation("claim payload must be a JSON object")),
        }
    }

    /// Nested object under one of `keys`; absent or null means empty
    fn child(&self, keys: &[&str]) -> Result<Section<'a>, SettlementError> {
        match self.lookup(keys) {
            None => Ok(Section { fields: None }),
            Some(Value::Object(map)) => Ok(Section { fields: Some(map) }),
            Some(_) => Err(SettlementError::validation(format!(
                "'{}' must be a JSON object",
                keys[0]
            ))),
        }
    }

    /// First non-null value stored under any of `keys`
    fn lookup(&self, keys: &[&str]) -> Option<&'a Value> {
        let fields = self.fields?;
        keys.iter()
            .filter_map(|key| fields.get(*key))
            .find(|value| !value.is_null())
    }

    /// Text value, or `None` when absent or blank
    fn text(&self, keys: &[&str]) -> Option<String> {
        let text = match self.lookup(keys)? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }

    fn text_or_na(&self, keys: &[&str]) -> String {
        self.text(keys).unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    /// Decimal value; anything non-numeric counts as zero
    ///
    /// A number too large for a `Decimal` is rejected with
    /// `negative_message` when negative and as out of range otherwise.
    fn amount(&self, keys: &[&str], negative_message: &'static str) -> Result<Decimal, SettlementError> {
        let Some(value) = self.lookup(keys) else {
            return Ok(Decimal::ZERO);
        };
        match parse_numeric(value) {
            Numeric::Value(amount) => Ok(amount),
            Numeric::NotANumber => Ok(Decimal::ZERO),
            Numeric::OutOfRange { negative: true } => Err(SettlementError::validation(negative_message)),
            Numeric::OutOfRange { negative: false } => Err(SettlementError::validation(format!(
                "amount out of range: '{}'",
                keys[0]
            ))),
        }
    }
}

/// Result of reading a JSON value as a number
enum Numeric {
    Value(Decimal),
    /// Well-formed number whose magnitude exceeds the `Decimal` range
    OutOfRange { negative: bool },
    NotANumber,
}

/// Parses JSON numbers and numeric strings, including scientific notation
fn parse_numeric(value: &Value) -> Numeric {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Numeric::NotANumber,
    };
    if let Ok(amount) = Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)) {
        return Numeric::Value(amount);
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_nan() => Numeric::NotANumber,
        // below the smallest representable fraction
        Ok(n) if n.abs() < 1.0 => Numeric::Value(Decimal::ZERO),
        Ok(n) => Numeric::OutOfRange {
            negative: n.is_sign_negative(),
        },
        Err(_) => Numeric::NotANumber,
    }
}

/// Registration year, truncated toward zero when fractional
///
/// # Errors
///
/// Returns `SettlementError::Validation` for a numeric year outside the
/// 32-bit range.
fn parse_year(section: &Section<'_>, current_year: i32) -> Result<i32, SettlementError> {
    let year = match section.lookup(YEAR_KEYS).map(parse_numeric) {
        Some(Numeric::Value(year)) => year,
        Some(Numeric::OutOfRange { .. }) => {
            return Err(SettlementError::validation("registration year is out of range"))
        }
        Some(Numeric::NotANumber) | None => return Ok(current_year),
    };
    year.trunc()
        .to_i64()
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| SettlementError::validation(format!("registration year {} is out of range", year)))
}

/// Normalizes a raw claim payload
///
/// `current_year` is used when the registration year is missing.
///
/// # Errors
///
/// Returns `SettlementError::Validation` if the payload is not an object, a
/// section is not an object, a cost, the deductible or the limit is negative,
/// or an amount is too large to represent.
pub fn normalize_claim(payload: &Value, current_year: i32) -> Result<ClaimInput, SettlementError> {
    let root = Section::root(payload)?;
    let customer = root.child(CUSTOMER_KEYS)?;
    let vehicle = root.child(VEHICLE_KEYS)?;
    let policy = root.child(POLICY_KEYS)?;
    let repair = root.child(REPAIR_KEYS)?;

    let claim_id = root.text(CLAIM_ID_KEYS).map(ClaimId::new).unwrap_or_default();

    let labor_cost = repair.amount(LABOR_KEYS, "negative cost")?;
    let parts_cost = repair.amount(PARTS_KEYS, "negative cost")?;
    let deductible = policy.amount(DEDUCTIBLE_KEYS, "negative deductible")?;
    let coverage_limit = policy.amount(LIMIT_KEYS, "negative coverage limit")?;

    let coverage_label = policy
        .text(COVERAGE_TYPE_KEYS)
        .unwrap_or_else(|| THIRD_PARTY_LABEL.to_string());

    let claim = ClaimInput {
        customer: Customer {
            name: customer.text_or_na(NAME_KEYS),
            national_id: customer.text_or_na(NATIONAL_ID_KEYS),
            email: customer.text_or_na(EMAIL_KEYS),
        },
        vehicle: Vehicle {
            registration_plate: vehicle
                .text(PLATE_KEYS)
                .map(RegistrationPlate::new)
                .unwrap_or_default(),
            make: vehicle.text_or_na(MAKE_KEYS),
            model: vehicle.text_or_na(MODEL_KEYS),
            registration_year: parse_year(&vehicle, current_year)?,
        },
        policy: PolicyTerms::new(&coverage_label, deductible, coverage_limit),
        repair: RepairDetails {
            labor_cost,
            parts_cost,
            workshop_name: repair.text_or_na(WORKSHOP_KEYS),
        },
        claim_id,
    };

    claim.validate()?;

    debug!(
        claim_id = %claim.claim_id,
        coverage = %claim.policy.coverage_type,
        registration_year = claim.vehicle.registration_year,
        "Claim normalized"
    );

    Ok(claim)
}
