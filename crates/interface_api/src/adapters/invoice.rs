//! Plain-text invoice renderer

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::sync::Arc;

use core_kernel::{Clock, DomainPort, PortError, PortResult, Rate};
use domain_settlement::{ClaimInput, DocumentRenderer, RenderedDocument, SettlementResult};

const RULE: &str = "================================================================";
const THIN_RULE: &str = "----------------------------------------";

/// Renders the claim invoice as a fixed-width text document
#[derive(Clone)]
pub struct TextInvoiceRenderer {
    tax_rate: Rate,
    clock: Arc<dyn Clock>,
}

impl TextInvoiceRenderer {
    pub fn new(tax_rate: Rate, clock: Arc<dyn Clock>) -> Self {
        Self { tax_rate, clock }
    }

    /// Storage name of the invoice of a claim
    pub fn file_name(claim: &ClaimInput) -> String {
        format!(
            "invoice_{}_{}.txt",
            claim.vehicle.registration_plate, claim.claim_id
        )
    }

    fn render_text(&self, claim: &ClaimInput, result: &SettlementResult) -> Result<String, std::fmt::Error> {
        let code = result.currency().code();
        let amount = |value: Decimal| format!("{:>10.2} {}", value, code);
        let issued_at = self
            .clock
            .timezone()
            .to_local(self.clock.now())
            .format("%Y-%m-%d %H:%M:%S");

        let mut out = String::new();
        writeln!(out, "{}", RULE)?;
        writeln!(out, "                    CLAIM SETTLEMENT INVOICE")?;
        writeln!(out, "{}", RULE)?;
        writeln!(out, "Claim ID:        {}", claim.claim_id)?;
        writeln!(out, "Issued:          {}", issued_at)?;
        writeln!(out)?;
        writeln!(out, "INSURED")?;
        writeln!(out, "{}", THIN_RULE)?;
        writeln!(out, "Customer:        {}", claim.customer.name)?;
        writeln!(out, "National ID:     {}", claim.customer.national_id)?;
        writeln!(out, "Email:           {}", claim.customer.email)?;
        writeln!(out)?;
        writeln!(out, "VEHICLE")?;
        writeln!(out, "{}", THIN_RULE)?;
        writeln!(out, "Plate:           {}", claim.vehicle.registration_plate)?;
        writeln!(out, "Model:           {} {}", claim.vehicle.make, claim.vehicle.model)?;
        writeln!(
            out,
            "Age:             {} years (registered {})",
            result.vehicle_age_years(),
            claim.vehicle.registration_year
        )?;
        writeln!(out)?;
        writeln!(out, "REPAIR")?;
        writeln!(out, "{}", THIN_RULE)?;
        writeln!(out, "Workshop:        {}", claim.repair.workshop_name)?;
        writeln!(out, "(+) Labor:               {}", amount(claim.repair.labor_cost))?;
        writeln!(out, "(+) Parts:               {}", amount(claim.repair.parts_cost))?;
        writeln!(out, "(-) Parts depreciation:  {}", amount(result.depreciation_applied()))?;
        writeln!(out, "    * {}", result.depreciation_note())?;
        writeln!(out, "{}", THIN_RULE)?;
        writeln!(out, "TAXABLE BASE:            {}", amount(result.taxable_base()))?;
        writeln!(
            out,
            "(+) Tax ({:<4}):          {}",
            self.tax_rate.to_string(),
            amount(result.tax_amount())
        )?;
        writeln!(out, "{}", THIN_RULE)?;
        writeln!(out, "TOTAL:                   {}", amount(result.total_cost()))?;
        writeln!(out, "{}", RULE)?;
        writeln!(out)?;
        writeln!(out, "COVERAGE")?;
        writeln!(out, "{}", THIN_RULE)?;
        writeln!(out, "Policy type:     {} ({})", claim.policy.coverage_label, result.coverage_type())?;
        writeln!(out, "Deductible:      {:.2} {}", claim.policy.deductible, code)?;
        writeln!(out, "Coverage limit:  {:.2} {}", claim.policy.coverage_limit, code)?;
        writeln!(out)?;
        writeln!(out, "RESOLUTION:")?;
        writeln!(out, "{}", result.resolution_note())?;
        writeln!(out)?;
        writeln!(out, "{}", RULE)?;
        writeln!(out, ">> PAID BY INSURER:      {}", amount(result.insurer_payment()))?;
        writeln!(out, ">> PAID BY CUSTOMER:     {}", amount(result.customer_payment()))?;
        writeln!(out, "{}", RULE)?;
        Ok(out)
    }
}

impl DomainPort for TextInvoiceRenderer {}

#[async_trait]
impl DocumentRenderer for TextInvoiceRenderer {
    async fn render(
        &self,
        claim: &ClaimInput,
        result: &SettlementResult,
    ) -> PortResult<RenderedDocument> {
        let text = self
            .render_text(claim, result)
            .map_err(|e| PortError::transformation(format!("invoice rendering failed: {}", e)))?;

        Ok(RenderedDocument {
            file_name: Self::file_name(claim),
            content_type: "text/plain; charset=utf-8".to_string(),
            bytes: text.into_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{ClaimId, FixedClock, RegistrationPlate};
    use domain_settlement::{SettlementConfig, SettlementEngine};
    use serde_json::json;

    fn settle(payload: serde_json::Value) -> (ClaimInput, SettlementResult) {
        let clock = Arc::new(FixedClock::at_year(2025).unwrap());
        let engine = SettlementEngine::new(SettlementConfig::default(), clock).unwrap();
        engine.settle_raw(&payload).unwrap()
    }

    fn renderer() -> TextInvoiceRenderer {
        let config = SettlementConfig::default();
        TextInvoiceRenderer::new(config.tax_rate, Arc::new(FixedClock::at_year(2025).unwrap()))
    }

    #[test]
    fn test_file_name_uses_plate_sentinel() {
        let (mut claim, _) = settle(json!({"claimId": "SIN-9"}));
        assert_eq!(TextInvoiceRenderer::file_name(&claim), "invoice_SIN-MAT_SIN-9.txt");

        claim.vehicle.registration_plate = RegistrationPlate::new("1234ABC");
        claim.claim_id = ClaimId::new("SIN-10");
        assert_eq!(TextInvoiceRenderer::file_name(&claim), "invoice_1234ABC_SIN-10.txt");
    }

    #[tokio::test]
    async fn test_invoice_lists_settlement() {
        let (claim, result) = settle(json!({
            "claimId": "SIN-9",
            "customer": {"name": "Marta Ruiz"},
            "vehicle": {"registrationPlate": "1234ABC", "registrationYear": 2010},
            "policy": {"coverageType": "FRANQUICIA", "deductible": 300, "coverageLimit": 1000},
            "repair": {"laborCost": 1000, "partsCost": 500, "workshopName": "Talleres Norte"}
        }));

        let document = renderer().render(&claim, &result).await.unwrap();
        let text = String::from_utf8(document.bytes).unwrap();

        assert_eq!(document.file_name, "invoice_1234ABC_SIN-9.txt");
        assert!(text.contains("Claim ID:        SIN-9"));
        assert!(text.contains("Issued:          2025-07-01 12:00:00"));
        assert!(text.contains("Marta Ruiz"));
        assert!(text.contains("Talleres Norte"));
        assert!(text.contains("21%"));
        assert!(text.contains("1694.00 EUR"));
        assert!(text.contains(">> PAID BY INSURER:         1000.00 EUR"));
        assert!(text.contains(">> PAID BY CUSTOMER:         694.00 EUR"));
        assert!(text.contains("Deductible of 300.00 applied"));
    }
}
