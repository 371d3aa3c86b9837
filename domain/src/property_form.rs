//! Add/edit/remove property form handling.
//!
//! Validation collects every problem so the page can mark all offending
//! fields at once, then the request builders turn a clean draft into the
//! JSON snapshot the server expects.

use chrono::NaiveDate;
use log::{info, warn};
use shared::{
    AddPropertyRequest, CalculatorConfig, EditPropertyRequest, FieldError, PropertyDraft, PurchaseTerms,
    RemovePropertyRequest,
};

use crate::cashflow::CashFlowService;
use crate::equity::EquityService;
use crate::error::{NumericError, RemovalError};
use crate::mortgage::{implied_loan_amount, monthly_payment};
use crate::numeric::{parse_non_negative, try_parse_number};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
const MAX_LOAN_TERM_YEARS: f64 = 50.0;

/// Validation result for the property form
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFormValidation {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl PropertyFormValidation {
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PropertyFormService {
    equity: EquityService,
    cash_flow: CashFlowService,
}

impl PropertyFormService {
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            equity: EquityService::with_config(config),
            cash_flow: CashFlowService::new(),
        }
    }

    pub fn validate(&self, draft: &PropertyDraft) -> PropertyFormValidation {
        let mut errors = Vec::new();

        if draft.address.trim().is_empty() {
            errors.push(FieldError::new("address", "Property address is required"));
        }

        let terms = &draft.purchase;
        match try_parse_number(&terms.purchase_price) {
            Ok(price) if price <= 0.0 => {
                errors.push(FieldError::new("purchase_price", "Purchase price must be greater than 0"))
            }
            Ok(_) => {}
            Err(NumericError::Empty) => errors.push(FieldError::new("purchase_price", "Purchase price is required")),
            Err(_) => errors.push(FieldError::new("purchase_price", "Purchase price must be a number")),
        }

        check_optional_range(&mut errors, "down_payment", "Down payment", &terms.down_payment, 0.0, f64::MAX);
        check_optional_range(&mut errors, "loan_amount", "Loan amount", &terms.loan_amount, 0.0, f64::MAX);
        check_optional_range(&mut errors, "interest_rate", "Interest rate", &terms.interest_rate, 0.0, 100.0);
        check_optional_range(
            &mut errors,
            "loan_term_years",
            "Loan term",
            &terms.loan_term_years,
            0.0,
            MAX_LOAN_TERM_YEARS,
        );
        check_optional_range(&mut errors, "closing_costs", "Closing costs", &terms.closing_costs, 0.0, f64::MAX);

        if let (Ok(price), Ok(down)) = (
            try_parse_number(&terms.purchase_price),
            try_parse_number(&terms.down_payment),
        ) {
            if down > price && price > 0.0 {
                errors.push(FieldError::new("down_payment", "Down payment cannot exceed the purchase price"));
            }
        }

        let purchase_date = terms.purchase_date.trim();
        if !purchase_date.is_empty() && NaiveDate::parse_from_str(purchase_date, DATE_FORMAT).is_err() {
            errors.push(FieldError::new("purchase_date", "Purchase date must be in YYYY-MM-DD format"));
        }

        let partners = self.equity.parse_partners(&draft.partners);
        errors.extend(self.equity.partner_field_errors(&partners));

        if !errors.is_empty() {
            warn!("Property form has {} validation error(s)", errors.len());
        }

        PropertyFormValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Monthly payment to pre-fill the first mortgage expense with
    pub fn suggested_mortgage_payment(&self, terms: &PurchaseTerms) -> Option<f64> {
        let loan = self.effective_loan_amount(terms);
        let payment = monthly_payment(
            loan,
            parse_non_negative(&terms.interest_rate),
            parse_non_negative(&terms.loan_term_years),
        );
        (payment > 0.0).then_some(payment)
    }

    /// The typed loan amount, or price minus down payment when left blank
    fn effective_loan_amount(&self, terms: &PurchaseTerms) -> f64 {
        if terms.loan_amount.trim().is_empty() {
            implied_loan_amount(
                parse_non_negative(&terms.purchase_price),
                parse_non_negative(&terms.down_payment),
            )
        } else {
            parse_non_negative(&terms.loan_amount)
        }
    }

    pub fn build_add_request(&self, draft: &PropertyDraft) -> Result<AddPropertyRequest, Vec<FieldError>> {
        let validation = self.validate(draft);
        if !validation.is_valid {
            return Err(validation.errors);
        }

        let terms = &draft.purchase;
        let income = self.cash_flow.parse_income(&draft.income);
        let expenses = self.cash_flow.parse_expenses(&draft.expenses);
        let cash_flow = self.cash_flow.summarize_figures(&income, &expenses);
        let purchase_date = terms.purchase_date.trim();

        let request = AddPropertyRequest {
            address: draft.address.trim().to_string(),
            purchase_date: (!purchase_date.is_empty()).then(|| purchase_date.to_string()),
            purchase_price: parse_non_negative(&terms.purchase_price),
            down_payment: parse_non_negative(&terms.down_payment),
            loan_amount: self.effective_loan_amount(terms),
            interest_rate: parse_non_negative(&terms.interest_rate),
            loan_term_years: parse_non_negative(&terms.loan_term_years),
            closing_costs: parse_non_negative(&terms.closing_costs),
            income,
            expenses,
            cash_flow,
            partners: self.equity.parse_partners(&draft.partners),
        };

        info!(
            "Built property request for '{}' with {} partner(s)",
            request.address,
            request.partners.len()
        );
        Ok(request)
    }

    pub fn build_edit_request(
        &self,
        property_id: &str,
        draft: &PropertyDraft,
    ) -> Result<EditPropertyRequest, Vec<FieldError>> {
        let property_id = property_id.trim();
        let built = self.build_add_request(draft);

        match (property_id.is_empty(), built) {
            (false, Ok(property)) => Ok(EditPropertyRequest {
                property_id: property_id.to_string(),
                property,
            }),
            (missing_id, result) => {
                let mut errors = result.err().unwrap_or_default();
                if missing_id {
                    errors.insert(0, FieldError::new("property_id", "Property id is missing"));
                }
                Err(errors)
            }
        }
    }

    /// The user must type the address back before a property is removed
    pub fn build_remove_request(
        &self,
        property_id: &str,
        address: &str,
        confirmation: &str,
    ) -> Result<RemovePropertyRequest, RemovalError> {
        if property_id.trim().is_empty() {
            return Err(RemovalError::MissingPropertyId);
        }

        let confirmation = confirmation.trim();
        if confirmation.is_empty() {
            return Err(RemovalError::ConfirmationMissing);
        }
        if !confirmation.eq_ignore_ascii_case(address.trim()) {
            return Err(RemovalError::ConfirmationMismatch);
        }

        Ok(RemovePropertyRequest {
            property_id: property_id.trim().to_string(),
            confirm_address: confirmation.to_string(),
        })
    }
}

impl Default for PropertyFormService {
    fn default() -> Self {
        Self::new()
    }
}

/// Blank optional fields are fine; anything typed must be a number within range
fn check_optional_range(errors: &mut Vec<FieldError>, field: &str, label: &str, input: &str, min: f64, max: f64) {
    match try_parse_number(input) {
        Err(NumericError::Empty) => {}
        Err(_) => errors.push(FieldError::new(field, format!("{} must be a number", label))),
        Ok(value) if value < min => {
            errors.push(FieldError::new(field, format!("{} cannot be less than {}", label, min)))
        }
        Ok(value) if value > max => {
            errors.push(FieldError::new(field, format!("{} cannot be more than {}", label, max)))
        }
        Ok(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ExpenseInputs, IncomeInputs, PartnerInput};

    fn partner_row(name: &str, share: &str, manager: bool) -> PartnerInput {
        PartnerInput {
            name: name.to_string(),
            equity_share: share.to_string(),
            is_property_manager: manager,
        }
    }

    fn valid_draft() -> PropertyDraft {
        PropertyDraft {
            address: "12 Elm Street, Springfield".to_string(),
            purchase: PurchaseTerms {
                purchase_date: "2023-05-01".to_string(),
                purchase_price: "$250,000".to_string(),
                down_payment: "50000".to_string(),
                loan_amount: String::new(),
                interest_rate: "6".to_string(),
                loan_term_years: "30".to_string(),
                closing_costs: "4500".to_string(),
            },
            income: IncomeInputs {
                rental_income: "2200".to_string(),
                ..IncomeInputs::default()
            },
            expenses: ExpenseInputs {
                first_mortgage: "1199.10".to_string(),
                management_pct: "10".to_string(),
                ..ExpenseInputs::default()
            },
            partners: vec![partner_row("Alice", "60", true), partner_row("Bob", "40", false)],
        }
    }

    #[test]
    fn test_valid_draft() {
        let service = PropertyFormService::new();
        let validation = service.validate(&valid_draft());
        assert!(validation.is_valid, "{:?}", validation.errors);
    }

    #[test]
    fn test_missing_address_and_price() {
        let service = PropertyFormService::new();
        let mut draft = valid_draft();
        draft.address = "   ".to_string();
        draft.purchase.purchase_price = String::new();

        let validation = service.validate(&draft);
        assert!(!validation.is_valid);
        assert_eq!(validation.error_for("address"), Some("Property address is required"));
        assert_eq!(validation.error_for("purchase_price"), Some("Purchase price is required"));
    }

    #[test]
    fn test_numeric_ranges() {
        let service = PropertyFormService::new();
        let mut draft = valid_draft();
        draft.purchase.interest_rate = "120".to_string();
        draft.purchase.loan_term_years = "abc".to_string();
        draft.purchase.down_payment = "300000".to_string();

        let validation = service.validate(&draft);
        assert_eq!(validation.error_for("interest_rate"), Some("Interest rate cannot be more than 100"));
        assert_eq!(validation.error_for("loan_term_years"), Some("Loan term must be a number"));
        assert_eq!(
            validation.error_for("down_payment"),
            Some("Down payment cannot exceed the purchase price")
        );
    }

    #[test]
    fn test_bad_purchase_date() {
        let service = PropertyFormService::new();
        let mut draft = valid_draft();
        draft.purchase.purchase_date = "05/01/2023".to_string();

        let validation = service.validate(&draft);
        assert!(validation.error_for("purchase_date").is_some());
    }

    #[test]
    fn test_partner_errors_are_reported() {
        let service = PropertyFormService::new();
        let mut draft = valid_draft();
        draft.partners = vec![partner_row("Alice", "60", true), partner_row("Bob", "30", false)];

        let validation = service.validate(&draft);
        assert_eq!(
            validation.error_for("partners.equity_share"),
            Some("Equity shares must total 100% (currently 90.00%)")
        );
    }

    #[test]
    fn test_build_add_request() {
        let service = PropertyFormService::new();
        let request = service.build_add_request(&valid_draft()).unwrap();

        assert_eq!(request.address, "12 Elm Street, Springfield");
        assert_eq!(request.purchase_price, 250_000.0);
        assert_eq!(request.loan_amount, 200_000.0);
        assert_eq!(request.purchase_date.as_deref(), Some("2023-05-01"));
        assert_eq!(request.cash_flow.total_income, 2200.0);
        assert_eq!(request.cash_flow.total_expenses, 1419.10);
        assert_eq!(request.cash_flow.net_income, 780.90);
        assert_eq!(request.partners.len(), 2);
    }

    #[test]
    fn test_build_add_request_rejects_invalid() {
        let service = PropertyFormService::new();
        let mut draft = valid_draft();
        draft.partners.clear();

        let errors = service.build_add_request(&draft).unwrap_err();
        assert_eq!(errors[0].field, "partners");
    }

    #[test]
    fn test_build_edit_request() {
        let service = PropertyFormService::new();

        let request = service.build_edit_request("42", &valid_draft()).unwrap();
        assert_eq!(request.property_id, "42");

        let errors = service.build_edit_request(" ", &valid_draft()).unwrap_err();
        assert_eq!(errors[0].field, "property_id");
    }

    #[test]
    fn test_suggested_mortgage_payment_uses_implied_loan() {
        let service = PropertyFormService::new();
        assert_eq!(service.suggested_mortgage_payment(&valid_draft().purchase), Some(1199.10));
        assert_eq!(service.suggested_mortgage_payment(&PurchaseTerms::default()), None);
    }

    #[test]
    fn test_remove_request_requires_matching_address() {
        let service = PropertyFormService::new();
        let address = "12 Elm Street";

        assert_eq!(
            service.build_remove_request("9", address, ""),
            Err(RemovalError::ConfirmationMissing)
        );
        assert_eq!(
            service.build_remove_request("9", address, "13 Elm Street"),
            Err(RemovalError::ConfirmationMismatch)
        );
        assert_eq!(
            service.build_remove_request("", address, address),
            Err(RemovalError::MissingPropertyId)
        );

        let request = service.build_remove_request("9", address, " 12 elm street ").unwrap();
        assert_eq!(request.property_id, "9");
    }
}
