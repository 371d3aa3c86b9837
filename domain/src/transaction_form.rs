//! Add transaction form handling and reimbursement rules.

use chrono::NaiveDate;
use log::{info, warn};
use shared::{
    CalculatorConfig, CreateTransactionRequest, FieldError, Partner, Reimbursement, ReimbursementStatus,
    TransactionDraft,
};

use crate::equity::{EquityService, ReimbursementPlan};
use crate::error::NumericError;
use crate::numeric::{has_sub_cent_precision, parse_non_negative, try_parse_number};
use crate::property_form::DATE_FORMAT;

/// Validation result for the transaction form
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFormValidation {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
    pub cleaned_amount: Option<f64>,
}

impl TransactionFormValidation {
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct TransactionFormService {
    config: CalculatorConfig,
    equity: EquityService,
}

impl TransactionFormService {
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self {
            equity: EquityService::with_config(config.clone()),
            config,
        }
    }

    /// The reimbursement section is hidden for properties with a sole owner
    pub fn reimbursement_visible(&self, partners: &[Partner]) -> bool {
        !self.equity.is_sole_owner(partners)
    }

    /// Live share breakdown shown beneath the amount field
    pub fn preview_shares(&self, draft: &TransactionDraft, partners: &[Partner]) -> ReimbursementPlan {
        self.equity.plan_reimbursement(
            partners,
            parse_non_negative(&draft.amount),
            draft.transaction_type,
            &draft.collector_payer,
        )
    }

    pub fn validate(&self, draft: &TransactionDraft, partners: &[Partner], today: NaiveDate) -> TransactionFormValidation {
        let mut errors = Vec::new();

        if draft.property_id.trim().is_empty() {
            errors.push(FieldError::new("property_id", "Please select a property"));
        }
        if draft.category.trim().is_empty() {
            errors.push(FieldError::new("category", "Please select a category"));
        }
        if draft.collector_payer.trim().is_empty() {
            let label = draft.transaction_type.party_label();
            errors.push(FieldError::new("collector_payer", format!("{} is required", label)));
        }

        let description_len = draft.description.trim().chars().count();
        if description_len > self.config.max_description_length {
            errors.push(FieldError::new(
                "description",
                format!(
                    "Description is too long ({} characters). Maximum is {}.",
                    description_len, self.config.max_description_length
                ),
            ));
        }

        let cleaned_amount = match try_parse_number(&draft.amount) {
            Ok(amount) if amount <= 0.0 => {
                errors.push(FieldError::new("amount", "Amount must be greater than 0"));
                None
            }
            Ok(amount) if has_sub_cent_precision(amount) => {
                errors.push(FieldError::new("amount", "Use at most 2 decimal places"));
                None
            }
            Ok(amount) => Some(amount),
            Err(NumericError::Empty) => {
                errors.push(FieldError::new("amount", "Please enter an amount"));
                None
            }
            Err(_) => {
                errors.push(FieldError::new("amount", "Please enter a valid amount (like 125 or 125.50)"));
                None
            }
        };

        let date = match parse_date(&draft.date) {
            Some(date) if date > today => {
                errors.push(FieldError::new("date", "Transaction date cannot be in the future"));
                None
            }
            Some(date) => Some(date),
            None => {
                errors.push(FieldError::new("date", "Please enter the date as YYYY-MM-DD"));
                None
            }
        };

        if self.reimbursement_visible(partners) && draft.reimbursement.status == ReimbursementStatus::Completed {
            match parse_date(&draft.reimbursement.date_shared) {
                None => errors.push(FieldError::new(
                    "reimbursement.date_shared",
                    "Enter the date the reimbursement was shared",
                )),
                Some(shared_on) if date.is_some_and(|d| shared_on < d) => errors.push(FieldError::new(
                    "reimbursement.date_shared",
                    "Reimbursement cannot be shared before the transaction date",
                )),
                Some(_) => {}
            }
        }

        if !errors.is_empty() {
            warn!("Transaction form has {} validation error(s)", errors.len());
        }

        TransactionFormValidation {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
        }
    }

    /// Work out the reimbursement record to submit. A sole owner's
    /// transactions are marked completed on the transaction date.
    pub fn resolve_reimbursement(&self, draft: &TransactionDraft, partners: &[Partner], amount: f64) -> Reimbursement {
        let plan = self
            .equity
            .plan_reimbursement(partners, amount, draft.transaction_type, &draft.collector_payer);

        if !plan.is_required() {
            return Reimbursement {
                status: ReimbursementStatus::Completed,
                date_shared: Some(draft.date.trim().to_string()),
                share_description: plan.share_description(),
            };
        }

        let date_shared = draft.reimbursement.date_shared.trim();
        let typed_description = draft.reimbursement.share_description.trim();
        Reimbursement {
            status: draft.reimbursement.status,
            date_shared: (!date_shared.is_empty()).then(|| date_shared.to_string()),
            share_description: if typed_description.is_empty() {
                plan.share_description()
            } else {
                typed_description.to_string()
            },
        }
    }

    pub fn build_request(
        &self,
        draft: &TransactionDraft,
        partners: &[Partner],
        today: NaiveDate,
    ) -> Result<CreateTransactionRequest, Vec<FieldError>> {
        let validation = self.validate(draft, partners, today);
        let amount = match (validation.is_valid, validation.cleaned_amount) {
            (true, Some(amount)) => amount,
            _ => return Err(validation.errors),
        };

        let notes = draft.notes.trim();
        let request = CreateTransactionRequest {
            property_id: draft.property_id.trim().to_string(),
            transaction_type: draft.transaction_type,
            category: draft.category.trim().to_string(),
            description: draft.description.trim().to_string(),
            amount,
            date: draft.date.trim().to_string(),
            collector_payer: draft.collector_payer.trim().to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            reimbursement: self.resolve_reimbursement(draft, partners, amount),
        };

        info!(
            "Built {} transaction of {:.2} for property {} ({})",
            request.transaction_type,
            request.amount,
            request.property_id,
            request.reimbursement.status.as_str()
        );
        Ok(request)
    }
}

impl Default for TransactionFormService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ReimbursementDraft, TransactionType};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn partner(name: &str, share: f64, manager: bool) -> Partner {
        Partner {
            name: name.to_string(),
            equity_share: share,
            is_property_manager: manager,
        }
    }

    fn fifty_fifty() -> Vec<Partner> {
        vec![partner("Alice", 50.0, true), partner("Bob", 50.0, false)]
    }

    fn draft() -> TransactionDraft {
        TransactionDraft {
            property_id: "3".to_string(),
            transaction_type: TransactionType::Income,
            category: "Rent".to_string(),
            description: "March rent".to_string(),
            amount: "1000".to_string(),
            date: "2024-03-01".to_string(),
            collector_payer: "Alice".to_string(),
            notes: String::new(),
            reimbursement: ReimbursementDraft::default(),
        }
    }

    #[test]
    fn test_valid_draft() {
        let service = TransactionFormService::new();
        let validation = service.validate(&draft(), &fifty_fifty(), today());

        assert!(validation.is_valid, "{:?}", validation.errors);
        assert_eq!(validation.cleaned_amount, Some(1000.0));
    }

    #[test]
    fn test_required_fields() {
        let service = TransactionFormService::new();
        let empty = TransactionDraft {
            transaction_type: TransactionType::Expense,
            ..TransactionDraft::default()
        };

        let validation = service.validate(&empty, &fifty_fifty(), today());
        assert_eq!(validation.error_for("property_id"), Some("Please select a property"));
        assert_eq!(validation.error_for("category"), Some("Please select a category"));
        assert_eq!(validation.error_for("collector_payer"), Some("Paid by is required"));
        assert_eq!(validation.error_for("amount"), Some("Please enter an amount"));
        assert_eq!(validation.error_for("date"), Some("Please enter the date as YYYY-MM-DD"));
    }

    #[test]
    fn test_amount_rules() {
        let service = TransactionFormService::new();

        for (input, expected) in [
            ("-5", "Amount must be greater than 0"),
            ("12.345", "Use at most 2 decimal places"),
            ("twelve", "Please enter a valid amount (like 125 or 125.50)"),
        ] {
            let mut d = draft();
            d.amount = input.to_string();
            let validation = service.validate(&d, &fifty_fifty(), today());
            assert_eq!(validation.error_for("amount"), Some(expected), "input {}", input);
        }
    }

    #[test]
    fn test_future_date_rejected() {
        let service = TransactionFormService::new();
        let mut d = draft();
        d.date = "2024-03-16".to_string();

        let validation = service.validate(&d, &fifty_fifty(), today());
        assert_eq!(validation.error_for("date"), Some("Transaction date cannot be in the future"));
    }

    #[test]
    fn test_completed_reimbursement_needs_valid_share_date() {
        let service = TransactionFormService::new();
        let mut d = draft();
        d.reimbursement.status = ReimbursementStatus::Completed;

        let validation = service.validate(&d, &fifty_fifty(), today());
        assert!(validation.error_for("reimbursement.date_shared").is_some());

        d.reimbursement.date_shared = "2024-02-28".to_string();
        let validation = service.validate(&d, &fifty_fifty(), today());
        assert_eq!(
            validation.error_for("reimbursement.date_shared"),
            Some("Reimbursement cannot be shared before the transaction date")
        );

        d.reimbursement.date_shared = "2024-03-05".to_string();
        assert!(service.validate(&d, &fifty_fifty(), today()).is_valid);
    }

    #[test]
    fn test_sole_owner_forces_completed() {
        let service = TransactionFormService::new();
        let owner = vec![partner("Alice", 100.0, true)];
        let mut d = draft();
        d.reimbursement.status = ReimbursementStatus::Pending;

        assert!(!service.reimbursement_visible(&owner));

        let request = service.build_request(&d, &owner, today()).unwrap();
        assert_eq!(request.reimbursement.status, ReimbursementStatus::Completed);
        assert_eq!(request.reimbursement.date_shared.as_deref(), Some("2024-03-01"));
    }

    #[test]
    fn test_shared_request_generates_description() {
        let service = TransactionFormService::new();
        let request = service.build_request(&draft(), &fifty_fifty(), today()).unwrap();

        assert_eq!(request.amount, 1000.0);
        assert_eq!(request.reimbursement.status, ReimbursementStatus::Pending);
        assert_eq!(request.reimbursement.date_shared, None);
        assert_eq!(request.reimbursement.share_description, "Bob is owed $500.00");
        assert_eq!(request.notes, None);
    }

    #[test]
    fn test_typed_share_description_is_kept() {
        let service = TransactionFormService::new();
        let mut d = draft();
        d.reimbursement.share_description = "Paid Bob by bank transfer".to_string();

        let request = service.build_request(&d, &fifty_fifty(), today()).unwrap();
        assert_eq!(request.reimbursement.share_description, "Paid Bob by bank transfer");
    }

    #[test]
    fn test_preview_shares() {
        let service = TransactionFormService::new();
        let mut d = draft();
        d.transaction_type = TransactionType::Expense;
        d.amount = "$300".to_string();

        let plan = service.preview_shares(&d, &fifty_fifty());
        assert_eq!(plan.share_description(), "Bob owes $150.00");
    }

    #[test]
    fn test_build_request_rejects_invalid() {
        let service = TransactionFormService::new();
        let mut d = draft();
        d.amount = String::new();

        let errors = service.build_request(&d, &fifty_fifty(), today()).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "amount"));
    }
}
