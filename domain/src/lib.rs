//! # Property Ledger Domain
//!
//! Calculation and validation rules for the property ledger pages.
//!
//! Everything in here is UI-agnostic: the frontend collects raw form
//! strings, hands them to these services, and renders whatever comes back.
//! Nothing in this crate touches the DOM or the network.
//!
//! ## Module Organization
//!
//! - **numeric**: the single parse-then-default-to-zero coercion helper and currency formatting
//! - **equity**: partner equity validation and reimbursement share splitting
//! - **cashflow**: monthly income/expense aggregation
//! - **mao**: Maximum Allowable Offer calculator
//! - **mortgage**: amortised monthly payment
//! - **property_form**: add/edit/remove property validation and request building
//! - **transaction_form**: add transaction validation, reimbursement rules, request building
//! - **bulk_import**: CSV pre-flight checks before a bulk upload
//! - **autocomplete**: address suggestion list state
//! - **password**: password strength scoring
//!
//! ## Business Rules
//!
//! - Empty or non-numeric inputs count as zero in totals
//! - Partner equity must total 100% (within the configured tolerance)
//! - Exactly one partner manages the property
//! - A sole 100% owner never needs reimbursement tracking

pub mod numeric;
pub mod error;
pub mod equity;
pub mod cashflow;
pub mod mao;
pub mod mortgage;
pub mod property_form;
pub mod transaction_form;
pub mod bulk_import;
pub mod autocomplete;
pub mod password;

pub use numeric::*;
pub use error::*;
pub use equity::*;
pub use cashflow::*;
pub use mao::*;
pub use mortgage::*;
pub use property_form::*;
pub use transaction_form::*;
pub use bulk_import::*;
pub use autocomplete::*;
pub use password::*;
