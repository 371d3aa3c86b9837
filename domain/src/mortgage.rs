//! Amortised mortgage payment, used to pre-fill the mortgage expense field.

use crate::numeric::round_to_cents;

/// Monthly payment for a fully amortising loan
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, term_years: f64) -> f64 {
    let months = (term_years * 12.0).round();
    if principal <= 0.0 || months <= 0.0 {
        return 0.0;
    }

    let monthly_rate = annual_rate_pct / 100.0 / 12.0;
    if monthly_rate <= 0.0 {
        return round_to_cents(principal / months);
    }

    let payment = principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-months));
    round_to_cents(payment)
}

/// Loan amount implied by price and down payment when the loan field is blank
pub fn implied_loan_amount(purchase_price: f64, down_payment: f64) -> f64 {
    round_to_cents((purchase_price - down_payment).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_year_payment() {
        assert_eq!(monthly_payment(200_000.0, 6.0, 30.0), 1199.10);
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        assert_eq!(monthly_payment(12_000.0, 0.0, 1.0), 1000.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(monthly_payment(0.0, 5.0, 30.0), 0.0);
        assert_eq!(monthly_payment(100_000.0, 5.0, 0.0), 0.0);
    }

    #[test]
    fn test_implied_loan_amount() {
        assert_eq!(implied_loan_amount(250_000.0, 50_000.0), 200_000.0);
        assert_eq!(implied_loan_amount(50_000.0, 60_000.0), 0.0);
    }
}
