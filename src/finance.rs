//! Equated monthly installment (EMI) arithmetic for the loan calculator.
//!
//! Standard annuity formula: for principal `P`, monthly rate `r` and `n` installments,
//! `M = P·r·(1+r)^n / ((1+r)^n − 1)`, degenerating to `P / n` at a zero rate.

use crate::config::GalleryConfig;
use crate::foundation::error::{VahanError, VahanResult};

/// Loan parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LoanTerms {
    pub principal: f64,
    /// Nominal annual interest rate in percent (9.5 = 9.5%).
    pub annual_rate_pct: f64,
    pub tenure_months: u32,
}

/// One row of an amortization schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Installment {
    pub month: u32,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_pct: f64, tenure_months: u32) -> VahanResult<Self> {
        let terms = Self {
            principal,
            annual_rate_pct,
            tenure_months,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Default financing offer for a bike price.
    pub fn for_price(price: u64, config: &GalleryConfig) -> Self {
        Self {
            principal: price as f64 * config.financing_ratio,
            annual_rate_pct: config.default_annual_rate_pct,
            tenure_months: config.default_tenure_months,
        }
    }

    /// Check the terms can produce a payment.
    pub fn validate(&self) -> VahanResult<()> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(VahanError::validation("principal must be finite and >= 0"));
        }
        if !self.annual_rate_pct.is_finite() || self.annual_rate_pct < 0.0 {
            return Err(VahanError::validation(
                "annual_rate_pct must be finite and >= 0",
            ));
        }
        if self.tenure_months == 0 {
            return Err(VahanError::validation("tenure_months must be >= 1"));
        }
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_pct / 12.0 / 100.0
    }

    pub fn monthly_payment(&self) -> f64 {
        let n = f64::from(self.tenure_months.max(1));
        let r = self.monthly_rate();
        if r == 0.0 {
            return self.principal / n;
        }
        let growth = (1.0 + r).powf(n);
        self.principal * r * growth / (growth - 1.0)
    }

    /// Monthly payment rounded to whole currency units, as displayed.
    pub fn monthly_payment_rounded(&self) -> u64 {
        self.monthly_payment().round().max(0.0) as u64
    }

    /// Sum of all displayed installments.
    pub fn total_payable(&self) -> f64 {
        self.monthly_payment_rounded() as f64 * f64::from(self.tenure_months)
    }

    pub fn total_interest(&self) -> f64 {
        self.total_payable() - self.principal
    }

    /// Month-by-month split of the exact payment into interest and principal.
    pub fn schedule(&self) -> Vec<Installment> {
        let payment = self.monthly_payment();
        let r = self.monthly_rate();
        let mut balance = self.principal;
        (1..=self.tenure_months)
            .map(|month| {
                let interest = balance * r;
                let principal = payment - interest;
                balance = (balance - principal).max(0.0);
                Installment {
                    month,
                    interest,
                    principal,
                    balance,
                }
            })
            .collect()
    }
}

/// Present value of `n` payments of `payment` at `monthly_rate`; the inverse of
/// [`LoanTerms::monthly_payment`].
pub fn present_value(payment: f64, monthly_rate: f64, n: u32) -> f64 {
    let n = f64::from(n);
    if monthly_rate == 0.0 {
        return payment * n;
    }
    let growth = (1.0 + monthly_rate).powf(n);
    payment * (growth - 1.0) / (monthly_rate * growth)
}

#[cfg(test)]
#[path = "../tests/unit/finance/finance.rs"]
mod tests;
