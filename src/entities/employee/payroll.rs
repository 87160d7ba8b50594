//! Payroll derivation

use serde::{Deserialize, Serialize};

/// Paid per overtime hour, in rupees
pub const OVERTIME_HOURLY_RATE: f64 = 500.0;

/// Combined EPF/ETF deduction as a share of basic salary
pub const EPF_ETF_RATE: f64 = 0.11;

/// Derived salary figures. Always recomputed, never taken from input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Payroll {
    #[serde(rename = "OverTimePayment")]
    pub overtime_payment: f64,
    #[serde(rename = "EPF_ETF")]
    pub epf_etf: f64,
    #[serde(rename = "NetSalary")]
    pub net_salary: f64,
}

impl Payroll {
    /// `net = basic + overtime_hours × 500 + bonus − 11% of basic`, each
    /// figure rounded to cents
    pub fn compute(basic_salary: f64, overtime_hours: f64, bonus: f64) -> Self {
        let overtime_payment = round_cents(overtime_hours * OVERTIME_HOURLY_RATE);
        let epf_etf = round_cents(basic_salary * EPF_ETF_RATE);
        let net_salary = round_cents(basic_salary + overtime_payment + bonus - epf_etf);
        Self {
            overtime_payment,
            epf_etf,
            net_salary,
        }
    }
}

pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_payroll() {
        let payroll = Payroll::compute(50000.0, 10.0, 3000.0);
        assert_eq!(payroll.epf_etf, 5500.0);
        assert_eq!(payroll.overtime_payment, 5000.0);
        assert_eq!(payroll.net_salary, 52500.0);
    }

    #[test]
    fn test_zero_everything() {
        assert_eq!(Payroll::compute(0.0, 0.0, 0.0), Payroll::default());
    }

    #[test]
    fn test_rounds_to_cents() {
        let payroll = Payroll::compute(12345.67, 1.5, 0.0);
        assert_eq!(payroll.epf_etf, 1358.02);
        assert_eq!(payroll.overtime_payment, 750.0);
        assert_eq!(payroll.net_salary, 11737.65);
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(Payroll::compute(1000.0, 0.0, 0.0)).unwrap();
        assert_eq!(value["EPF_ETF"], 110.0);
        assert!(value.get("OverTimePayment").is_some());
        assert!(value.get("NetSalary").is_some());
    }
}
