//! Comparison calculator
//!
//! Projects what a credit value ends up costing through bank financing versus
//! a consortium, using fixed market-average ratios. This is the page section
//! the assistant sends users to when they ask to simulate.

use serde::{Deserialize, Serialize};

pub const MIN_CREDIT: u64 = 100_000;
pub const MAX_CREDIT: u64 = 3_000_000;
pub const CREDIT_STEP: u64 = 50_000;
pub const DEFAULT_CREDIT: u64 = 500_000;

/// Financing roughly triples the price: total paid = 2.8x
const FINANCING_TENTHS: u64 = 28;
/// Consortium administration fee averages 25% over the whole term: total paid = 1.25x
const CONSORTIUM_HUNDREDTHS: u64 = 125;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Projection {
    pub credit_value: u64,
    pub financing_total: u64,
    pub consortium_total: u64,
    pub savings: u64,
}

/// Clamp a requested value to the slider range and snap it to the nearest step
pub fn clamp_credit(value: u64) -> u64 {
    let bounded = value.clamp(MIN_CREDIT, MAX_CREDIT);
    let steps = (bounded - MIN_CREDIT + CREDIT_STEP / 2) / CREDIT_STEP;
    (MIN_CREDIT + steps * CREDIT_STEP).min(MAX_CREDIT)
}

pub fn project(value: u64) -> Projection {
    let credit_value = clamp_credit(value);
    let financing_total = credit_value * FINANCING_TENTHS / 10;
    let consortium_total = credit_value * CONSORTIUM_HUNDREDTHS / 100;

    Projection {
        credit_value,
        financing_total,
        consortium_total,
        savings: financing_total.saturating_sub(consortium_total),
    }
}

/// Where `value` sits on the slider, in percent
pub fn slider_percent(value: u64) -> f64 {
    let credit = clamp_credit(value);
    (credit - MIN_CREDIT) as f64 / (MAX_CREDIT - MIN_CREDIT) as f64 * 100.0
}

/// Format whole reais the way the page does: `R$ 1.500.000`
pub fn format_brl(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("R$ {}", grouped)
}
