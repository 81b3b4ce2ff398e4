use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// A monthly spending cap. `category == None` is the overall budget for the
/// month; a `Some` category scopes the cap to that category. At most one
/// record exists per `(year, month, category)` key, last write wins.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Budget {
    pub(crate) id: Option<i64>,
    pub(crate) year: i32,
    /// 1..=12
    pub(crate) month: u32,
    pub(crate) category: Option<String>,
    pub(crate) amount: Decimal,
}

impl Budget {
    pub(crate) fn overall(year: i32, month: u32, amount: Decimal) -> Self {
        Self {
            id: None,
            year,
            month,
            category: None,
            amount,
        }
    }

    pub(crate) fn for_category(year: i32, month: u32, category: String, amount: Decimal) -> Self {
        Self {
            id: None,
            year,
            month,
            category: Some(category),
            amount,
        }
    }
}

/// Fraction of the budget consumed, clamped to `[0, 1]`.
/// A missing or zero budget reads as 0% used, never as an error.
pub(crate) fn percent_used(total: Decimal, budget: Decimal) -> f64 {
    if budget <= Decimal::ZERO {
        return 0.0;
    }
    (total / budget).to_f64().unwrap_or(0.0).clamp(0.0, 1.0)
}
