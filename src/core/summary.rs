//! Roll-up totals over matching transactions

use super::transaction::Transaction;
use serde::{Deserialize, Serialize};

/// Totals for every transaction matching a filter
///
/// All fields are zero when nothing matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Sum of quantities
    pub total_units_sold: u64,

    /// Sum of gross amounts
    pub total_amount: f64,

    /// Sum of `gross - final` (not of discount percentages)
    pub total_discount: f64,

    /// Number of matching transactions
    pub total_transactions: u64,
}

impl SummaryStats {
    /// Add one transaction to the running totals
    pub fn accumulate(mut self, tx: &Transaction) -> Self {
        self.total_units_sold += u64::from(tx.sales.quantity);
        self.total_amount += tx.sales.total;
        self.total_discount += tx.sales.discount_amount();
        self.total_transactions += 1;
        self
    }

    /// Single-pass fold over a sequence of transactions
    pub fn from_transactions<'a>(rows: impl IntoIterator<Item = &'a Transaction>) -> Self {
        rows.into_iter().fold(Self::default(), Self::accumulate)
    }
}
