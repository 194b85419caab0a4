//! Monthly spending aggregation.
//!
//! Groups expense transactions by (month, category), computes each bucket's
//! total and mean, each category's share of its month's spending, and a
//! three-tier recommendation derived from that share. The result is always
//! recomputed from the full transaction history; the caller replaces the
//! previous analysis wholesale.

use crate::model::{Amount, Category, Kind, Transaction};
use crate::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header row of the Análise de Gastos tab, in fixed column order.
pub const ANALYSIS_HEADER: [&str; 6] = [
    "Mês/Ano",
    "Categoria",
    "Total Gasto",
    "Média Mensal",
    "Percentual do Total",
    "Recomendação",
];

/// Advice tier derived from a category's share of its month's spending.
///
/// The boundaries are strict on the upper side: 50% itself is still
/// `Considerable` and 30% itself is still `Healthy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Alto gasto! Considere cortar despesas supérfluas.")]
    High,
    #[serde(rename = "Gasto considerável. Analise se pode economizar.")]
    Considerable,
    #[serde(rename = "Gasto saudável. Continue monitorando.")]
    Healthy,
}

serde_plain::derive_display_from_serialize!(Recommendation);

impl Recommendation {
    pub fn for_percent(percent: Decimal) -> Self {
        if percent > Decimal::from(50) {
            Recommendation::High
        } else if percent > Decimal::from(30) {
            Recommendation::Considerable
        } else {
            Recommendation::Healthy
        }
    }
}

/// One output row of the analysis: a (month, category) spending bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRow {
    /// Month bucket in `MM/YYYY` form.
    pub(crate) month: String,
    pub(crate) category: Category,
    /// Exact sum of the bucket's amounts.
    pub(crate) total: Amount,
    /// Mean of the bucket's amounts, rounded half-up to centavos.
    pub(crate) mean: Amount,
    /// This category's share of the month's total spending, in percent,
    /// rounded half-up to two decimals.
    pub(crate) percent: Decimal,
    pub(crate) recommendation: Recommendation,
}

impl AnalysisRow {
    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub fn mean(&self) -> Amount {
        self.mean
    }

    pub fn percent(&self) -> Decimal {
        self.percent
    }

    pub fn recommendation(&self) -> Recommendation {
        self.recommendation
    }

    /// The row written to the Análise de Gastos tab, in `ANALYSIS_HEADER`
    /// order. The percent column uses a dot decimal separator, e.g. `66.67%`.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.month.clone(),
            self.category.to_string(),
            self.total.to_string(),
            self.mean.to_string(),
            format!("{}%", self.percent),
            self.recommendation.to_string(),
        ]
    }
}

/// Aggregates the expense transactions in `transactions` into one row per
/// (month, category) bucket, ordered by month then category.
///
/// Fails with [`Error::EmptyInput`] when there are no expenses at all; a
/// month whose total is zero yields zero percentages rather than a division
/// by zero.
pub fn aggregate(transactions: &[Transaction]) -> Result<Vec<AnalysisRow>> {
    let mut groups: BTreeMap<((i32, u32), Category), Vec<Decimal>> = BTreeMap::new();
    for transaction in transactions.iter().filter(|t| t.kind() == Kind::Expense) {
        groups
            .entry((transaction.month_key(), transaction.category()))
            .or_default()
            .push(transaction.amount().value());
    }
    if groups.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut month_totals: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    let mut buckets = Vec::with_capacity(groups.len());
    for ((month, category), amounts) in groups {
        let total: Decimal = amounts.iter().sum();
        let mean = round2(total / Decimal::from(amounts.len()));
        *month_totals.entry(month).or_default() += total;
        buckets.push((month, category, total, mean));
    }

    let rows = buckets
        .into_iter()
        .map(|(month, category, total, mean)| {
            let month_total = month_totals[&month];
            let percent = if month_total.is_zero() {
                round2(Decimal::ZERO)
            } else {
                round2(total / month_total * Decimal::from(100))
            };
            AnalysisRow {
                month: month_label(month),
                category,
                total: Amount::new(total),
                mean: Amount::new(mean),
                percent,
                recommendation: Recommendation::for_percent(percent),
            }
        })
        .collect();
    Ok(rows)
}

/// Rounds half-up to two fractional digits, keeping the scale at exactly two
/// so the value always renders as `NN.NN`.
fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Formats a `(year, month)` bucket as `MM/YYYY`.
fn month_label((year, month): (i32, u32)) -> String {
    format!("{month:02}/{year}")
}
