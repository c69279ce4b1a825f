//! Revenue, expense and margin summary.

use finledger_shared::types::Money;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::ledger::{ExclusionSet, LedgerEntry, LedgerFilter};
use crate::period::CompetencePeriod;

/// Headline figures for a period.
///
/// Field names on the wire follow the dashboard's JSON contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSummary {
    /// Settled receivables.
    #[serde(rename = "receita_total")]
    pub revenue: Decimal,
    /// Settled payables.
    #[serde(rename = "despesa_total")]
    pub expenses: Decimal,
    /// `revenue - expenses`.
    #[serde(rename = "margem_total")]
    pub margin: Decimal,
    /// Margin as a percentage of revenue, 2 dp; zero when there is no revenue.
    #[serde(rename = "margem_percentual_geral")]
    pub margin_percentage: Decimal,
}

impl FinancialSummary {
    /// Builds a summary from already-computed totals.
    #[must_use]
    pub fn from_totals(revenue: Decimal, expenses: Decimal) -> Self {
        let margin = revenue - expenses;
        let mut margin_percentage = if revenue.is_zero() {
            Decimal::ZERO
        } else {
            (margin / revenue * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        };
        margin_percentage.rescale(2);
        Self {
            revenue,
            expenses,
            margin,
            margin_percentage,
        }
    }

    /// Sums the receivables and payables that satisfy `request`.
    ///
    /// The filters are re-applied here, so callers may pass broader slices
    /// than the request selects.
    #[must_use]
    pub fn compute(
        receivables: &[LedgerEntry],
        payables: &[LedgerEntry],
        request: &SummaryRequest,
    ) -> Self {
        let revenue_filter = request.receivable_filter();
        let expense_filter = request.payable_filter();
        let revenue = receivables
            .iter()
            .filter(|e| revenue_filter.matches(e))
            .map(|e| e.principal_value)
            .sum();
        let expenses = payables
            .iter()
            .filter(|e| expense_filter.matches(e))
            .map(|e| e.principal_value)
            .sum();
        Self::from_totals(revenue, expenses)
    }
}

impl std::fmt::Display for FinancialSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Receita total:  {}", Money::new(self.revenue))?;
        writeln!(f, "Despesa total:  {}", Money::new(self.expenses))?;
        writeln!(f, "Margem total:   {}", Money::new(self.margin))?;
        write!(f, "Margem (%):     {}%", self.margin_percentage)
    }
}

/// Scope of a summary: which period, and which counterparts to leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryRequest {
    /// Competence period; `None` covers every period.
    pub period: Option<CompetencePeriod>,
    /// Suppliers left out of the expense side.
    pub excluded_suppliers: ExclusionSet,
    /// Clients left out of the revenue side.
    pub excluded_clients: ExclusionSet,
}

impl SummaryRequest {
    /// Request covering every period with no exclusions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one competence period.
    #[must_use]
    pub fn in_period(mut self, period: CompetencePeriod) -> Self {
        self.period = Some(period);
        self
    }

    /// Filter selecting settled receivables in scope.
    #[must_use]
    pub fn receivable_filter(&self) -> LedgerFilter {
        self.scoped(LedgerFilter::all().settled().excluding_all(&self.excluded_clients))
    }

    /// Filter selecting settled payables in scope.
    #[must_use]
    pub fn payable_filter(&self) -> LedgerFilter {
        self.scoped(LedgerFilter::all().settled().excluding_all(&self.excluded_suppliers))
    }

    fn scoped(&self, filter: LedgerFilter) -> LedgerFilter {
        match self.period {
            Some(period) => filter.in_period(period),
            None => filter,
        }
    }
}
