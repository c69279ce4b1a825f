//! Ledger domain types.
//!
//! Receivables and payables are mirrored tables with the same shape; a
//! [`LedgerEntry`] carries either one, tagged by [`EntryKind`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::status::LedgerStatus;
use crate::period::{CompetencePeriod, PeriodError, resolve};

/// Which side of the ledger a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Accounts receivable; the counterpart is a client.
    Receivable,
    /// Accounts payable; the counterpart is a supplier.
    Payable,
}

impl EntryKind {
    /// Both kinds, receivables first.
    pub const ALL: [Self; 2] = [Self::Receivable, Self::Payable];

    /// What the counterpart is called on this side of the ledger.
    #[must_use]
    pub const fn counterpart_role(&self) -> &'static str {
        match self {
            Self::Receivable => "client",
            Self::Payable => "supplier",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Receivable => write!(f, "receivable"),
            Self::Payable => write!(f, "payable"),
        }
    }
}

impl std::str::FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "receivable" | "receber" => Ok(Self::Receivable),
            "payable" | "pagar" => Ok(Self::Payable),
            _ => Err(format!("Unknown entry kind: {s}")),
        }
    }
}

/// Date columns a filter can range over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    /// `emissao`.
    Issue,
    /// `vencimento`.
    Due,
    /// `vencimento_original`.
    OriginalDue,
    /// `data_baixa`.
    Settlement,
    /// `data_liquidacao`.
    Liquidation,
}

/// One receivable or payable line item as read from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Store-assigned identifier.
    pub id: i64,
    /// Receivable or payable.
    pub kind: EntryKind,
    /// Client or supplier name.
    pub counterpart: String,
    /// Principal amount.
    pub principal_value: Decimal,
    /// Parsed lifecycle status.
    pub status: LedgerStatus,
    /// Status label exactly as stored.
    pub status_label: String,
    /// Competence label exactly as stored.
    pub competence: Option<String>,
    /// Issue date.
    pub issue_date: Option<NaiveDate>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Due date before any renegotiation.
    pub original_due_date: Option<NaiveDate>,
    /// Date the item was written off.
    pub settlement_date: Option<NaiveDate>,
    /// Date the funds cleared.
    pub liquidation_date: Option<NaiveDate>,
    /// Accounting account.
    pub accounting_account: Option<String>,
    /// Bank the payment went through.
    pub payment_bank: Option<String>,
    /// Account the payment went through.
    pub payment_account: Option<String>,
    /// Payment method.
    pub payment_method: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl LedgerEntry {
    /// Resolves the competence label.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::Unparseable`] when the label is absent or not
    /// in a recognized form.
    pub fn competence_period(&self) -> Result<CompetencePeriod, PeriodError> {
        match self.competence.as_deref() {
            Some(raw) => resolve(raw),
            None => Err(PeriodError::Unparseable(String::new())),
        }
    }

    /// Returns the value of a date column.
    #[must_use]
    pub const fn date(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::Issue => self.issue_date,
            DateField::Due => self.due_date,
            DateField::OriginalDue => self.original_due_date,
            DateField::Settlement => self.settlement_date,
            DateField::Liquidation => self.liquidation_date,
        }
    }
}

/// Input for inserting a line item.
///
/// Dates and competence are kept as the raw text the import produced; the
/// store parses them on read.
#[derive(Debug, Clone, Default)]
pub struct NewLedgerEntry {
    /// Client or supplier name.
    pub counterpart: String,
    /// Principal amount.
    pub principal_value: Decimal,
    /// Status label as written by the import.
    pub status_label: String,
    /// Competence label.
    pub competence: Option<String>,
    /// Issue date text.
    pub issue_date: Option<String>,
    /// Due date text.
    pub due_date: Option<String>,
    /// Original due date text.
    pub original_due_date: Option<String>,
    /// Settlement date text.
    pub settlement_date: Option<String>,
    /// Liquidation date text.
    pub liquidation_date: Option<String>,
    /// Accounting account.
    pub accounting_account: Option<String>,
    /// Payment bank.
    pub payment_bank: Option<String>,
    /// Payment account.
    pub payment_account: Option<String>,
    /// Payment method.
    pub payment_method: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

impl NewLedgerEntry {
    /// Creates an input with the required fields; everything else absent.
    #[must_use]
    pub fn new(
        counterpart: impl Into<String>,
        principal_value: Decimal,
        status_label: impl Into<String>,
    ) -> Self {
        Self {
            counterpart: counterpart.into(),
            principal_value,
            status_label: status_label.into(),
            ..Self::default()
        }
    }

    /// Sets the competence label.
    #[must_use]
    pub fn with_competence(mut self, competence: impl Into<String>) -> Self {
        self.competence = Some(competence.into());
        self
    }

    /// Sets the due date text.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the settlement date text.
    #[must_use]
    pub fn with_settlement_date(mut self, settlement_date: impl Into<String>) -> Self {
        self.settlement_date = Some(settlement_date.into());
        self
    }
}
