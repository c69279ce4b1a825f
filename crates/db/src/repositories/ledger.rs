//! Ledger repository for receivable and payable line items.
//!
//! Both tables share one shape; the counterpart and payment columns are
//! named after the side of the ledger (`cliente` / `fornecedor`,
//! `*_recebimento` / `*_pagamento`).

use chrono::NaiveDate;
use finledger_core::ledger::{
    EntryKind, ExclusionSet, LedgerEntry, LedgerFilter, LedgerQuery, LedgerStatus,
    NewLedgerEntry,
};
use finledger_core::period::parse_date;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveValue::NotSet, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use tracing::{debug, info, warn};

use crate::entities::{contas_pagar, contas_receber};

/// Error types for ledger store operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerStoreError {
    /// Connection or schema failure. Never reported as an empty result.
    #[error("Ledger store unavailable: {0}")]
    Unavailable(#[from] DbErr),

    /// Input rejected before reaching the store.
    #[error("Invalid ledger input: {0}")]
    InvalidInput(String),
}

/// Result of clearing one ledger table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    /// Table that was cleared.
    pub kind: EntryKind,
    /// Rows removed.
    pub rows_deleted: u64,
}

/// Table backing a ledger kind.
#[must_use]
pub const fn table_name(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Receivable => "contas_receber",
        EntryKind::Payable => "contas_pagar",
    }
}

const fn counterpart_column(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Receivable => "cliente",
        EntryKind::Payable => "fornecedor",
    }
}

/// Ledger repository for query, insert and truncate operations.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
}

impl LedgerRepository {
    /// Creates a new ledger repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the line items of `kind` that satisfy `filter`, in id order.
    ///
    /// The exclusion set is pushed into SQL as a prefilter; every predicate
    /// is then applied to the decoded rows, since status, competence and
    /// dates are only meaningful after parsing. Rows left out only because
    /// their competence could not be resolved are counted in
    /// [`LedgerQuery::unparsed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn query(
        &self,
        kind: EntryKind,
        filter: &LedgerFilter,
    ) -> Result<LedgerQuery, LedgerStoreError> {
        let exclusion = exclusion_condition(counterpart_column(kind), &filter.exclude);

        let rows: Vec<StoredRow> = match kind {
            EntryKind::Receivable => {
                let mut select = contas_receber::Entity::find();
                if let Some(condition) = exclusion {
                    select = select.filter(condition);
                }
                select
                    .order_by_asc(contas_receber::Column::Id)
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(StoredRow::from)
                    .collect()
            }
            EntryKind::Payable => {
                let mut select = contas_pagar::Entity::find();
                if let Some(condition) = exclusion {
                    select = select.filter(condition);
                }
                select
                    .order_by_asc(contas_pagar::Column::Id)
                    .all(&self.db)
                    .await?
                    .into_iter()
                    .map(StoredRow::from)
                    .collect()
            }
        };

        let fetched = rows.len();
        let query = filter.apply(rows.into_iter().map(|row| row.decode(kind)));

        debug!(
            table = table_name(kind),
            fetched,
            matched = query.entries.len(),
            unparsed = query.unparsed,
            "Ledger query"
        );

        Ok(query)
    }

    /// Inserts one line item and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the counterpart is blank or the insert fails.
    pub async fn insert(
        &self,
        kind: EntryKind,
        entry: NewLedgerEntry,
    ) -> Result<i64, LedgerStoreError> {
        insert_with(&self.db, kind, entry).await
    }

    /// Inserts a batch of line items in one transaction.
    ///
    /// Either every row is written or none is.
    ///
    /// # Errors
    ///
    /// Returns an error if any row is invalid or an insert fails.
    pub async fn insert_batch(
        &self,
        kind: EntryKind,
        entries: Vec<NewLedgerEntry>,
    ) -> Result<u64, LedgerStoreError> {
        let txn = self.db.begin().await?;

        let mut inserted = 0u64;
        for entry in entries {
            insert_with(&txn, kind, entry).await?;
            inserted += 1;
        }

        txn.commit().await?;

        info!(table = table_name(kind), inserted, "Inserted ledger batch");
        Ok(inserted)
    }

    /// Counts the line items of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn count(&self, kind: EntryKind) -> Result<u64, LedgerStoreError> {
        let count = match kind {
            EntryKind::Receivable => contas_receber::Entity::find().count(&self.db).await?,
            EntryKind::Payable => contas_pagar::Entity::find().count(&self.db).await?,
        };
        Ok(count)
    }

    /// Deletes every line item of `kind` and resets its id sequence.
    ///
    /// Both statements run in one transaction, so the next insert after a
    /// successful clear is assigned id 1. This is irreversible.
    ///
    /// # Errors
    ///
    /// Returns an error if either statement fails; nothing is changed then.
    pub async fn clear(&self, kind: EntryKind) -> Result<ClearOutcome, LedgerStoreError> {
        let table = table_name(kind);
        let txn = self.db.begin().await?;

        let rows_deleted = match kind {
            EntryKind::Receivable => contas_receber::Entity::delete_many().exec(&txn).await?,
            EntryKind::Payable => contas_pagar::Entity::delete_many().exec(&txn).await?,
        }
        .rows_affected;

        txn.execute(Statement::from_sql_and_values(
            txn.get_database_backend(),
            "DELETE FROM sqlite_sequence WHERE name = ?",
            [table.into()],
        ))
        .await?;

        txn.commit().await?;

        info!(table, rows_deleted, "Cleared ledger table and reset id sequence");
        Ok(ClearOutcome { kind, rows_deleted })
    }
}

/// `UPPER(TRIM(col)) NOT IN (...)` over the normalized names.
///
/// SQLite only upper-cases ASCII, so this can keep rows the set would
/// exclude but never drops one it would keep.
fn exclusion_condition(column: &str, exclude: &ExclusionSet) -> Option<SimpleExpr> {
    if exclude.is_empty() {
        return None;
    }
    let placeholders = vec!["?"; exclude.len()].join(", ");
    Some(Expr::cust_with_values(
        format!("UPPER(TRIM({column})) NOT IN ({placeholders})"),
        exclude.iter().map(str::to_string),
    ))
}

async fn insert_with<C: ConnectionTrait>(
    conn: &C,
    kind: EntryKind,
    entry: NewLedgerEntry,
) -> Result<i64, LedgerStoreError> {
    let counterpart = entry.counterpart.trim().to_string();
    if counterpart.is_empty() {
        return Err(LedgerStoreError::InvalidInput(format!(
            "{} must not be empty",
            kind.counterpart_role()
        )));
    }

    let id = match kind {
        EntryKind::Receivable => {
            let model = contas_receber::ActiveModel {
                id: NotSet,
                cliente: Set(counterpart),
                valor_principal: Set(entry.principal_value),
                status: Set(entry.status_label),
                competencia: Set(entry.competence),
                emissao: Set(entry.issue_date),
                vencimento: Set(entry.due_date),
                vencimento_original: Set(entry.original_due_date),
                data_baixa: Set(entry.settlement_date),
                data_liquidacao: Set(entry.liquidation_date),
                conta_contabil: Set(entry.accounting_account),
                banco_recebimento: Set(entry.payment_bank),
                conta_recebimento: Set(entry.payment_account),
                forma_recebimento: Set(entry.payment_method),
                observacoes: Set(entry.notes),
            };
            contas_receber::Entity::insert(model).exec(conn).await?.last_insert_id
        }
        EntryKind::Payable => {
            let model = contas_pagar::ActiveModel {
                id: NotSet,
                fornecedor: Set(counterpart),
                valor_principal: Set(entry.principal_value),
                status: Set(entry.status_label),
                competencia: Set(entry.competence),
                emissao: Set(entry.issue_date),
                vencimento: Set(entry.due_date),
                vencimento_original: Set(entry.original_due_date),
                data_baixa: Set(entry.settlement_date),
                data_liquidacao: Set(entry.liquidation_date),
                conta_contabil: Set(entry.accounting_account),
                banco_pagamento: Set(entry.payment_bank),
                conta_pagamento: Set(entry.payment_account),
                forma_pagamento: Set(entry.payment_method),
                observacoes: Set(entry.notes),
            };
            contas_pagar::Entity::insert(model).exec(conn).await?.last_insert_id
        }
    };

    Ok(id)
}

/// A row from either ledger table, before parsing.
struct StoredRow {
    id: i64,
    counterpart: String,
    principal_value: Decimal,
    status: String,
    competence: Option<String>,
    issue_date: Option<String>,
    due_date: Option<String>,
    original_due_date: Option<String>,
    settlement_date: Option<String>,
    liquidation_date: Option<String>,
    accounting_account: Option<String>,
    payment_bank: Option<String>,
    payment_account: Option<String>,
    payment_method: Option<String>,
    notes: Option<String>,
}

impl From<contas_receber::Model> for StoredRow {
    fn from(m: contas_receber::Model) -> Self {
        Self {
            id: m.id,
            counterpart: m.cliente,
            principal_value: m.valor_principal,
            status: m.status,
            competence: m.competencia,
            issue_date: m.emissao,
            due_date: m.vencimento,
            original_due_date: m.vencimento_original,
            settlement_date: m.data_baixa,
            liquidation_date: m.data_liquidacao,
            accounting_account: m.conta_contabil,
            payment_bank: m.banco_recebimento,
            payment_account: m.conta_recebimento,
            payment_method: m.forma_recebimento,
            notes: m.observacoes,
        }
    }
}

impl From<contas_pagar::Model> for StoredRow {
    fn from(m: contas_pagar::Model) -> Self {
        Self {
            id: m.id,
            counterpart: m.fornecedor,
            principal_value: m.valor_principal,
            status: m.status,
            competence: m.competencia,
            issue_date: m.emissao,
            due_date: m.vencimento,
            original_due_date: m.vencimento_original,
            settlement_date: m.data_baixa,
            liquidation_date: m.data_liquidacao,
            accounting_account: m.conta_contabil,
            payment_bank: m.banco_pagamento,
            payment_account: m.conta_pagamento,
            payment_method: m.forma_pagamento,
            notes: m.observacoes,
        }
    }
}

impl StoredRow {
    fn decode(self, kind: EntryKind) -> LedgerEntry {
        let table = table_name(kind);
        let status = LedgerStatus::from_label(&self.status);
        if status.is_unrecognized() {
            warn!(table, id = self.id, label = %self.status, "Unrecognized status label");
        }

        let id = self.id;
        let date = |column: &str, raw: Option<&str>| decode_date(table, id, column, raw);

        LedgerEntry {
            id,
            kind,
            counterpart: self.counterpart,
            principal_value: self.principal_value,
            status,
            issue_date: date("emissao", self.issue_date.as_deref()),
            due_date: date("vencimento", self.due_date.as_deref()),
            original_due_date: date("vencimento_original", self.original_due_date.as_deref()),
            settlement_date: date("data_baixa", self.settlement_date.as_deref()),
            liquidation_date: date("data_liquidacao", self.liquidation_date.as_deref()),
            status_label: self.status,
            competence: self.competence,
            accounting_account: self.accounting_account,
            payment_bank: self.payment_bank,
            payment_account: self.payment_account,
            payment_method: self.payment_method,
            notes: self.notes,
        }
    }
}

/// Blank text is absent; text that does not parse is absent and logged.
fn decode_date(table: &str, id: i64, column: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let parsed = parse_date(raw);
    if parsed.is_none() {
        warn!(table, id, column, raw, "Unparseable date");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names() {
        assert_eq!(table_name(EntryKind::Receivable), "contas_receber");
        assert_eq!(table_name(EntryKind::Payable), "contas_pagar");
    }

    #[test]
    fn test_no_exclusion_condition_for_empty_set() {
        assert!(exclusion_condition("cliente", &ExclusionSet::new()).is_none());
    }

    #[test]
    fn test_decode_date_blank_is_absent() {
        assert_eq!(decode_date("contas_pagar", 1, "vencimento", Some("  ")), None);
        assert_eq!(decode_date("contas_pagar", 1, "vencimento", None), None);
        assert_eq!(
            decode_date("contas_pagar", 1, "vencimento", Some("15/09/2025")),
            NaiveDate::from_ymd_opt(2025, 9, 15)
        );
        assert_eq!(decode_date("contas_pagar", 1, "vencimento", Some("amanhã")), None);
    }
}
