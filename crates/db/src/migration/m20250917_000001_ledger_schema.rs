//! Ledger schema migration.
//!
//! Creates the receivable, payable and support-vehicle tables. Dates are kept
//! as free text because imported sheets mix `DD/MM/YYYY` and ISO forms.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(CONTAS_RECEBER_SQL).await?;
        db.execute_unprepared(CONTAS_PAGAR_SQL).await?;
        db.execute_unprepared(VEICULOS_SUPORTE_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
DROP TABLE IF EXISTS veiculos_suporte;
DROP TABLE IF EXISTS contas_pagar;
DROP TABLE IF EXISTS contas_receber;
",
        )
        .await?;
        Ok(())
    }
}

const CONTAS_RECEBER_SQL: &str = r"
CREATE TABLE IF NOT EXISTS contas_receber (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cliente TEXT NOT NULL,
    valor_principal REAL NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT '',
    competencia TEXT,
    emissao TEXT,
    vencimento TEXT,
    vencimento_original TEXT,
    data_baixa TEXT,
    data_liquidacao TEXT,
    conta_contabil TEXT,
    banco_recebimento TEXT,
    conta_recebimento TEXT,
    forma_recebimento TEXT,
    observacoes TEXT
);

CREATE INDEX IF NOT EXISTS idx_contas_receber_cliente ON contas_receber(cliente);
CREATE INDEX IF NOT EXISTS idx_contas_receber_competencia ON contas_receber(competencia);
";

const CONTAS_PAGAR_SQL: &str = r"
CREATE TABLE IF NOT EXISTS contas_pagar (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fornecedor TEXT NOT NULL,
    valor_principal REAL NOT NULL DEFAULT 0,
    status TEXT NOT NULL DEFAULT '',
    competencia TEXT,
    emissao TEXT,
    vencimento TEXT,
    vencimento_original TEXT,
    data_baixa TEXT,
    data_liquidacao TEXT,
    conta_contabil TEXT,
    banco_pagamento TEXT,
    conta_pagamento TEXT,
    forma_pagamento TEXT,
    observacoes TEXT
);

CREATE INDEX IF NOT EXISTS idx_contas_pagar_fornecedor ON contas_pagar(fornecedor);
CREATE INDEX IF NOT EXISTS idx_contas_pagar_competencia ON contas_pagar(competencia);
";

const VEICULOS_SUPORTE_SQL: &str = r"
CREATE TABLE IF NOT EXISTS veiculos_suporte (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    placa TEXT NOT NULL,
    status TEXT,
    tipologia TEXT,
    data_cadastro TEXT,
    ativo INTEGER NOT NULL DEFAULT 1
);

-- Lookups key on (placa, ativo); duplicates are allowed and resolve to the lowest id
CREATE INDEX IF NOT EXISTS idx_veiculos_suporte_placa ON veiculos_suporte(placa, ativo);
";
