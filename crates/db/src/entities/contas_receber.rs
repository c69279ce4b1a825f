//! `SeaORM` Entity for contas_receber table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "contas_receber")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub cliente: String,
    pub valor_principal: Decimal,
    pub status: String,
    pub competencia: Option<String>,
    pub emissao: Option<String>,
    pub vencimento: Option<String>,
    pub vencimento_original: Option<String>,
    pub data_baixa: Option<String>,
    pub data_liquidacao: Option<String>,
    pub conta_contabil: Option<String>,
    pub banco_recebimento: Option<String>,
    pub conta_recebimento: Option<String>,
    pub forma_recebimento: Option<String>,
    pub observacoes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
