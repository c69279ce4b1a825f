//! `SeaORM` Entity for veiculos_suporte table.
//!
//! The `status` column holds the vehicle's contracting profile (FIXO/SPOT).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "veiculos_suporte")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub placa: String,
    pub status: Option<String>,
    pub tipologia: Option<String>,
    pub data_cadastro: Option<String>,
    pub ativo: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
