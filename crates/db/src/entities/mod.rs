//! `SeaORM` entity definitions.
//!
//! Table and column names follow the existing SQLite schema.

pub mod contas_pagar;
pub mod contas_receber;
pub mod veiculos_suporte;

pub mod prelude {
    //! Entity aliases.

    pub use super::contas_pagar::Entity as ContasPagar;
    pub use super::contas_receber::Entity as ContasReceber;
    pub use super::veiculos_suporte::Entity as VeiculosSuporte;
}
