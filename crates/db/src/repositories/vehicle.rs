//! Support-vehicle repository for plate lookups.

use std::collections::HashMap;

use finledger_core::vehicle::{NewVehicle, VehicleError, VehicleInfo, normalize_plate};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};

use crate::entities::veiculos_suporte;

/// Error types for vehicle store operations.
#[derive(Debug, thiserror::Error)]
pub enum VehicleStoreError {
    /// Connection or schema failure.
    #[error("Vehicle store unavailable: {0}")]
    Unavailable(#[from] DbErr),

    /// Registration rejected before reaching the store.
    #[error("Invalid vehicle input: {0}")]
    InvalidInput(#[from] VehicleError),
}

impl From<veiculos_suporte::Model> for VehicleInfo {
    fn from(model: veiculos_suporte::Model) -> Self {
        Self {
            typology: model.tipologia,
            profile: model.status,
        }
    }
}

/// Vehicle repository for lookup and registration.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    db: DatabaseConnection,
}

impl VehicleRepository {
    /// Creates a new vehicle repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Looks up the classification of an active vehicle.
    ///
    /// Issues exactly one query. An unknown or inactive plate yields
    /// [`VehicleInfo::not_found`]; duplicate active plates resolve to the
    /// lowest id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn lookup(&self, plate: &str) -> Result<VehicleInfo, VehicleStoreError> {
        let plate = normalize_plate(plate);

        let found = veiculos_suporte::Entity::find()
            .filter(veiculos_suporte::Column::Placa.eq(plate.as_str()))
            .filter(veiculos_suporte::Column::Ativo.eq(true))
            .order_by_asc(veiculos_suporte::Column::Id)
            .one(&self.db)
            .await?;

        debug!(plate = %plate, found = found.is_some(), "Vehicle lookup");
        Ok(found.map_or_else(VehicleInfo::not_found, VehicleInfo::from))
    }

    /// Looks up several plates in one query.
    ///
    /// The map is keyed by normalized plate and holds every requested plate;
    /// unknown ones map to [`VehicleInfo::not_found`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn lookup_many<S: AsRef<str>>(
        &self,
        plates: &[S],
    ) -> Result<HashMap<String, VehicleInfo>, VehicleStoreError> {
        let plates: Vec<String> = plates.iter().map(|p| normalize_plate(p.as_ref())).collect();
        if plates.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = veiculos_suporte::Entity::find()
            .filter(veiculos_suporte::Column::Placa.is_in(plates.iter().map(String::as_str)))
            .filter(veiculos_suporte::Column::Ativo.eq(true))
            .order_by_asc(veiculos_suporte::Column::Id)
            .all(&self.db)
            .await?;

        let mut found: HashMap<String, VehicleInfo> = HashMap::with_capacity(plates.len());
        for row in rows {
            // Rows arrive in id order, so the first one per plate wins.
            found.entry(row.placa.clone()).or_insert_with(|| row.into());
        }
        for plate in plates {
            found.entry(plate).or_insert_with(VehicleInfo::not_found);
        }

        Ok(found)
    }

    /// Registers an active vehicle and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn register(&self, vehicle: NewVehicle) -> Result<i64, VehicleStoreError> {
        let model = veiculos_suporte::ActiveModel {
            id: NotSet,
            placa: Set(vehicle.plate.clone()),
            status: Set(Some(vehicle.profile.label().to_string())),
            tipologia: Set(Some(vehicle.typology)),
            data_cadastro: Set(Some(chrono::Local::now().date_naive().to_string())),
            ativo: Set(true),
        };

        let id = veiculos_suporte::Entity::insert(model)
            .exec(&self.db)
            .await?
            .last_insert_id;

        info!(plate = %vehicle.plate, profile = %vehicle.profile, id, "Registered vehicle");
        Ok(id)
    }

    /// Marks every active record of a plate inactive. Returns the rows changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn deactivate(&self, plate: &str) -> Result<u64, VehicleStoreError> {
        let plate = normalize_plate(plate);

        let result = veiculos_suporte::Entity::update_many()
            .col_expr(
                veiculos_suporte::Column::Ativo,
                sea_orm::sea_query::Expr::value(false),
            )
            .filter(veiculos_suporte::Column::Placa.eq(plate.as_str()))
            .filter(veiculos_suporte::Column::Ativo.eq(true))
            .exec(&self.db)
            .await?;

        info!(plate = %plate, rows = result.rows_affected, "Deactivated vehicle");
        Ok(result.rows_affected)
    }

    /// Counts active vehicles.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn count_active(&self) -> Result<u64, VehicleStoreError> {
        let count = veiculos_suporte::Entity::find()
            .filter(veiculos_suporte::Column::Ativo.eq(true))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
