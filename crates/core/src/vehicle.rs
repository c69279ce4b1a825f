//! Vehicle classification types.
//!
//! A vehicle's profile (`FIXO` / `SPOT`) describes how it is contracted and is
//! unrelated to a ledger entry's lifecycle status.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalizes a plate for storage and lookup: trimmed, upper case.
#[must_use]
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Contracting profile of a support vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleProfile {
    /// Fixed, recurring contract.
    Fixo,
    /// Spot, per-trip contract.
    Spot,
}

impl VehicleProfile {
    /// Stored label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Fixo => "FIXO",
            Self::Spot => "SPOT",
        }
    }
}

impl std::fmt::Display for VehicleProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for VehicleProfile {
    type Err = VehicleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FIXO" => Ok(Self::Fixo),
            "SPOT" => Ok(Self::Spot),
            _ => Err(VehicleError::UnknownProfile(s.to_string())),
        }
    }
}

/// Vehicle validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VehicleError {
    /// Plate is blank.
    #[error("Plate must not be empty")]
    EmptyPlate,

    /// Typology is blank.
    #[error("Typology must not be empty")]
    EmptyTypology,

    /// Profile label is neither FIXO nor SPOT.
    #[error("Unknown vehicle profile: {0}")]
    UnknownProfile(String),
}

/// Classification returned by a plate lookup.
///
/// An unknown plate yields both fields as `None`, serialized as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    /// Vehicle typology (e.g. "TRUCK", "CARRETA").
    pub typology: Option<String>,
    /// Stored profile label, as written.
    pub profile: Option<String>,
}

impl VehicleInfo {
    /// Result for a plate with no active record.
    #[must_use]
    pub const fn not_found() -> Self {
        Self {
            typology: None,
            profile: None,
        }
    }

    /// Returns true if an active record was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.typology.is_some() || self.profile.is_some()
    }
}

/// Input for registering a support vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVehicle {
    /// Normalized plate.
    pub plate: String,
    /// Vehicle typology.
    pub typology: String,
    /// Contracting profile.
    pub profile: VehicleProfile,
}

impl NewVehicle {
    /// Validates and normalizes a registration.
    ///
    /// # Errors
    ///
    /// Returns an error if the plate or typology is blank.
    pub fn new(plate: &str, typology: &str, profile: VehicleProfile) -> Result<Self, VehicleError> {
        let plate = normalize_plate(plate);
        if plate.is_empty() {
            return Err(VehicleError::EmptyPlate);
        }
        let typology = typology.trim();
        if typology.is_empty() {
            return Err(VehicleError::EmptyTypology);
        }
        Ok(Self {
            plate,
            typology: typology.to_uppercase(),
            profile,
        })
    }
}
