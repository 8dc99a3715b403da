//! Request bodies sent to the tank/rack service

use chrono::NaiveDate;
use serde::Serialize;

use fishrack_core::{RackId, RowOverrides, Subdivision, Tank, TankId, TankSize};

/// Editable tank fields as sent on create and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TankFields {
    pub position: String,
    pub size: TankSize,
    pub line: Option<String>,
    pub dob: Option<NaiveDate>,
    pub color: Option<String>,
    pub subdivisions: Vec<Subdivision>,
}

impl From<&Tank> for TankFields {
    fn from(tank: &Tank) -> Self {
        Self {
            position: tank.position.clone(),
            size: tank.size,
            line: tank.line.clone(),
            dob: tank.dob,
            color: tank.color.clone(),
            subdivisions: tank.subdivisions.clone(),
        }
    }
}

/// Body of `POST /tanks`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTank {
    pub rack_id: RackId,
    #[serde(flatten)]
    pub fields: TankFields,
}

/// Body of `POST /tanks/swap-positions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub tank1_id: TankId,
    pub tank2_id: TankId,
    pub position1: String,
    pub position2: String,
}

/// Body of `PUT /racks/{id}/row-config`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowConfigRequest {
    pub row_configs: RowOverrides,
}

/// Body of `PUT /tanks/{id}/position`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRequest {
    pub position: String,
}
