//! Tank/rack service abstraction
//!
//! The controller talks to the backend only through [`TankService`], so the
//! HTTP client and the in-memory fake are interchangeable.

use fishrack_core::prelude::*;
use fishrack_core::{Rack, RackId, Tank, TankId};

use crate::payload::{MoveRequest, NewTank, RowConfigRequest, SwapRequest, TankFields};

/// Remote operations on racks and tanks.
///
/// Authentication failures surface as [`Error::AuthFailure`] and must not be
/// retried by callers.
#[trait_variant::make(TankService: Send)]
pub trait LocalTankService {
    /// `GET /racks`
    async fn list_racks(&self) -> Result<Vec<Rack>>;

    /// `POST /tanks`
    async fn create_tank(&self, tank: &NewTank) -> Result<Tank>;

    /// `PUT /tanks/{id}`
    async fn update_tank(&self, id: TankId, fields: &TankFields) -> Result<Tank>;

    /// `DELETE /tanks/{id}`
    async fn delete_tank(&self, id: TankId) -> Result<()>;

    /// `POST /tanks/swap-positions`
    async fn swap_positions(&self, request: &SwapRequest) -> Result<()>;

    /// `PUT /racks/{id}/row-config`
    async fn update_row_config(&self, rack: RackId, request: &RowConfigRequest) -> Result<Rack>;

    /// `PUT /tanks/{id}/position`
    async fn move_tank(&self, id: TankId, request: &MoveRequest) -> Result<()>;
}
