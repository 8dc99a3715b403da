//! In-memory tank service for tests
//!
//! Behaves like the REST service for the operations the application uses and
//! records every call so tests can assert which requests were (not) issued.

use std::sync::{Mutex, MutexGuard, PoisonError};

use fishrack_core::prelude::*;
use fishrack_core::{Rack, RackId, Tank, TankId};

use crate::payload::{MoveRequest, NewTank, RowConfigRequest, SwapRequest, TankFields};
use crate::service::TankService;

/// One recorded request
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListRacks,
    CreateTank(NewTank),
    UpdateTank(TankId, TankFields),
    DeleteTank(TankId),
    SwapPositions(SwapRequest),
    UpdateRowConfig(RackId, RowConfigRequest),
    MoveTank(TankId, MoveRequest),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Call::ListRacks)
    }
}

/// Failure injected into the next request
#[derive(Debug, Clone)]
enum Failure {
    Server(u16, Option<String>),
    Auth(u16),
    Network,
}

impl Failure {
    fn into_error(self) -> Error {
        match self {
            Failure::Server(status, message) => Error::server(status, message),
            Failure::Auth(status) => Error::AuthFailure {
                status: Some(status),
            },
            Failure::Network => Error::network("connection refused"),
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    racks: Vec<Rack>,
    calls: Vec<Call>,
    next_tank_id: u64,
    fail_next: Option<Failure>,
}

/// In-memory [`TankService`]
#[derive(Debug, Default)]
pub struct FakeTankService {
    state: Mutex<FakeState>,
}

impl FakeTankService {
    pub fn new(racks: Vec<Rack>) -> Self {
        let next_tank_id = racks
            .iter()
            .flat_map(|r| r.tanks.iter())
            .map(|t| t.id.0)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            state: Mutex::new(FakeState {
                racks,
                next_tank_id,
                ..Default::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fail the next request with a server error
    pub fn fail_next(&self, status: u16, message: Option<&str>) {
        self.lock().fail_next = Some(Failure::Server(status, message.map(str::to_string)));
    }

    /// Reject the next request as unauthenticated
    pub fn fail_next_auth(&self, status: u16) {
        self.lock().fail_next = Some(Failure::Auth(status));
    }

    /// Fail the next request at the transport level
    pub fn fail_next_network(&self) {
        self.lock().fail_next = Some(Failure::Network);
    }

    /// Every request received so far
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Requests other than `list_racks`
    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    /// Current server-side racks
    pub fn racks(&self) -> Vec<Rack> {
        self.lock().racks.clone()
    }

    fn begin(&self, call: Call) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.fail_next.take() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(state),
        }
    }
}

impl FakeState {
    fn tank_mut(&mut self, id: TankId) -> Result<&mut Tank> {
        self.racks
            .iter_mut()
            .flat_map(|r| r.tanks.iter_mut())
            .find(|t| t.id == id)
            .ok_or_else(|| Error::server(404, Some("Tank not found".to_string())))
    }

    fn tank(&self, id: TankId) -> Result<&Tank> {
        self.racks
            .iter()
            .flat_map(|r| r.tanks.iter())
            .find(|t| t.id == id)
            .ok_or_else(|| Error::server(404, Some("Tank not found".to_string())))
    }
}

fn apply_fields(tank: &mut Tank, fields: &TankFields) {
    tank.position = fields.position.clone();
    tank.size = fields.size;
    tank.line = fields.line.clone();
    tank.dob = fields.dob;
    tank.color = fields.color.clone();
    tank.subdivisions = fields.subdivisions.clone();
}

impl TankService for FakeTankService {
    async fn list_racks(&self) -> Result<Vec<Rack>> {
        let state = self.begin(Call::ListRacks)?;
        Ok(state.racks.clone())
    }

    async fn create_tank(&self, tank: &NewTank) -> Result<Tank> {
        let mut state = self.begin(Call::CreateTank(tank.clone()))?;
        let id = TankId(state.next_tank_id);
        state.next_tank_id += 1;

        let mut created = Tank {
            id,
            position: String::new(),
            size: Default::default(),
            line: None,
            dob: None,
            color: None,
            rack_id: Some(tank.rack_id),
            subdivisions: Vec::new(),
        };
        apply_fields(&mut created, &tank.fields);

        let rack = state
            .racks
            .iter_mut()
            .find(|r| r.id == tank.rack_id)
            .ok_or_else(|| Error::server(404, Some("Rack not found".to_string())))?;
        rack.tanks.push(created.clone());
        Ok(created)
    }

    async fn update_tank(&self, id: TankId, fields: &TankFields) -> Result<Tank> {
        let mut state = self.begin(Call::UpdateTank(id, fields.clone()))?;
        let tank = state.tank_mut(id)?;
        apply_fields(tank, fields);
        Ok(tank.clone())
    }

    async fn delete_tank(&self, id: TankId) -> Result<()> {
        let mut state = self.begin(Call::DeleteTank(id))?;
        state.tank(id)?;
        for rack in &mut state.racks {
            rack.tanks.retain(|t| t.id != id);
        }
        Ok(())
    }

    async fn swap_positions(&self, request: &SwapRequest) -> Result<()> {
        let mut state = self.begin(Call::SwapPositions(request.clone()))?;
        let first = state.tank(request.tank1_id)?.size;
        let second = state.tank(request.tank2_id)?.size;
        if first != second {
            return Err(Error::server(
                400,
                Some("Cannot swap tanks of different sizes".to_string()),
            ));
        }
        state.tank_mut(request.tank1_id)?.position = request.position2.clone();
        state.tank_mut(request.tank2_id)?.position = request.position1.clone();
        Ok(())
    }

    async fn update_row_config(&self, rack: RackId, request: &RowConfigRequest) -> Result<Rack> {
        let mut state = self.begin(Call::UpdateRowConfig(rack, request.clone()))?;
        let target = state
            .racks
            .iter_mut()
            .find(|r| r.id == rack)
            .ok_or_else(|| Error::server(404, Some("Rack not found".to_string())))?;
        target.row_overrides = request.row_configs.clone();
        Ok(target.clone())
    }

    async fn move_tank(&self, id: TankId, request: &MoveRequest) -> Result<()> {
        let mut state = self.begin(Call::MoveTank(id, request.clone()))?;
        state.tank_mut(id)?.position = request.position.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishrack_core::{Subdivision, TankSize};

    fn tank(id: u64, position: &str, size: TankSize) -> Tank {
        Tank {
            id: TankId(id),
            position: position.to_string(),
            size,
            line: None,
            dob: None,
            color: None,
            rack_id: Some(RackId(1)),
            subdivisions: vec![Subdivision::default()],
        }
    }

    fn fake() -> FakeTankService {
        FakeTankService::new(vec![Rack::new(RackId(1), "R", 2, 3)
            .with_tank(tank(1, "A1", TankSize::Regular))
            .with_tank(tank(2, "B1", TankSize::Regular))
            .with_tank(tank(3, "A2", TankSize::Large))])
    }

    #[tokio::test]
    async fn test_swap_exchanges_positions() {
        let svc = fake();
        svc.swap_positions(&SwapRequest {
            tank1_id: TankId(1),
            tank2_id: TankId(2),
            position1: "A1".into(),
            position2: "B1".into(),
        })
        .await
        .unwrap();

        let rack = &svc.racks()[0];
        assert_eq!(rack.tank(TankId(1)).unwrap().position, "B1");
        assert_eq!(rack.tank(TankId(2)).unwrap().position, "A1");
    }

    #[tokio::test]
    async fn test_swap_rejects_size_mismatch() {
        let svc = fake();
        let err = svc
            .swap_positions(&SwapRequest {
                tank1_id: TankId(1),
                tank2_id: TankId(3),
                position1: "A1".into(),
                position2: "A2".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message("Failed to swap tanks"),
            "Cannot swap tanks of different sizes"
        );
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let svc = fake();
        let created = svc
            .create_tank(&NewTank {
                rack_id: RackId(1),
                fields: TankFields::from(&tank(0, "B2", TankSize::Small)),
            })
            .await
            .unwrap();
        assert_eq!(created.id, TankId(4));
        assert_eq!(svc.racks()[0].tanks.len(), 4);
        assert_eq!(svc.mutations().len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure_applies_once() {
        let svc = fake();
        svc.fail_next(500, None);
        assert!(svc.list_racks().await.is_err());
        assert!(svc.list_racks().await.is_ok());
        assert_eq!(svc.calls(), vec![Call::ListRacks, Call::ListRacks]);
    }
}
