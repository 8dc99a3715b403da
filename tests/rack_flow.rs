//! End-to-end flows through the TEA loop against the in-memory tank service
//!
//! Messages go through `process_message`, background tasks really run on the
//! tokio runtime, and their completions come back over the message channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use fishrack::headless;
use fishrack_api::testing::{Call, FakeTankService};
use fishrack_api::{MoveRequest, SwapRequest};
use fishrack_app::config::Settings;
use fishrack_app::process::process_message;
use fishrack_app::{AppState, Message};
use fishrack_core::{Position, Rack, RackId, Subdivision, Tank, TankId, TankSize};

fn tank(id: u64, position: &str, size: TankSize) -> Tank {
    Tank {
        id: TankId(id),
        position: position.to_string(),
        size,
        line: Some(format!("line-{id}")),
        dob: None,
        color: None,
        rack_id: Some(RackId(1)),
        subdivisions: vec![Subdivision::default()],
    }
}

/// 2x3 rack: A1 regular, A2-A3 large, B1 regular
fn rack() -> Rack {
    Rack::new(RackId(1), "Rack 1", 2, 3)
        .with_tank(tank(1, "A1", TankSize::Regular))
        .with_tank(tank(2, "A2", TankSize::Large))
        .with_tank(tank(3, "B1", TankSize::Regular))
}

fn pos(label: &str) -> Position {
    Position::decode(label).unwrap()
}

struct Harness {
    state: AppState,
    service: Arc<FakeTankService>,
    tx: mpsc::Sender<Message>,
    rx: mpsc::Receiver<Message>,
}

impl Harness {
    fn new() -> Self {
        let service = Arc::new(FakeTankService::new(vec![rack()]));
        let (tx, rx) = mpsc::channel(16);
        Self {
            state: AppState::with_racks(Settings::default(), service.racks()),
            service,
            tx,
            rx,
        }
    }

    fn send(&mut self, message: Message) {
        process_message(&mut self.state, message, &self.tx, &self.service);
    }

    /// Wait for one background completion and feed it back into the loop
    async fn settle(&mut self) {
        let message = tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("task did not finish")
            .expect("channel closed");
        self.send(message);
    }

    fn position_of(&self, id: u64) -> String {
        self.state.racks[0].tank(TankId(id)).unwrap().position.clone()
    }
}

#[tokio::test]
async fn test_drop_on_empty_cell_moves_and_refetches() {
    let mut h = Harness::new();

    h.send(Message::DragStart(pos("A1")));
    h.send(Message::Drop(pos("B2")));
    assert!(h.state.view.as_ref().unwrap().is_saving());

    h.settle().await;

    assert_eq!(h.position_of(1), "B2");
    assert_eq!(
        h.service.mutations(),
        vec![Call::MoveTank(
            TankId(1),
            MoveRequest {
                position: "B2".into()
            }
        )]
    );
    assert_eq!(h.service.calls().last(), Some(&Call::ListRacks));
    let view = h.state.view.as_ref().unwrap();
    assert!(!view.is_saving());
    assert!(view.drag.is_none());
    assert!(view.error.is_none());
}

#[tokio::test]
async fn test_drop_on_same_size_tank_swaps() {
    let mut h = Harness::new();

    h.send(Message::DragStart(pos("A1")));
    h.send(Message::Drop(pos("B1")));
    h.settle().await;

    assert_eq!(h.position_of(1), "B1");
    assert_eq!(h.position_of(3), "A1");
    assert_eq!(
        h.service.mutations(),
        vec![Call::SwapPositions(SwapRequest {
            tank1_id: TankId(1),
            tank2_id: TankId(3),
            position1: "A1".into(),
            position2: "B1".into(),
        })]
    );
}

#[tokio::test]
async fn test_size_mismatch_never_reaches_the_service() {
    let mut h = Harness::new();

    h.send(Message::DragStart(pos("A1")));
    h.send(Message::Drop(pos("A2")));

    assert!(h.service.calls().is_empty());
    let view = h.state.view.as_ref().unwrap();
    assert_eq!(
        view.error.as_deref(),
        Some("Tanks of different sizes cannot be swapped")
    );
    assert_eq!(h.position_of(1), "A1");
}

#[tokio::test]
async fn test_server_rejection_keeps_racks_and_reports() {
    let mut h = Harness::new();
    h.service.fail_next(409, Some("Position already taken"));

    h.send(Message::DragStart(pos("A1")));
    h.send(Message::Drop(pos("B3")));
    h.settle().await;

    assert_eq!(h.position_of(1), "A1");
    let view = h.state.view.as_ref().unwrap();
    assert_eq!(view.error.as_deref(), Some("Position already taken"));
    assert!(!view.is_saving());
    // No refetch after a failed mutation
    assert!(!h.service.calls().contains(&Call::ListRacks));
}

#[tokio::test]
async fn test_auth_failure_suspends_requests() {
    let mut h = Harness::new();
    h.service.fail_next_auth(401);

    h.send(Message::Refresh);
    h.settle().await;
    assert!(h.state.auth_failed);

    let before = h.service.calls().len();
    h.send(Message::Refresh);
    h.send(Message::DragStart(pos("A1")));
    h.send(Message::Drop(pos("B1")));
    assert_eq!(h.service.calls().len(), before);
}

#[tokio::test]
async fn test_headless_dump_reflects_service_state() {
    let service = FakeTankService::new(vec![rack()]);
    let output = headless::dump(&service, false).await.unwrap();

    assert!(output.contains("Rack 1 (#1)"));
    assert!(output.contains("A  [ #1  ][ #2  ][  <  ]"));
    assert!(output.contains("B  [ #3  ][  ·  ][  ·  ]"));
    assert!(output.contains("3 tanks"));
}

#[test]
fn test_headless_json_dump() {
    let service = FakeTankService::new(vec![rack()]);
    let output = tokio_test::block_on(headless::dump(&service, true)).unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["racks"][0]["name"], "Rack 1");
    assert_eq!(value["racks"][0]["rows"][0][1]["label"], "A2-A3");
    assert_eq!(value["overall"]["total_tanks"], 3);
}
