//! Action handlers: UpdateAction dispatch and background task execution
//!
//! Each task performs its request and, for mutations, refetches the rack
//! list in the same task. Completion is reported as a single
//! `Message::TaskFinished`.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use fishrack_api::TankService;
use fishrack_core::Error;

use crate::handler::{Task, UpdateAction};
use crate::message::{Message, TaskKind, TaskOutcome};

/// Execute an action by spawning a background task
pub fn handle_action<S>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, service: Arc<S>)
where
    S: TankService + Send + Sync + 'static,
{
    match action {
        UpdateAction::SpawnTask(task) => {
            tokio::spawn(async move {
                execute_task(service.as_ref(), task, msg_tx).await;
            });
        }
    }
}

/// Run a task and report its completion to the TEA loop
pub async fn execute_task<S: TankService + Sync>(
    service: &S,
    task: Task,
    msg_tx: mpsc::Sender<Message>,
) {
    let message = run_task(service, task).await;
    // The loop may already have shut down
    if msg_tx.send(message).await.is_err() {
        debug!("Task completion dropped: message channel closed");
    }
}

/// Run a task to completion and build its completion message
pub async fn run_task<S: TankService + Sync>(service: &S, task: Task) -> Message {
    let generation = task.generation();
    let kind = task.kind();
    debug!("Running {:?} for generation {}", kind, generation);

    let mutation = match task {
        Task::LoadRacks { .. } => Ok(()),
        Task::CreateTank { tank, .. } => service.create_tank(&tank).await.map(|_| ()),
        Task::UpdateTank { id, fields, .. } => service.update_tank(id, &fields).await.map(|_| ()),
        Task::DeleteTank { id, .. } => service.delete_tank(id).await,
        Task::SwapTanks { request, .. } => service.swap_positions(&request).await,
        Task::MoveTank { id, request, .. } => service.move_tank(id, &request).await,
        Task::UpdateRowConfig {
            rack_id, request, ..
        } => service
            .update_row_config(rack_id, &request)
            .await
            .map(|_| ()),
    };

    let outcome = match mutation {
        Err(e) => failure(kind, &e),
        Ok(()) => match service.list_racks().await {
            Ok(racks) => TaskOutcome::Refreshed(racks),
            Err(e) if kind == TaskKind::LoadRacks => failure(kind, &e),
            Err(e) if e.is_auth_failure() => TaskOutcome::AuthFailed,
            Err(e) => {
                TaskOutcome::RefreshFailed(e.user_message(TaskKind::LoadRacks.fallback_message()))
            }
        },
    };

    Message::TaskFinished {
        generation,
        kind,
        outcome,
    }
}

fn failure(kind: TaskKind, error: &Error) -> TaskOutcome {
    if error.is_auth_failure() {
        return TaskOutcome::AuthFailed;
    }
    warn!("{:?} failed: {}", kind, error);
    TaskOutcome::Failed(error.user_message(kind.fallback_message()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fishrack_api::testing::{Call, FakeTankService};
    use fishrack_api::{SwapRequest, TankFields};
    use fishrack_core::{Rack, RackId, Subdivision, Tank, TankId, TankSize};

    fn tank(id: u64, position: &str, size: TankSize) -> Tank {
        Tank {
            id: TankId(id),
            position: position.into(),
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
            .with_tank(tank(2, "B1", TankSize::Regular))])
    }

    fn outcome(message: Message) -> (u64, TaskKind, TaskOutcome) {
        match message {
            Message::TaskFinished {
                generation,
                kind,
                outcome,
            } => (generation, kind, outcome),
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mutation_then_refetch() {
        let svc = fake();
        let msg = run_task(
            &svc,
            Task::SwapTanks {
                generation: 3,
                request: SwapRequest {
                    tank1_id: TankId(1),
                    tank2_id: TankId(2),
                    position1: "A1".into(),
                    position2: "B1".into(),
                },
            },
        )
        .await;

        let (generation, kind, outcome) = outcome(msg);
        assert_eq!(generation, 3);
        assert_eq!(kind, TaskKind::SwapTanks);
        let TaskOutcome::Refreshed(racks) = outcome else {
            panic!("expected refresh");
        };
        assert_eq!(racks[0].tank(TankId(1)).unwrap().position, "B1");

        let calls = svc.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], Call::SwapPositions(_)));
        assert_eq!(calls[1], Call::ListRacks);
    }

    #[tokio::test]
    async fn test_failure_uses_server_message_and_skips_refetch() {
        let svc = fake();
        svc.fail_next(400, Some("Position already taken"));
        let msg = run_task(
            &svc,
            Task::UpdateTank {
                generation: 1,
                id: TankId(1),
                fields: TankFields::from(&tank(1, "A1", TankSize::Regular)),
            },
        )
        .await;

        let (_, _, outcome) = outcome(msg);
        assert!(matches!(outcome, TaskOutcome::Failed(ref m) if m == "Position already taken"));
        assert_eq!(svc.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_fallback() {
        let svc = fake();
        svc.fail_next_network();
        let msg = run_task(&svc, Task::DeleteTank { generation: 1, id: TankId(2) }).await;
        let (_, _, outcome) = outcome(msg);
        assert!(matches!(outcome, TaskOutcome::Failed(ref m) if m == "Failed to delete tank"));
    }

    #[tokio::test]
    async fn test_auth_failure_is_not_retried() {
        let svc = fake();
        svc.fail_next_auth(401);
        let msg = run_task(&svc, Task::LoadRacks { generation: 0 }).await;
        let (_, _, outcome) = outcome(msg);
        assert!(matches!(outcome, TaskOutcome::AuthFailed));
        assert_eq!(svc.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_execute_task_sends_completion() {
        let svc = fake();
        let (tx, mut rx) = mpsc::channel(4);
        execute_task(&svc, Task::LoadRacks { generation: 2 }, tx).await;
        let (generation, kind, _) = outcome(rx.recv().await.unwrap());
        assert_eq!(generation, 2);
        assert_eq!(kind, TaskKind::LoadRacks);
    }

    #[tokio::test]
    async fn test_execute_task_tolerates_closed_channel() {
        let svc = fake();
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        execute_task(&svc, Task::LoadRacks { generation: 2 }, tx).await;
    }
}
