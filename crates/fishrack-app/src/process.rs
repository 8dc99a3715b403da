//! Message processing
//!
//! Runs a message through the TEA update function, following up on any
//! returned message and dispatching returned actions.

use std::sync::Arc;

use tokio::sync::mpsc;

use fishrack_api::TankService;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<S>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    service: &Arc<S>,
) where
    S: TankService + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), service.clone());
        }

        msg = result.message;
    }
}
