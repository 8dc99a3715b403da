//! Main TUI runner - entry point and event loop

use std::sync::Arc;

use tokio::sync::mpsc;

use fishrack_api::TankService;
use fishrack_app::process::process_message;
use fishrack_app::{AppState, Message};
use fishrack_core::prelude::*;

use super::{event, render};

/// Run the TUI until the user quits.
///
/// `msg_tx`/`msg_rx` is the application message channel; the sender may
/// already be shared with collaborators (the session's auth-failure hook).
pub async fn run<S>(
    mut state: AppState,
    service: Arc<S>,
    msg_tx: mpsc::Sender<Message>,
    msg_rx: mpsc::Receiver<Message>,
) -> Result<()>
where
    S: TankService + Send + Sync + 'static,
{
    restore_terminal_on_panic();

    let mut term = ratatui::init();
    info!("fishrack TUI starting");

    // Initial rack list fetch
    process_message(&mut state, Message::Refresh, &msg_tx, &service);

    let result = run_loop(&mut term, &mut state, msg_rx, &msg_tx, &service);

    ratatui::restore();
    info!("fishrack TUI exiting");
    result
}

/// Chain a panic hook that leaves the alternate screen before the report is
/// printed
fn restore_terminal_on_panic() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        previous(info);
    }));
}

/// Main event loop
fn run_loop<S>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: &mpsc::Sender<Message>,
    service: &Arc<S>,
) -> Result<()>
where
    S: TankService + Send + Sync + 'static,
{
    while !state.should_quit() {
        // Completions from background tasks and the session hook
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, msg_tx, service);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            process_message(state, message, msg_tx, service);
        }
    }

    Ok(())
}
