//! Confirmation gate and confirm dialog state.
//!
//! Destructive operations ask a [`ConfirmationGate`] first. A gate may answer
//! immediately or defer to a modal dialog whose options carry the message to
//! dispatch when chosen.

use std::fmt::Debug;

use crate::message::Message;

/// Answer of a confirmation gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Approved,
    Denied,
    /// Ask the user through a confirm dialog
    Deferred,
}

/// Decides whether a destructive operation may proceed
pub trait ConfirmationGate: Debug + Send + Sync {
    fn check(&self, prompt: &str) -> GateDecision;
}

/// Always ask the user
#[derive(Debug, Default)]
pub struct ModalGate;

impl ConfirmationGate for ModalGate {
    fn check(&self, _prompt: &str) -> GateDecision {
        GateDecision::Deferred
    }
}

/// Never ask
#[derive(Debug, Default)]
pub struct AutoApprove;

impl ConfirmationGate for AutoApprove {
    fn check(&self, _prompt: &str) -> GateDecision {
        GateDecision::Approved
    }
}

/// Fixed answer, mostly for tests
#[derive(Debug)]
pub struct FixedGate(pub GateDecision);

impl ConfirmationGate for FixedGate {
    fn check(&self, _prompt: &str) -> GateDecision {
        self.0
    }
}

/// Data model for a modal confirmation dialog
#[derive(Debug, Clone)]
pub struct ConfirmDialogState {
    pub title: String,
    pub message: String,
    pub options: Vec<(String, Message)>,
    pub selected: usize,
}

impl ConfirmDialogState {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        options: Vec<(&str, Message)>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            options: options
                .into_iter()
                .map(|(label, msg)| (label.to_string(), msg))
                .collect(),
            selected: 0,
        }
    }

    pub fn select_next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + self.options.len() - 1) % self.options.len();
        }
    }

    /// Message of the highlighted option
    pub fn selected_message(&self) -> Option<Message> {
        self.options.get(self.selected).map(|(_, msg)| msg.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_wraps() {
        let mut dialog = ConfirmDialogState::new(
            "Delete",
            "Sure?",
            vec![("Delete", Message::Refresh), ("Cancel", Message::CancelConfirm)],
        );
        assert!(matches!(dialog.selected_message(), Some(Message::Refresh)));
        dialog.select_next();
        assert!(matches!(dialog.selected_message(), Some(Message::CancelConfirm)));
        dialog.select_next();
        assert_eq!(dialog.selected, 0);
        dialog.select_previous();
        assert_eq!(dialog.selected, 1);
    }

    #[test]
    fn test_gates() {
        assert_eq!(ModalGate.check("x"), GateDecision::Deferred);
        assert_eq!(AutoApprove.check("x"), GateDecision::Approved);
        assert_eq!(FixedGate(GateDecision::Denied).check("x"), GateDecision::Denied);
    }
}
