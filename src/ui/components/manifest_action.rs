// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Confirm → request → report cycle shared by the verify and delete buttons.
//!
//! Each button owns an [`ActionModel`]. Transitions are pure; the network call
//! is emitted as an [`ActionCommand`] and its result comes back as
//! [`ActionMsg::Settled`].

use eframe::egui;

use crate::api::{ActionOutcome, ManifestApi, Transport};
use crate::models::manifest::ManifestId;

/// Which server action a button triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Verify,
    Delete,
}

impl ActionKind {
    pub fn confirm_title(self) -> &'static str {
        match self {
            ActionKind::Verify => "Verify manifest",
            ActionKind::Delete => "Delete manifest",
        }
    }

    pub fn confirm_prompt(self, id: &ManifestId) -> String {
        match self {
            ActionKind::Verify => format!("Verify manifest {id} now?"),
            ActionKind::Delete => format!(
                "Are you sure you want to delete manifest {id}?\n\nThis action cannot be undone."
            ),
        }
    }

    /// Icon shown while the control is enabled.
    pub fn idle_icon(self) -> &'static str {
        match self {
            ActionKind::Verify => egui_phosphor::regular::ARROWS_CLOCKWISE,
            ActionKind::Delete => egui_phosphor::regular::TRASH,
        }
    }

    pub fn hover_text(self) -> &'static str {
        match self {
            ActionKind::Verify => "Verify now",
            ActionKind::Delete => "Delete",
        }
    }

    /// Alert text for a settled request and whether the list must be reloaded.
    pub fn report(self, outcome: &ActionOutcome) -> (String, bool) {
        match (self, outcome) {
            (ActionKind::Verify, ActionOutcome::Succeeded { message }) => (
                format!(
                    "Verification completed successfully!\n\n{}",
                    message.as_deref().unwrap_or_default()
                ),
                true,
            ),
            (ActionKind::Delete, ActionOutcome::Succeeded { .. }) => {
                ("Manifest deleted successfully!".into(), true)
            }
            (ActionKind::Verify, ActionOutcome::Failed { error }) => {
                (format!("Verification failed: {error}"), false)
            }
            (ActionKind::Delete, ActionOutcome::Failed { error }) => {
                (format!("Delete failed: {error}"), false)
            }
            (ActionKind::Verify, ActionOutcome::Errored { reason }) => {
                (format!("Error verifying manifest: {reason}"), false)
            }
            (ActionKind::Delete, ActionOutcome::Errored { reason }) => {
                (format!("Error deleting manifest: {reason}"), false)
            }
        }
    }
}

/// Interaction state of a single button.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Idle,
    /// Confirmation dialog is open.
    Confirming,
    /// Request in flight; the control is disabled.
    Pending,
}

/// How the previous cycle ended, kept for the hover text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LastResult {
    Succeeded,
    Failed,
    Errored,
}

/// Per-button model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionModel {
    kind: ActionKind,
    id: ManifestId,
    state: ActionState,
    last: Option<LastResult>,
}

/// Messages driving an action button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionMsg {
    Clicked,
    Confirmed,
    Declined,
    Settled(ActionOutcome),
}

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionCommand {
    Send { kind: ActionKind, id: ManifestId },
}

/// User-facing feedback for a settled request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionEvent {
    /// Text shown in the blocking alert.
    pub message: String,
    pub is_error: bool,
    /// Whether the manifest list must be fetched again.
    pub reload: bool,
}

impl ActionModel {
    pub fn new(kind: ActionKind, id: ManifestId) -> Self {
        Self {
            kind,
            id,
            state: ActionState::Idle,
            last: None,
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn id(&self) -> &ManifestId {
        &self.id
    }

    pub fn state(&self) -> ActionState {
        self.state
    }

    pub fn last_result(&self) -> Option<LastResult> {
        self.last
    }

    pub fn is_busy(&self) -> bool {
        self.state == ActionState::Pending
    }
}

/// Pure transition table. Returns the next state and whether to send the request.
///
/// Messages that do not apply to the current state leave it unchanged, which
/// also rejects a second click while a request is pending.
pub fn transition(state: ActionState, msg: &ActionMsg) -> (ActionState, bool) {
    match (state, msg) {
        (ActionState::Idle, ActionMsg::Clicked) => (ActionState::Confirming, false),
        (ActionState::Confirming, ActionMsg::Declined) => (ActionState::Idle, false),
        (ActionState::Confirming, ActionMsg::Confirmed) => (ActionState::Pending, true),
        (ActionState::Pending, ActionMsg::Settled(_)) => (ActionState::Idle, false),
        (state, _) => (state, false),
    }
}

/// Apply a message, pushing the request command when one is due.
pub fn update(
    model: &mut ActionModel,
    msg: ActionMsg,
    cmds: &mut Vec<ActionCommand>,
) -> Option<ActionEvent> {
    let (next, send) = transition(model.state, &msg);
    let settled = model.state == ActionState::Pending && next == ActionState::Idle;
    model.state = next;

    if send {
        cmds.push(ActionCommand::Send {
            kind: model.kind,
            id: model.id.clone(),
        });
    }

    match msg {
        ActionMsg::Settled(outcome) if settled => {
            model.last = Some(match outcome {
                ActionOutcome::Succeeded { .. } => LastResult::Succeeded,
                ActionOutcome::Failed { .. } => LastResult::Failed,
                ActionOutcome::Errored { .. } => LastResult::Errored,
            });
            let (message, reload) = model.kind.report(&outcome);
            Some(ActionEvent {
                message,
                is_error: !reload,
                reload,
            })
        }
        _ => None,
    }
}

/// Run the request for a command. Always returns an outcome, never panics.
pub fn execute<T: Transport>(
    api: &ManifestApi<T>,
    kind: ActionKind,
    id: &ManifestId,
) -> ActionOutcome {
    let outcome = match kind {
        ActionKind::Verify => ActionOutcome::from(api.verify(id)),
        ActionKind::Delete => ActionOutcome::from(api.delete(id)),
    };
    match &outcome {
        ActionOutcome::Succeeded { .. } => tracing::info!(?kind, %id, "action succeeded"),
        ActionOutcome::Failed { error } => tracing::warn!(?kind, %id, %error, "action rejected"),
        ActionOutcome::Errored { reason } => tracing::error!(?kind, %id, %reason, "action errored"),
    }
    outcome
}

/// Render the button; disabled with a busy icon while pending.
pub fn view(ui: &mut egui::Ui, model: &ActionModel) -> Vec<ActionMsg> {
    let mut msgs = Vec::new();

    if model.is_busy() {
        ui.add_enabled(false, egui::Button::new(egui_phosphor::regular::CIRCLE_NOTCH))
            .on_disabled_hover_text("Working…");
        ui.add(egui::Spinner::new().size(12.0));
        return msgs;
    }

    let hover = match model.last {
        Some(LastResult::Failed) => format!("{} (last attempt failed)", model.kind.hover_text()),
        Some(LastResult::Errored) => format!("{} (last attempt errored)", model.kind.hover_text()),
        _ => model.kind.hover_text().to_string(),
    };

    if ui
        .button(model.kind.idle_icon())
        .on_hover_text(hover)
        .clicked()
    {
        msgs.push(ActionMsg::Clicked);
    }

    msgs
}

/// Render the confirmation modal for a button in [`ActionState::Confirming`].
pub fn confirm_view(ctx: &egui::Context, model: &ActionModel) -> Vec<ActionMsg> {
    let mut msgs = Vec::new();
    if model.state != ActionState::Confirming {
        return msgs;
    }

    let response = egui::Modal::new(egui::Id::new("confirm_action")).show(ctx, |ui| {
        ui.heading(model.kind.confirm_title());
        ui.add_space(4.0);
        ui.label(model.kind.confirm_prompt(&model.id));
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("OK").clicked() {
                msgs.push(ActionMsg::Confirmed);
            }
            if ui.button("Cancel").clicked() {
                msgs.push(ActionMsg::Declined);
            }
        });
    });
    // Escape or a click on the backdrop counts as Cancel.
    if msgs.is_empty() && response.should_close() {
        msgs.push(ActionMsg::Declined);
    }

    msgs
}
