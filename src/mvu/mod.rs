// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::collections::VecDeque;

use crate::api::{ManifestApi, NewManifest, Transport};
use crate::models::manifest::ManifestId;
use crate::ui::components::manifest_action::{self, ActionCommand, ActionKind, ActionMsg};
use crate::ui::components::manifest_form::{
    self, ManifestFormCommand, ManifestFormModel, ManifestFormMsg,
};
use crate::ui::components::manifests::{self, ManifestsCommand, ManifestsModel, ManifestsMsg};

/// Blocking message box shown until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    pub is_error: bool,
}

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// New-manifest form, including the access-key field.
    pub form: ManifestFormModel,
    /// Manifest table and its per-row buttons.
    pub manifests: ManifestsModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Alerts waiting to be acknowledged, oldest first.
    pub alerts: VecDeque<Alert>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    /// The alert currently on screen.
    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }
}

/// Application messages routed through the update function.
#[derive(Debug)]
pub enum Msg {
    Form(ManifestFormMsg),
    Manifests(ManifestsMsg),
    DismissAlert,
}

/// Commands represent side-effects executed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    LoadManifests,
    RunAction { kind: ActionKind, id: ManifestId },
    CreateManifest(NewManifest),
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Form(m) => {
            let mut form_cmds = Vec::new();
            if let Some(event) = manifest_form::update(&mut model.form, m, &mut form_cmds) {
                if event.reload {
                    update_manifests(model, ManifestsMsg::ReloadRequested, cmds);
                }
                push_alert(model, event.message.clone(), event.is_error);
                surface_event(model, event.message, event.is_error);
            }
            cmds.extend(form_cmds.into_iter().map(|c| match c {
                ManifestFormCommand::Create(new) => Command::CreateManifest(new),
            }));
        }
        Msg::DismissAlert => {
            model.alerts.pop_front();
        }
        Msg::Manifests(ManifestsMsg::Action {
            msg: ActionMsg::Clicked,
            ..
        }) if !model.alerts.is_empty() => {
            tracing::debug!("click ignored while an alert is open");
        }
        Msg::Manifests(m) => update_manifests(model, m, cmds),
    }
}

fn update_manifests(model: &mut AppModel, msg: ManifestsMsg, cmds: &mut Vec<Command>) {
    let mut table_cmds = Vec::new();
    if let Some(event) = manifests::update(&mut model.manifests, msg, &mut table_cmds) {
        if event.alert {
            push_alert(model, event.message.clone(), event.is_error);
        }
        surface_event(model, event.message, event.is_error);
    }
    for c in table_cmds {
        match c {
            ManifestsCommand::LoadList => cmds.push(Command::LoadManifests),
            ManifestsCommand::Action(ActionCommand::Send { kind, id }) => {
                cmds.push(Command::RunAction { kind, id })
            }
        }
    }
}

/// Execute a command on a worker thread and return the resulting message.
///
/// Every command yields exactly one message, so a pending button is always
/// released.
pub fn run_command<T: Transport>(cmd: Command, api: &ManifestApi<T>) -> Msg {
    match cmd {
        Command::LoadManifests => {
            let result = api.list().map_err(|err| {
                tracing::error!(error = %err, "failed to load manifests");
                err.to_string()
            });
            Msg::Manifests(ManifestsMsg::Loaded(result))
        }
        Command::RunAction { kind, id } => {
            let outcome = manifest_action::execute(api, kind, &id);
            Msg::Manifests(ManifestsMsg::Action {
                id,
                kind,
                msg: ActionMsg::Settled(outcome),
            })
        }
        Command::CreateManifest(new) => {
            Msg::Form(ManifestFormMsg::Submitted(manifest_form::execute(api, &new)))
        }
    }
}

/// Queue an alert behind any that are still on screen.
fn push_alert(model: &mut AppModel, message: String, is_error: bool) {
    model.alerts.push_back(Alert { message, is_error });
}

/// Update the status line, logging errors as they surface.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        tracing::warn!(%message, "surfaced error");
    }
    model.status = Some(message);
}
