// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Manifest table with per-row verify/delete actions and client-side filters.

use eframe::egui;

use crate::models::manifest::{Manifest, ManifestId, ManifestStatus};
use crate::ui::components::manifest_action::{
    self, ActionCommand, ActionKind, ActionModel, ActionMsg,
};

/// A table row plus the state of its two buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestRow {
    pub manifest: Manifest,
    pub verify: ActionModel,
    pub delete: ActionModel,
}

impl ManifestRow {
    fn new(manifest: Manifest) -> Self {
        let verify = ActionModel::new(ActionKind::Verify, manifest.id.clone());
        let delete = ActionModel::new(ActionKind::Delete, manifest.id.clone());
        Self {
            manifest,
            verify,
            delete,
        }
    }

    fn action_mut(&mut self, kind: ActionKind) -> &mut ActionModel {
        match kind {
            ActionKind::Verify => &mut self.verify,
            ActionKind::Delete => &mut self.delete,
        }
    }
}

/// MVU state for the manifest table.
#[derive(Clone, Debug, Default)]
pub struct ManifestsModel {
    rows: Vec<ManifestRow>,
    search: String,
    status_filter: Option<ManifestStatus>,
    loading: bool,
    /// A reload was asked for while a load was in flight.
    reload_queued: bool,
    loaded_once: bool,
}

/// Messages emitted by the table view or by finished commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestsMsg {
    ReloadRequested,
    Loaded(Result<Vec<Manifest>, String>),
    SearchChanged(String),
    StatusFilterChanged(Option<ManifestStatus>),
    Action {
        id: ManifestId,
        kind: ActionKind,
        msg: ActionMsg,
    },
}

/// Side effects requested by the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestsCommand {
    LoadList,
    Action(ActionCommand),
}

/// User-facing feedback for the status bar or the blocking alert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestsEvent {
    pub message: String,
    pub is_error: bool,
    /// Show in the blocking alert rather than only the status bar.
    pub alert: bool,
}

impl ManifestsModel {
    pub fn rows(&self) -> &[ManifestRow] {
        &self.rows
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Rows passing the current search and status filter.
    pub fn visible_rows(&self) -> impl Iterator<Item = &ManifestRow> {
        self.rows.iter().filter(|row| {
            row.manifest.matches_search(&self.search)
                && self
                    .status_filter
                    .as_ref()
                    .is_none_or(|status| &row.manifest.status == status)
        })
    }

    /// The button whose confirmation dialog is open, if any.
    pub fn confirming(&self) -> Option<&ActionModel> {
        self.rows
            .iter()
            .flat_map(|row| [&row.verify, &row.delete])
            .find(|action| action.state() == manifest_action::ActionState::Confirming)
    }

    fn row_mut(&mut self, id: &ManifestId) -> Option<&mut ManifestRow> {
        self.rows.iter_mut().find(|row| &row.manifest.id == id)
    }
}

/// Apply a message to the table model. Returns feedback when relevant.
pub fn update(
    model: &mut ManifestsModel,
    msg: ManifestsMsg,
    cmds: &mut Vec<ManifestsCommand>,
) -> Option<ManifestsEvent> {
    match msg {
        ManifestsMsg::ReloadRequested => {
            request_reload(model, cmds);
            None
        }
        ManifestsMsg::Loaded(Ok(manifests)) => {
            finish_load(model, cmds);
            model.loaded_once = true;
            replace_rows(model, manifests);
            Some(ManifestsEvent {
                message: format!("Loaded {} manifest(s).", model.rows.len()),
                is_error: false,
                alert: false,
            })
        }
        ManifestsMsg::Loaded(Err(err)) => {
            finish_load(model, cmds);
            Some(ManifestsEvent {
                message: format!("Failed to load manifests: {err}"),
                is_error: true,
                alert: false,
            })
        }
        ManifestsMsg::SearchChanged(text) => {
            model.search = text;
            None
        }
        ManifestsMsg::StatusFilterChanged(status) => {
            model.status_filter = status;
            None
        }
        ManifestsMsg::Action { id, kind, msg } => {
            if msg == ActionMsg::Clicked && model.confirming().is_some() {
                tracing::debug!(%id, ?kind, "click ignored while a confirmation is open");
                return None;
            }
            let Some(row) = model.row_mut(&id) else {
                // Row vanished in a reload while its request was in flight.
                tracing::debug!(%id, ?kind, "action message for unknown row dropped");
                return None;
            };

            let mut action_cmds = Vec::new();
            let event = manifest_action::update(row.action_mut(kind), msg, &mut action_cmds);
            cmds.extend(action_cmds.into_iter().map(ManifestsCommand::Action));

            let event = event?;
            if event.reload {
                request_reload(model, cmds);
            }
            Some(ManifestsEvent {
                message: event.message,
                is_error: event.is_error,
                alert: true,
            })
        }
    }
}

/// Start a load, or queue one if a load is already in flight.
///
/// A load in flight may have been served before the change that asked for
/// the reload, so it cannot stand in for it.
fn request_reload(model: &mut ManifestsModel, cmds: &mut Vec<ManifestsCommand>) {
    if model.loading {
        model.reload_queued = true;
    } else {
        model.loading = true;
        cmds.push(ManifestsCommand::LoadList);
    }
}

fn finish_load(model: &mut ManifestsModel, cmds: &mut Vec<ManifestsCommand>) {
    model.loading = false;
    if std::mem::take(&mut model.reload_queued) {
        request_reload(model, cmds);
    }
}

/// Swap in a fresh list, keeping button state for rows that survive.
fn replace_rows(model: &mut ManifestsModel, manifests: Vec<Manifest>) {
    let mut previous = std::mem::take(&mut model.rows);
    model.rows = manifests
        .into_iter()
        .map(|manifest| {
            match previous
                .iter()
                .position(|row| row.manifest.id == manifest.id)
            {
                Some(pos) => {
                    let mut row = previous.swap_remove(pos);
                    row.manifest = manifest;
                    row
                }
                None => ManifestRow::new(manifest),
            }
        })
        .collect();
}

/// Render filters and the table; return messages for user interaction.
pub fn view(ui: &mut egui::Ui, model: &ManifestsModel) -> Vec<ManifestsMsg> {
    let mut msgs = Vec::new();

    ui.horizontal(|ui| {
        ui.label(egui_phosphor::regular::MAGNIFYING_GLASS);
        let mut search = model.search.clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut search)
                    .hint_text("Purchase order or invoice")
                    .desired_width(220.0),
            )
            .changed()
        {
            msgs.push(ManifestsMsg::SearchChanged(search));
        }

        ui.separator();
        let mut filter = model.status_filter.clone();
        let selected_label = filter
            .as_ref()
            .map_or("All statuses", |status| status.label())
            .to_string();
        egui::ComboBox::from_id_salt("status_filter")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter, None, "All statuses");
                for status in ManifestStatus::known() {
                    let label = status.label().to_string();
                    ui.selectable_value(&mut filter, Some(status), label);
                }
            });
        if filter != model.status_filter {
            msgs.push(ManifestsMsg::StatusFilterChanged(filter));
        }
    });

    ui.add_space(8.0);

    if model.rows.is_empty() {
        let text = if model.loading || !model.loaded_once {
            "Loading manifests…"
        } else {
            "No manifests found."
        };
        ui.label(
            egui::RichText::new(text)
                .italics()
                .color(egui::Color32::from_gray(110)),
        );
        return msgs;
    }

    egui::Grid::new("manifests_grid")
        .num_columns(6)
        .striped(true)
        .spacing(egui::vec2(12.0, 6.0))
        .show(ui, |ui| {
            ui.strong("ID");
            ui.strong("Purchase order");
            ui.strong("Invoice");
            ui.strong("Access key");
            ui.strong("Status");
            ui.strong("Actions");
            ui.end_row();

            for row in model.visible_rows() {
                let m = &row.manifest;
                ui.label(m.id.as_str());
                ui.label(m.pedido_compra.as_str());
                ui.label(m.nota_fiscal.as_str());
                ui.label(egui::RichText::new(m.chave_acesso.as_str()).monospace().small());
                ui.label(m.status.label());
                ui.horizontal(|ui| {
                    for action in [&row.verify, &row.delete] {
                        let action_msgs = manifest_action::view(ui, action);
                        msgs.extend(action_msgs.into_iter().map(|msg| ManifestsMsg::Action {
                            id: action.id().clone(),
                            kind: action.kind(),
                            msg,
                        }));
                    }
                });
                ui.end_row();
            }
        });

    msgs
}

/// Render the confirmation modal for whichever button is confirming.
pub fn confirm_view(ctx: &egui::Context, model: &ManifestsModel) -> Vec<ManifestsMsg> {
    let Some(action) = model.confirming() else {
        return Vec::new();
    };
    manifest_action::confirm_view(ctx, action)
        .into_iter()
        .map(|msg| ManifestsMsg::Action {
            id: action.id().clone(),
            kind: action.kind(),
            msg,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ActionOutcome;

    fn manifest(id: &str, order: &str, status: &str) -> Manifest {
        Manifest {
            id: ManifestId::new(id),
            pedido_compra: order.into(),
            nota_fiscal: format!("NF{id}"),
            chave_acesso: "1".repeat(44),
            status: ManifestStatus::from_code(status),
        }
    }

    fn loaded(manifests: Vec<Manifest>) -> ManifestsModel {
        let mut model = ManifestsModel::default();
        let mut cmds = Vec::new();
        update(&mut model, ManifestsMsg::ReloadRequested, &mut cmds);
        update(&mut model, ManifestsMsg::Loaded(Ok(manifests)), &mut cmds);
        model
    }

    fn action(id: &str, kind: ActionKind, msg: ActionMsg) -> ManifestsMsg {
        ManifestsMsg::Action {
            id: ManifestId::new(id),
            kind,
            msg,
        }
    }

    fn load_requests(cmds: &[ManifestsCommand]) -> usize {
        cmds.iter()
            .filter(|c| matches!(c, ManifestsCommand::LoadList))
            .count()
    }

    #[test]
    fn reload_is_not_requested_twice_while_loading() {
        let mut model = ManifestsModel::default();
        let mut cmds = Vec::new();

        update(&mut model, ManifestsMsg::ReloadRequested, &mut cmds);
        update(&mut model, ManifestsMsg::ReloadRequested, &mut cmds);
        update(&mut model, ManifestsMsg::ReloadRequested, &mut cmds);

        assert_eq!(cmds, vec![ManifestsCommand::LoadList]);
        assert!(model.is_loading());

        // Requests made during the load collapse into one follow-up load.
        update(&mut model, ManifestsMsg::Loaded(Ok(vec![])), &mut cmds);
        assert_eq!(load_requests(&cmds), 2);
        update(&mut model, ManifestsMsg::Loaded(Ok(vec![])), &mut cmds);
        assert_eq!(load_requests(&cmds), 2);
        assert!(!model.is_loading());
    }

    #[test]
    fn success_during_a_load_reloads_after_the_stale_list() {
        let mut model = loaded(vec![manifest("5", "100", "P")]);
        let mut cmds = Vec::new();
        update(&mut model, action("5", ActionKind::Delete, ActionMsg::Clicked), &mut cmds);
        update(&mut model, action("5", ActionKind::Delete, ActionMsg::Confirmed), &mut cmds);
        update(&mut model, ManifestsMsg::ReloadRequested, &mut cmds);
        assert_eq!(load_requests(&cmds), 1);

        update(
            &mut model,
            action(
                "5",
                ActionKind::Delete,
                ActionMsg::Settled(ActionOutcome::Succeeded { message: None }),
            ),
            &mut cmds,
        );
        assert_eq!(load_requests(&cmds), 1);

        // The in-flight list was read before the delete landed.
        update(
            &mut model,
            ManifestsMsg::Loaded(Ok(vec![manifest("5", "100", "P")])),
            &mut cmds,
        );
        assert_eq!(load_requests(&cmds), 2);
        assert!(model.is_loading());

        update(&mut model, ManifestsMsg::Loaded(Ok(vec![])), &mut cmds);
        assert_eq!(load_requests(&cmds), 2);
        assert!(model.rows().is_empty());
    }

    #[test]
    fn queued_reload_survives_a_failed_load() {
        let mut model = ManifestsModel::default();
        let mut cmds = Vec::new();

        update(&mut model, ManifestsMsg::ReloadRequested, &mut cmds);
        update(&mut model, ManifestsMsg::ReloadRequested, &mut cmds);
        update(&mut model, ManifestsMsg::Loaded(Err("timeout".into())), &mut cmds);

        assert_eq!(load_requests(&cmds), 2);
        assert!(model.is_loading());
    }

    #[test]
    fn second_click_is_ignored_while_a_confirmation_is_open() {
        let mut model = loaded(vec![manifest("1", "100", "P"), manifest("2", "200", "P")]);
        let mut cmds = Vec::new();

        update(&mut model, action("2", ActionKind::Delete, ActionMsg::Clicked), &mut cmds);
        update(&mut model, action("1", ActionKind::Delete, ActionMsg::Clicked), &mut cmds);
        update(&mut model, action("2", ActionKind::Verify, ActionMsg::Clicked), &mut cmds);

        let open = model.confirming().expect("confirmation expected");
        assert_eq!(open.id(), &ManifestId::new("2"));
        assert_eq!(open.kind(), ActionKind::Delete);
        assert_eq!(model.rows()[0].delete.state(), manifest_action::ActionState::Idle);
        assert_eq!(model.rows()[1].verify.state(), manifest_action::ActionState::Idle);

        update(&mut model, action("2", ActionKind::Delete, ActionMsg::Confirmed), &mut cmds);
        assert_eq!(
            cmds,
            vec![ManifestsCommand::Action(ActionCommand::Send {
                kind: ActionKind::Delete,
                id: ManifestId::new("2"),
            })]
        );
    }

    #[test]
    fn load_failure_keeps_previous_rows() {
        let mut model = loaded(vec![manifest("1", "100", "P")]);
        let mut cmds = Vec::new();

        update(&mut model, ManifestsMsg::ReloadRequested, &mut cmds);
        let event = update(
            &mut model,
            ManifestsMsg::Loaded(Err("timeout".into())),
            &mut cmds,
        )
        .expect("event expected");

        assert!(event.is_error);
        assert!(!event.alert);
        assert_eq!(model.rows().len(), 1);
        assert!(!model.is_loading());
    }

    #[test]
    fn verify_success_alerts_and_reloads_once() {
        let mut model = loaded(vec![manifest("77", "100", "P")]);
        let mut cmds = Vec::new();

        update(&mut model, action("77", ActionKind::Verify, ActionMsg::Clicked), &mut cmds);
        update(&mut model, action("77", ActionKind::Verify, ActionMsg::Confirmed), &mut cmds);
        let event = update(
            &mut model,
            action(
                "77",
                ActionKind::Verify,
                ActionMsg::Settled(ActionOutcome::Succeeded {
                    message: Some("ok".into()),
                }),
            ),
            &mut cmds,
        )
        .expect("event expected");

        assert!(event.alert);
        assert!(event.message.contains("ok"));
        assert_eq!(load_requests(&cmds), 1);
    }

    #[test]
    fn declined_delete_issues_no_command() {
        let mut model = loaded(vec![manifest("5", "100", "P")]);
        let mut cmds = Vec::new();

        update(&mut model, action("5", ActionKind::Delete, ActionMsg::Clicked), &mut cmds);
        assert!(model.confirming().is_some());
        update(&mut model, action("5", ActionKind::Delete, ActionMsg::Declined), &mut cmds);

        assert!(cmds.is_empty());
        assert!(model.confirming().is_none());
        assert_eq!(model.rows()[0].delete.state(), manifest_action::ActionState::Idle);
    }

    #[test]
    fn reload_preserves_pending_buttons_of_surviving_rows() {
        let mut model = loaded(vec![manifest("1", "100", "P"), manifest("2", "200", "P")]);
        let mut cmds = Vec::new();
        update(&mut model, action("2", ActionKind::Verify, ActionMsg::Clicked), &mut cmds);
        update(&mut model, action("2", ActionKind::Verify, ActionMsg::Confirmed), &mut cmds);

        update(&mut model, ManifestsMsg::ReloadRequested, &mut cmds);
        update(
            &mut model,
            ManifestsMsg::Loaded(Ok(vec![manifest("2", "200", "A")])),
            &mut cmds,
        );

        assert_eq!(model.rows().len(), 1);
        assert!(model.rows()[0].verify.is_busy());
        assert_eq!(model.rows()[0].manifest.status, ManifestStatus::Open);
    }

    #[test]
    fn settlement_for_removed_row_is_dropped() {
        let mut model = loaded(vec![]);
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            action(
                "9",
                ActionKind::Delete,
                ActionMsg::Settled(ActionOutcome::Succeeded { message: None }),
            ),
            &mut cmds,
        );

        assert!(event.is_none());
        assert!(cmds.is_empty());
    }

    #[test]
    fn filters_combine_search_and_status() {
        let mut model = loaded(vec![
            manifest("1", "000285847", "P"),
            manifest("2", "000285999", "A"),
            manifest("3", "000111111", "P"),
        ]);
        let mut cmds = Vec::new();

        update(&mut model, ManifestsMsg::SearchChanged("00028".into()), &mut cmds);
        update(
            &mut model,
            ManifestsMsg::StatusFilterChanged(Some(ManifestStatus::Pending)),
            &mut cmds,
        );

        let ids: Vec<_> = model
            .visible_rows()
            .map(|row| row.manifest.id.as_str().to_string())
            .collect();
        assert_eq!(ids, vec!["1"]);
    }
}
