// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the manifest page.
//! Handles layout, modals, and wiring to the command workers.

pub mod components;

use std::sync::Arc;

use eframe::egui;

use crate::api::{ManifestApi, Transport};
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::{manifest_form, manifests};
use crate::ui::components::manifests::ManifestsMsg;

/// Stateful egui application for creating, verifying and deleting manifests.
pub struct RomaneiosApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl RomaneiosApp {
    /// Spawn `workers` command threads sharing `api` and queue the first list load.
    pub fn new<T>(api: ManifestApi<T>, workers: usize) -> Self
    where
        T: Transport + 'static,
    {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let api = Arc::new(api);
        for worker in 0..workers.max(1) {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let api = Arc::clone(&api);
            std::thread::spawn(move || {
                tracing::debug!(worker, "command worker started");
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, api.as_ref());
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::default(),
            inbox: vec![Msg::Manifests(ManifestsMsg::ReloadRequested)],
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for RomaneiosApp {
    /// Required by eframe 0.34; all rendering happens in [`Self::update`],
    /// which the runtime still calls before `ui` each frame.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drives a single UI frame.
    ///
    /// Drains worker results into the inbox, applies every queued message to
    /// the model, dispatches resulting commands, then renders the panels and
    /// modals. Messages produced while rendering are processed next frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        let msgs = std::mem::take(&mut self.inbox);
        for msg in msgs {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                if self.cmd_tx.send(cmd).is_ok() {
                    self.model.pending_commands += 1;
                }
            }
        }

        // Keep repainting while workers are busy so results show up promptly.
        if self.model.pending_commands > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Romaneios");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                    ui.separator();
                    self.render_reload_button(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_confirm_modal(ctx);
        self.render_alert_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let form_msgs = manifest_form::view(ui, &self.model.form);
                    self.inbox.extend(form_msgs.into_iter().map(Msg::Form));
                });
                ui.add_space(12.0);

                egui::CollapsingHeader::new("Manifests")
                    .default_open(true)
                    .show(ui, |ui| {
                        let table_msgs = manifests::view(ui, &self.model.manifests);
                        self.inbox.extend(table_msgs.into_iter().map(Msg::Manifests));
                    });
            });
        });
    }
}

impl RomaneiosApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_reload_button(&mut self, ui: &mut egui::Ui) {
        let enabled = !self.model.manifests.is_loading();
        let button = egui::Button::new(format!(
            "{} Reload",
            egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE
        ));
        if ui
            .add_enabled(enabled, button)
            .on_disabled_hover_text("Loading…")
            .clicked()
        {
            self.inbox.push(Msg::Manifests(ManifestsMsg::ReloadRequested));
        }
    }

    /// Confirmation dialog for the button currently asking for it.
    fn render_confirm_modal(&mut self, ctx: &egui::Context) {
        let msgs = manifests::confirm_view(ctx, &self.model.manifests);
        self.inbox.extend(msgs.into_iter().map(Msg::Manifests));
    }

    /// Blocking alert with the result of a create/verify/delete request.
    ///
    /// Queued alerts are shown one at a time, oldest first.
    fn render_alert_modal(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.model.current_alert().cloned() else {
            return;
        };
        let waiting = self.model.alerts.len() - 1;
        let title = if alert.is_error { "Error" } else { "Done" };
        let response = egui::Modal::new(egui::Id::new("result_alert")).show(ctx, |ui| {
            ui.heading(title);
            ui.add_space(4.0);
            ui.label(alert.message);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let dismissed = ui.button("OK").clicked();
                if waiting > 0 {
                    ui.weak(format!("{waiting} more"));
                }
                dismissed
            })
            .inner
        });
        if response.inner || response.should_close() {
            self.inbox.push(Msg::DismissAlert);
        }
    }

    /// Render latest status message and the background work indicator.
    fn render_status(&self, ui: &mut egui::Ui) {
        let text = self.model.status.as_deref().unwrap_or("Ready.");
        let display = if self.model.pending_commands > 0 {
            format!("{}  ({} working…)", text, self.model.pending_commands)
        } else {
            text.to_string()
        };
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                    "{} request(s) in flight",
                    self.model.pending_commands
                ));
            }
        });
    }
}
