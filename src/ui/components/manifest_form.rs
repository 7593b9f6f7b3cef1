// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! New-manifest form: purchase order, invoice and the access-key field.

use eframe::egui;

use crate::api::{ActionOutcome, ManifestApi, NewManifest, Transport};
use crate::models::access_key::{self as key_rules, KeyShape};
use crate::ui::components::access_key::{self, AccessKeyModel, AccessKeyMsg};

/// MVU state for the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestFormModel {
    purchase_order: String,
    invoice: String,
    access_key: AccessKeyModel,
    submitting: bool,
}

/// Messages emitted by the form view or by the finished create request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestFormMsg {
    PurchaseOrderChanged(String),
    InvoiceChanged(String),
    AccessKey(AccessKeyMsg),
    Submit,
    Submitted(ActionOutcome),
}

/// Side effect requested by the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ManifestFormCommand {
    Create(NewManifest),
}

/// Feedback for a settled create request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestFormEvent {
    pub message: String,
    pub is_error: bool,
    /// Whether the manifest list must be fetched again.
    pub reload: bool,
}

impl ManifestFormModel {
    pub fn purchase_order(&self) -> &str {
        &self.purchase_order
    }

    pub fn invoice(&self) -> &str {
        &self.invoice
    }

    pub fn access_key(&self) -> &AccessKeyModel {
        &self.access_key
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Both text fields filled, a complete key, and no request in flight.
    pub fn can_submit(&self) -> bool {
        !self.submitting
            && !self.purchase_order.trim().is_empty()
            && !self.invoice.trim().is_empty()
            && key_rules::classify(self.access_key.value()) == KeyShape::Complete
    }

    fn to_request(&self) -> NewManifest {
        NewManifest {
            pedido_compra: self.purchase_order.trim().to_string(),
            nota_fiscal: self.invoice.trim().to_string(),
            chave_acesso: self.access_key.value().to_string(),
        }
    }
}

/// Apply a message to the form.
pub fn update(
    model: &mut ManifestFormModel,
    msg: ManifestFormMsg,
    cmds: &mut Vec<ManifestFormCommand>,
) -> Option<ManifestFormEvent> {
    match msg {
        ManifestFormMsg::PurchaseOrderChanged(text) => {
            model.purchase_order = text;
            None
        }
        ManifestFormMsg::InvoiceChanged(text) => {
            model.invoice = text;
            None
        }
        ManifestFormMsg::AccessKey(m) => {
            access_key::update(&mut model.access_key, m);
            None
        }
        ManifestFormMsg::Submit => {
            if model.can_submit() {
                model.submitting = true;
                cmds.push(ManifestFormCommand::Create(model.to_request()));
            }
            None
        }
        ManifestFormMsg::Submitted(outcome) => {
            if !model.submitting {
                return None;
            }
            model.submitting = false;
            Some(match outcome {
                ActionOutcome::Succeeded { .. } => {
                    let message = format!(
                        "Manifest for purchase order {} created.",
                        model.purchase_order.trim()
                    );
                    *model = ManifestFormModel::default();
                    ManifestFormEvent {
                        message,
                        is_error: false,
                        reload: true,
                    }
                }
                ActionOutcome::Failed { error } => ManifestFormEvent {
                    message: format!("Could not create manifest: {error}"),
                    is_error: true,
                    reload: false,
                },
                ActionOutcome::Errored { reason } => ManifestFormEvent {
                    message: format!("Error creating manifest: {reason}"),
                    is_error: true,
                    reload: false,
                },
            })
        }
    }
}

/// Run the create request for a command.
pub fn execute<T: Transport>(api: &ManifestApi<T>, manifest: &NewManifest) -> ActionOutcome {
    let outcome = ActionOutcome::from(api.create(manifest));
    match &outcome {
        ActionOutcome::Succeeded { message } => {
            tracing::info!(order = %manifest.pedido_compra, id = ?message, "manifest created")
        }
        ActionOutcome::Failed { error } => {
            tracing::warn!(order = %manifest.pedido_compra, %error, "create rejected")
        }
        ActionOutcome::Errored { reason } => {
            tracing::error!(order = %manifest.pedido_compra, %reason, "create errored")
        }
    }
    outcome
}

/// Render the form; submit stays disabled until every field is valid.
pub fn view(ui: &mut egui::Ui, model: &ManifestFormModel) -> Vec<ManifestFormMsg> {
    let mut msgs = Vec::new();

    ui.strong("New manifest");
    ui.add_space(4.0);

    egui::Grid::new("manifest_form_grid")
        .num_columns(2)
        .spacing(egui::vec2(12.0, 6.0))
        .show(ui, |ui| {
            ui.label("Purchase order");
            let mut order = model.purchase_order.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut order).desired_width(220.0))
                .changed()
            {
                msgs.push(ManifestFormMsg::PurchaseOrderChanged(order));
            }
            ui.end_row();

            ui.label("Invoice");
            let mut invoice = model.invoice.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut invoice).desired_width(220.0))
                .changed()
            {
                msgs.push(ManifestFormMsg::InvoiceChanged(invoice));
            }
            ui.end_row();
        });

    ui.add_space(6.0);
    msgs.extend(
        access_key::view(ui, &model.access_key)
            .into_iter()
            .map(ManifestFormMsg::AccessKey),
    );
    ui.add_space(6.0);

    ui.horizontal(|ui| {
        let label = format!("{} Create", egui_phosphor::regular::PLUS);
        if ui
            .add_enabled(model.can_submit(), egui::Button::new(label))
            .on_disabled_hover_text("Fill in purchase order, invoice and a 44-digit access key")
            .clicked()
        {
            msgs.push(ManifestFormMsg::Submit);
        }
        if model.submitting {
            ui.add(egui::Spinner::new().size(12.0));
        }
    });

    msgs
}
