// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Access-key input with live sanitizing, status message and digit counter.

use eframe::egui;

use crate::models::access_key::{self, ACCESS_KEY_LEN, KeyShape};

/// Visual marker on the input field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldMark {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

/// Style of the secondary "N/44 digits" counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterStyle {
    #[default]
    Muted,
    Success,
}

/// UI model for the access-key field. Always holds a sanitized value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessKeyModel {
    value: String,
    mark: FieldMark,
    message: String,
    counter_style: CounterStyle,
}

impl Default for AccessKeyModel {
    fn default() -> Self {
        let mut model = Self {
            value: String::new(),
            mark: FieldMark::Neutral,
            message: String::new(),
            counter_style: CounterStyle::Muted,
        };
        refresh_status(&mut model);
        model
    }
}

/// Messages emitted by the access-key view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessKeyMsg {
    /// Raw text as typed or pasted, before sanitizing.
    InputChanged(String),
}

impl AccessKeyModel {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn mark(&self) -> FieldMark {
        self.mark
    }

    /// Status line shown under the field.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Secondary counter text, e.g. `4/44 digits`.
    pub fn counter_text(&self) -> String {
        format!("{}/{ACCESS_KEY_LEN} digits", self.value.len())
    }

    pub fn counter_style(&self) -> CounterStyle {
        self.counter_style
    }
}

/// Apply a message to the model.
pub fn update(model: &mut AccessKeyModel, msg: AccessKeyMsg) {
    match msg {
        AccessKeyMsg::InputChanged(raw) => {
            model.value = access_key::sanitize(&raw);
            refresh_status(model);
        }
    }
}

/// Recompute marker, status line and counter style from the current value.
fn refresh_status(model: &mut AccessKeyModel) {
    match access_key::classify(&model.value) {
        KeyShape::Complete => {
            model.mark = FieldMark::Valid;
            model.message = "Access key is valid!".into();
        }
        KeyShape::Incomplete { len, remaining } => {
            model.mark = FieldMark::Invalid;
            model.message = format!("{remaining} digits missing ({len}/{ACCESS_KEY_LEN})");
        }
        KeyShape::Empty => {
            model.mark = FieldMark::Neutral;
            model.message =
                format!("The access key must contain exactly {ACCESS_KEY_LEN} numeric digits");
        }
    }

    model.counter_style = if model.value.len() == ACCESS_KEY_LEN {
        CounterStyle::Success
    } else {
        CounterStyle::Muted
    };
}

/// Render the access-key field and return messages for edits.
pub fn view(ui: &mut egui::Ui, model: &AccessKeyModel) -> Vec<AccessKeyMsg> {
    let mut msgs = Vec::new();

    ui.label("Access key (chave de acesso)");
    ui.add_space(4.0);

    let mut buffer = model.value.clone();
    let stroke_color = match model.mark {
        FieldMark::Valid => Some(egui::Color32::from_rgb(25, 135, 84)),
        FieldMark::Invalid => Some(egui::Color32::from_rgb(220, 53, 69)),
        FieldMark::Neutral => None,
    };

    let response = egui::Frame::new()
        .stroke(stroke_color.map_or(egui::Stroke::NONE, |c| egui::Stroke::new(1.5, c)))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut buffer)
                    .hint_text("44 numeric digits")
                    .desired_width(f32::INFINITY)
                    .font(egui::TextStyle::Monospace),
            )
        })
        .inner;

    if response.changed() {
        msgs.push(AccessKeyMsg::InputChanged(buffer));
    }

    ui.horizontal(|ui| {
        let (icon, color) = match model.mark {
            FieldMark::Valid => (
                Some(egui_phosphor::regular::CHECK_CIRCLE),
                egui::Color32::from_rgb(25, 135, 84),
            ),
            FieldMark::Invalid => (
                Some(egui_phosphor::regular::WARNING_CIRCLE),
                egui::Color32::from_rgb(220, 53, 69),
            ),
            FieldMark::Neutral => (None, egui::Color32::from_gray(110)),
        };
        let text = match icon {
            Some(icon) => format!("{icon} {}", model.message),
            None => model.message.clone(),
        };
        ui.label(egui::RichText::new(text).small().color(color));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let counter_color = match model.counter_style {
                CounterStyle::Success => egui::Color32::from_rgb(25, 135, 84),
                CounterStyle::Muted => egui::Color32::from_gray(110),
            };
            ui.label(
                egui::RichText::new(model.counter_text())
                    .small()
                    .color(counter_color),
            );
        });
    });

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> AccessKeyModel {
        let mut model = AccessKeyModel::default();
        update(&mut model, AccessKeyMsg::InputChanged(text.into()));
        model
    }

    #[test]
    fn default_model_shows_helper_text() {
        let model = AccessKeyModel::default();
        assert_eq!(model.mark(), FieldMark::Neutral);
        assert!(model.message().contains("exactly 44"));
        assert_eq!(model.counter_text(), "0/44 digits");
    }

    #[test]
    fn mixed_input_is_filtered_and_counted() {
        let model = typed("12ab34");

        assert_eq!(model.value(), "1234");
        assert_eq!(model.counter_text(), "4/44 digits");
        assert_eq!(model.counter_style(), CounterStyle::Muted);
        assert_eq!(model.mark(), FieldMark::Invalid);
        assert_eq!(model.message(), "40 digits missing (4/44)");
    }

    #[test]
    fn forty_four_digits_mark_the_field_valid() {
        let model = typed(&"1".repeat(44));

        assert_eq!(model.mark(), FieldMark::Valid);
        assert_eq!(model.message(), "Access key is valid!");
        assert_eq!(model.counter_style(), CounterStyle::Success);
    }

    #[test]
    fn pasting_excess_digits_truncates_to_a_valid_key() {
        let pasted = format!("NFe {} extra 999", "5".repeat(44));
        let model = typed(&pasted);

        assert_eq!(model.value(), "5".repeat(44));
        assert_eq!(model.mark(), FieldMark::Valid);
    }

    #[test]
    fn clearing_the_field_removes_markers() {
        let mut model = typed("123");
        update(&mut model, AccessKeyMsg::InputChanged("abc".into()));

        assert_eq!(model.value(), "");
        assert_eq!(model.mark(), FieldMark::Neutral);
        assert_eq!(model.counter_style(), CounterStyle::Muted);
    }

    #[test]
    fn remaining_count_matches_length_for_every_partial_key() {
        for len in 1..ACCESS_KEY_LEN {
            let model = typed(&"7".repeat(len));
            let expected = format!("{} digits missing ({len}/44)", ACCESS_KEY_LEN - len);
            assert_eq!(model.message(), expected);
        }
    }
}
