//! Control Panel Widget
//! Left side panel with the two equation editors, plot/export buttons and
//! the status line.

use crate::equations::{EquationFields, FormKind};
use egui::{Color32, ComboBox, RichText};

/// How the status line is colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Left side control panel with equation inputs and actions.
pub struct ControlPanel {
    pub first: EquationFields,
    pub second: EquationFields,
    pub auto_export: bool,
    pub export_enabled: bool,
    pub status: String,
    pub status_kind: StatusKind,
}

impl ControlPanel {
    pub fn new(first: EquationFields, second: EquationFields, auto_export: bool) -> Self {
        Self {
            first,
            second,
            auto_export,
            export_enabled: false,
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Line Graph Generator")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Equation Sections =====
        Self::equation_editor(ui, 1, &mut self.first);
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);
        Self::equation_editor(ui, 2, &mut self.second);

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Options =====
        ui.label(RichText::new("⚙️ Options").size(14.0).strong());
        ui.add_space(5.0);
        if ui
            .checkbox(&mut self.auto_export, "Export PDF after each plot")
            .changed()
        {
            action = ControlPanelAction::AutoExportChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("▶ Plot").size(16.0))
                .min_size(egui::vec2(200.0, 35.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::Plot;
            }

            ui.add_space(8.0);

            // Export buttons (enabled once a chart is shown)
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let pdf_button = egui::Button::new(RichText::new("📄 Export PDF").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(pdf_button).clicked() {
                    action = ControlPanelAction::ExportPdf;
                }

                ui.add_space(4.0);

                let png_button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(png_button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = match self.status_kind {
            StatusKind::Error => Color32::from_rgb(220, 53, 69),
            StatusKind::Success => Color32::from_rgb(40, 167, 69),
            StatusKind::Info => Color32::GRAY,
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Form selector plus the coefficient fields of the selected form.
    fn equation_editor(ui: &mut egui::Ui, index: usize, fields: &mut EquationFields) {
        let label_width = 110.0;
        let field_width = 150.0;

        ui.label(RichText::new(format!("Equation {}", index)).size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Form:"));
            ComboBox::from_id_salt(format!("form_{}", index))
                .width(field_width)
                .selected_text(fields.form.display_name())
                .show_ui(ui, |ui| {
                    for kind in FormKind::ALL {
                        ui.selectable_value(&mut fields.form, kind, kind.display_name());
                    }
                });
        });

        let hint = match fields.form {
            FormKind::Standard => "ax + by = c",
            FormKind::SlopeIntercept => "y = mx + b",
        };
        ui.label(RichText::new(hint).size(11.0).italics().color(Color32::GRAY));
        ui.add_space(4.0);

        let row = |ui: &mut egui::Ui, label: String, value: &mut String| {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new(label));
                ui.add(egui::TextEdit::singleline(value).desired_width(field_width));
            });
        };

        match fields.form {
            FormKind::Standard => {
                row(ui, format!("A{}:", index), &mut fields.a);
                row(ui, format!("B{}:", index), &mut fields.b);
                row(ui, format!("C{}:", index), &mut fields.c);
            }
            FormKind::SlopeIntercept => {
                row(ui, format!("Slope (m{}):", index), &mut fields.m);
                row(ui, format!("Y-intercept (b{}):", index), &mut fields.intercept);
            }
        }
    }

    /// Set status line text
    pub fn set_status(&mut self, kind: StatusKind, status: &str) {
        self.status_kind = kind;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Plot,
    ExportPdf,
    ExportPng,
    AutoExportChanged,
}
