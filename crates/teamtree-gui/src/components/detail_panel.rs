use crate::theme::{self, spacing};
use eframe::egui;
use egui_phosphor::regular as ph;
use teamtree_core::{Member, NodeId};

/// Side panel with the full details of the last clicked member.
pub struct DetailPanel {
    selected: Option<(NodeId, Member)>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self { selected: None }
    }

    pub fn select(&mut self, id: NodeId, member: Member) {
        self.selected = Some((id, member));
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&NodeId> {
        self.selected.as_ref().map(|(id, _)| id)
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.vertical(|ui| {
            if let Some((id, member)) = &self.selected {
                theme::card(ui, |ui| {
                    let name = if member.name.is_empty() {
                        "—"
                    } else {
                        member.name.as_str()
                    };
                    ui.heading(egui::RichText::new(name).color(ui.visuals().selection.bg_fill));
                    ui.add_space(spacing::ITEM_SPACING);

                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("ID:").color(ui.visuals().text_color()));
                        ui.label(
                            egui::RichText::new(id.as_str())
                                .color(ui.visuals().weak_text_color()),
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Referral:").color(ui.visuals().text_color()));
                        theme::badge(
                            ui,
                            or_dash(&member.referral_code),
                            ui.visuals().selection.bg_fill,
                        );
                    });
                    detail_row(ui, ph::PHONE, or_dash(&member.phone));
                    detail_row(ui, ph::ENVELOPE, or_dash(&member.email));
                });

                ui.add_space(spacing::SECTION_SPACING);
                ui.label(
                    egui::RichText::new("Earnings")
                        .small()
                        .color(ui.visuals().weak_text_color()),
                );
                ui.add_space(spacing::ITEM_SPACING);

                theme::card(ui, |ui| {
                    metric_row(ui, "Total Investment", member.metrics.total_investment);
                    metric_row(ui, "Total Income", member.metrics.total_income);
                    metric_row(ui, "This Month", member.metrics.this_month_income);
                });
            } else {
                theme::empty_state(
                    ui,
                    ph::USERS_THREE,
                    "No Selection",
                    "Click a member card to view details",
                );
            }
        });
    }
}

impl Default for DetailPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "—" } else { value }
}

fn detail_row(ui: &mut egui::Ui, icon: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(icon).color(ui.visuals().weak_text_color()));
        ui.label(value);
    });
}

fn metric_row(ui: &mut egui::Ui, label: &str, value: f64) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label).color(ui.visuals().text_color()));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                egui::RichText::new(format!("{value:.2}"))
                    .color(ui.visuals().strong_text_color()),
            );
        });
    });
}
