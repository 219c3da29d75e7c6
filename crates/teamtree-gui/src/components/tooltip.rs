use eframe::egui;
use teamtree_core::{Member, NodeId};

/// Detail payload shown while hovering a member card.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipInfo {
    pub id: NodeId,
    pub member: Member,
}

/// Screen-space hover overlay.
///
/// The anchor is the raw pointer position relative to the canvas rect,
/// deliberately independent of the pan/zoom transform. Hiding clears
/// only the visibility flag; the last payload is retained until the
/// next hover begins so a fade-out never shows an empty bubble.
pub struct TooltipManager {
    info: Option<TooltipInfo>,
    position: egui::Pos2,
    visible: bool,
}

impl TooltipManager {
    pub fn new() -> Self {
        Self {
            info: None,
            position: egui::Pos2::ZERO,
            visible: false,
        }
    }

    /// Called on hover start and on every pointer move while hovering.
    pub fn show(&mut self, info: TooltipInfo, pos: egui::Pos2) {
        self.info = Some(info);
        self.position = pos;
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn info(&self) -> Option<&TooltipInfo> {
        self.info.as_ref()
    }

    pub fn ui(&self, ctx: &egui::Context, canvas_origin: egui::Pos2) {
        let Some(info) = &self.info else {
            return;
        };
        if !self.visible {
            return;
        }

        let pos = canvas_origin + self.position.to_vec2() + egui::vec2(14.0, 14.0);
        egui::Area::new(egui::Id::new("member_tooltip"))
            .fixed_pos(pos)
            .order(egui::Order::Tooltip)
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_max_width(260.0);
                    let name = if info.member.name.is_empty() {
                        "—"
                    } else {
                        &info.member.name
                    };
                    ui.label(egui::RichText::new(name).strong());
                    ui.separator();
                    egui::Grid::new("member_tooltip_grid")
                        .num_columns(2)
                        .spacing([12.0, 2.0])
                        .show(ui, |ui| {
                            row(ui, "ID", info.id.as_str());
                            row(ui, "Phone", &info.member.phone);
                            row(ui, "Email", &info.member.email);
                            row(ui, "Referral", &info.member.referral_code);
                            row(
                                ui,
                                "Total Investment",
                                &format!("{:.2}", info.member.metrics.total_investment),
                            );
                            row(
                                ui,
                                "Total Income",
                                &format!("{:.2}", info.member.metrics.total_income),
                            );
                            row(
                                ui,
                                "This Month",
                                &format!("{:.2}", info.member.metrics.this_month_income),
                            );
                        });
                });
            });
    }
}

impl Default for TooltipManager {
    fn default() -> Self {
        Self::new()
    }
}

fn row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.label(
        egui::RichText::new(label)
            .small()
            .color(ui.visuals().weak_text_color()),
    );
    let value = if value.is_empty() { "—" } else { value };
    ui.label(egui::RichText::new(value).small());
    ui.end_row();
}

#[cfg(test)]
mod tests {
    use super::*;
    use teamtree_core::Member;

    fn info(name: &str) -> TooltipInfo {
        TooltipInfo {
            id: NodeId::from("1"),
            member: Member {
                name: name.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_hide_retains_last_payload() {
        let mut tooltip = TooltipManager::new();
        tooltip.show(info("Alice"), egui::pos2(10.0, 20.0));
        assert!(tooltip.is_visible());

        tooltip.hide();
        assert!(!tooltip.is_visible());
        assert_eq!(tooltip.info().unwrap().member.name, "Alice");
    }

    #[test]
    fn test_next_hover_replaces_payload_and_position() {
        let mut tooltip = TooltipManager::new();
        tooltip.show(info("Alice"), egui::pos2(10.0, 20.0));
        tooltip.hide();

        tooltip.show(info("Bob"), egui::pos2(50.0, 60.0));
        assert!(tooltip.is_visible());
        assert_eq!(tooltip.info().unwrap().member.name, "Bob");
    }
}
