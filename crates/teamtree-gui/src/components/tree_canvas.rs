use eframe::egui;
use teamtree_core::NodeId;
use teamtree_layout::{
    CollapseSet, LayoutConfig, Point, TreeLayout, TreeModel, Viewport, elbow, wheel_zoom_factor,
};

use crate::components::tooltip::{TooltipInfo, TooltipManager};

// Responsibility checklist for the canvas:
// - Member cards with the expand/collapse affordance
// - Elbow connectors between parent and child cards
// - Wheel/pinch zoom anchored at the pointer, drag panning
// - Hover reporting for the screen-space tooltip overlay

pub struct CanvasInteraction {
    pub toggled: Option<NodeId>,
    pub clicked: Option<NodeId>,
    pub hovered: Option<NodeId>,
}

#[derive(Clone, Copy)]
struct DragState {
    last_pos: egui::Pos2,
}

pub struct TreeCanvas {
    drag_state: Option<DragState>,
}

impl TreeCanvas {
    pub fn new() -> Self {
        Self { drag_state: None }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        rect: egui::Rect,
        model: &TreeModel,
        layout: &TreeLayout,
        collapsed: &CollapseSet,
        config: &LayoutConfig,
        viewport: &mut Viewport,
        tooltip: &mut TooltipManager,
    ) -> CanvasInteraction {
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

        let mut toggled = None;
        let mut clicked = None;
        let mut hovered = None;

        self.handle_zoom(ui, &response, rect, viewport);
        self.handle_pan(&response, ui, viewport);

        let scale = viewport.scale;
        let to_screen = |p: Point| -> egui::Pos2 {
            let s = viewport.to_screen(p);
            egui::pos2(rect.min.x + s.x, rect.min.y + s.y)
        };

        let stroke = egui::Stroke::new(
            (2.0 * scale).max(0.5),
            ui.visuals().widgets.noninteractive.bg_stroke.color,
        );
        for link in &layout.links {
            let curve = elbow(link.from, link.to);
            let shape = egui::epaint::CubicBezierShape::from_points_stroke(
                [
                    to_screen(curve.from),
                    to_screen(curve.c1),
                    to_screen(curve.c2),
                    to_screen(curve.to),
                ],
                false,
                egui::Color32::TRANSPARENT,
                stroke,
            );
            painter.add(shape);
        }

        let card_size = egui::vec2(config.card_width * scale, config.card_height * scale);
        let mut card_rects: Vec<(usize, egui::Rect)> = Vec::with_capacity(layout.nodes.len());

        for (i, positioned) in layout.nodes.iter().enumerate() {
            let center = to_screen(Point::new(positioned.x, positioned.y));
            let card_rect = egui::Rect::from_center_size(center, card_size);
            if !rect.intersects(card_rect) {
                continue;
            }
            card_rects.push((i, card_rect));

            let node = &model[positioned.index];
            draw_member_card(ui, &painter, card_rect, node, scale);

            if !node.children.is_empty() {
                let is_collapsed = collapsed.is_collapsed(&node.id);
                let button_rect = collapse_button_rect(card_rect, scale);
                let button_id = ui.id().with(("collapse_button", &node.id));
                let button_response = ui.interact(button_rect, button_id, egui::Sense::click());
                draw_collapse_button(
                    ui,
                    &painter,
                    button_rect,
                    is_collapsed,
                    button_response.hovered(),
                    scale,
                );
                if button_response.clicked() {
                    toggled = Some(node.id.clone());
                }
            }
        }

        if let Some(pointer) = response.hover_pos() {
            // Later cards draw on top, so hit-test back to front.
            for (i, card_rect) in card_rects.iter().rev() {
                if card_rect.contains(pointer) {
                    let node = &model[layout.nodes[*i].index];
                    hovered = Some(node.id.clone());
                    // Raw screen-space anchor relative to the canvas,
                    // independent of the pan/zoom transform.
                    tooltip.show(
                        TooltipInfo {
                            id: node.id.clone(),
                            member: node.member.clone(),
                        },
                        egui::pos2(pointer.x - rect.min.x, pointer.y - rect.min.y),
                    );
                    break;
                }
            }
        }
        if hovered.is_none() {
            tooltip.hide();
        }

        if response.clicked() {
            clicked = hovered.clone();
        }

        CanvasInteraction {
            toggled,
            clicked,
            hovered,
        }
    }

    fn handle_zoom(
        &mut self,
        ui: &egui::Ui,
        response: &egui::Response,
        rect: egui::Rect,
        viewport: &mut Viewport,
    ) {
        if !response.hovered() {
            return;
        }
        let Some(pointer) = response.hover_pos() else {
            return;
        };
        let cursor = Point::new(pointer.x - rect.min.x, pointer.y - rect.min.y);

        // Pinch and ctrl+scroll arrive as a ready-made factor, a plain
        // wheel as a scroll delta run through the exponential rule.
        let pinch = ui.input(|i| i.zoom_delta());
        if (pinch - 1.0).abs() > f32::EPSILON {
            viewport.zoom_at(cursor, pinch);
            return;
        }
        let scroll_y = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_y != 0.0 {
            viewport.zoom_at(cursor, wheel_zoom_factor(-scroll_y));
        }
    }

    fn handle_pan(&mut self, response: &egui::Response, ui: &egui::Ui, viewport: &mut Viewport) {
        if response.drag_started()
            && let Some(pointer) = response.interact_pointer_pos()
        {
            self.drag_state = Some(DragState { last_pos: pointer });
        }
        if response.dragged()
            && let (Some(state), Some(pointer)) =
                (self.drag_state.as_mut(), response.interact_pointer_pos())
        {
            let delta = pointer - state.last_pos;
            viewport.pan_by(delta.x, delta.y);
            state.last_pos = pointer;
        }
        if self.drag_state.is_some() && ui.input(|i| !i.pointer.primary_down()) {
            self.drag_state = None;
        }
    }
}

impl Default for TreeCanvas {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_member_card(
    ui: &egui::Ui,
    painter: &egui::Painter,
    card_rect: egui::Rect,
    node: &teamtree_layout::TreeNode,
    scale: f32,
) {
    let visuals = ui.visuals();
    let radius = 8.0 * scale;
    painter.rect_filled(
        card_rect.translate(egui::vec2(2.0 * scale, 2.0 * scale)),
        radius,
        visuals.window_shadow.color,
    );
    painter.rect_filled(card_rect, radius, visuals.window_fill);
    painter.rect_stroke(
        card_rect,
        radius,
        visuals.window_stroke,
        egui::StrokeKind::Middle,
    );

    let left = card_rect.min.x + 10.0 * scale;
    let name = if node.member.name.is_empty() {
        "—"
    } else {
        &node.member.name
    };
    painter.text(
        egui::pos2(left, card_rect.min.y + 14.0 * scale),
        egui::Align2::LEFT_CENTER,
        name,
        egui::FontId::proportional(13.0 * scale),
        visuals.strong_text_color(),
    );
    painter.text(
        egui::pos2(left, card_rect.min.y + 32.0 * scale),
        egui::Align2::LEFT_CENTER,
        format!("ID: {}", node.id),
        egui::FontId::proportional(10.0 * scale),
        visuals.weak_text_color(),
    );
    if !node.member.referral_code.is_empty() {
        painter.text(
            egui::pos2(left, card_rect.min.y + 48.0 * scale),
            egui::Align2::LEFT_CENTER,
            format!("Ref: {}", node.member.referral_code),
            egui::FontId::proportional(10.0 * scale),
            visuals.selection.bg_fill,
        );
    }
}

fn collapse_button_rect(card_rect: egui::Rect, scale: f32) -> egui::Rect {
    let radius = 9.0 * scale;
    let center = egui::pos2(card_rect.max.x - 16.0 * scale, card_rect.center().y);
    egui::Rect::from_center_size(center, egui::vec2(radius * 2.0, radius * 2.0))
}

fn draw_collapse_button(
    ui: &egui::Ui,
    painter: &egui::Painter,
    button_rect: egui::Rect,
    is_collapsed: bool,
    hovered: bool,
    scale: f32,
) {
    let visuals = ui.visuals();
    let fill = if hovered {
        visuals.widgets.hovered.bg_fill
    } else {
        visuals.selection.bg_fill.gamma_multiply(0.25)
    };
    painter.circle_filled(button_rect.center(), button_rect.width() / 2.0, fill);
    painter.circle_stroke(
        button_rect.center(),
        button_rect.width() / 2.0,
        egui::Stroke::new(1.0, visuals.selection.bg_fill),
    );
    painter.text(
        button_rect.center(),
        egui::Align2::CENTER_CENTER,
        if is_collapsed { "+" } else { "−" },
        egui::FontId::proportional(12.0 * scale),
        visuals.strong_text_color(),
    );
}
