use std::path::PathBuf;
use std::time::Duration;

use eframe::egui;
use egui_notify::Toasts;
use egui_phosphor::regular as ph;
use teamtree_layout::{CollapseSet, TreeLayout, TreeLayouter, TreeModel, Viewport};

use crate::components::{
    detail_panel::DetailPanel, fetcher::TeamFetcher, tooltip::TooltipManager,
    tree_canvas::TreeCanvas,
};
use crate::settings::{ThemeMode, TreeViewSettings};
use crate::theme;

pub struct TeamTreeApp {
    settings: TreeViewSettings,

    // Data
    model: Option<TreeModel>,
    collapsed: CollapseSet,
    current_path: Option<PathBuf>,
    fetcher: TeamFetcher,

    // Layout cache, recomputed when the tree, the collapse set or the
    // card geometry changes.
    layouter: TreeLayouter,
    layout: TreeLayout,
    layout_dirty: bool,

    // View state. The viewport survives re-fetches on purpose: pan/zoom
    // is a view preference, not a property of the data.
    viewport: Viewport,
    canvas: TreeCanvas,
    tooltip: TooltipManager,
    detail_panel: DetailPanel,

    // Fit-to-view is requested from the toolbar but needs the canvas
    // rect, so it is applied on the next central panel pass.
    pending_fit: bool,

    // UI state
    toasts: Toasts,
    show_settings: bool,
    applied_theme: Option<ThemeMode>,
}

impl TeamTreeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings = TreeViewSettings::default();
        let layouter = TreeLayouter::new(settings.layout_config());

        let mut app = Self {
            settings,
            model: None,
            collapsed: CollapseSet::new(),
            current_path: None,
            fetcher: TeamFetcher::new(),
            layouter,
            layout: TreeLayout::default(),
            layout_dirty: false,
            viewport: Viewport::new(),
            canvas: TreeCanvas::new(),
            tooltip: TooltipManager::new(),
            detail_panel: DetailPanel::new(),
            pending_fit: false,
            toasts: Toasts::new(),
            show_settings: false,
            applied_theme: None,
        };

        if let Some(path) = std::env::args().nth(1) {
            app.open(PathBuf::from(path));
        }
        app
    }

    fn open(&mut self, path: PathBuf) {
        tracing::info!("loading team data from {:?}", path);
        self.current_path = Some(path.clone());
        self.fetcher.fetch(path);
    }

    fn poll_fetcher(&mut self) {
        let Some(msg) = self.fetcher.poll() else {
            return;
        };
        match msg.result {
            Ok(root) => {
                let model = TreeModel::from_root(&root);
                self.collapsed = CollapseSet::seed(&model, self.settings.initial_depth_open);
                self.detail_panel.clear();
                self.model = Some(model);
                self.layout_dirty = true;
            }
            Err(err) => {
                // The previous tree stays on screen until a valid
                // replacement arrives.
                tracing::warn!("team load failed: {err}");
                self.toasts.error(format!("Failed to load team: {err}"));
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(format!("{} Open…", ph::FOLDER_OPEN)).clicked()
                && let Some(path) = rfd::FileDialog::new()
                    .add_filter("JSON", &["json"])
                    .pick_file()
            {
                self.open(path);
            }
            let reload = ui.add_enabled(
                self.current_path.is_some(),
                egui::Button::new(format!("{} Reload", ph::ARROW_CLOCKWISE)),
            );
            if reload.clicked()
                && let Some(path) = self.current_path.clone()
            {
                self.open(path);
            }

            ui.separator();

            if ui
                .button(ph::MAGNIFYING_GLASS_PLUS)
                .on_hover_text("Zoom In")
                .clicked()
            {
                self.viewport.zoom_in();
            }
            if ui
                .button(ph::MAGNIFYING_GLASS_MINUS)
                .on_hover_text("Zoom Out")
                .clicked()
            {
                self.viewport.zoom_out();
            }
            if ui
                .button(ph::CORNERS_OUT)
                .on_hover_text("Fit to View")
                .clicked()
            {
                self.pending_fit = true;
            }
            if ui
                .button(ph::ARROW_COUNTER_CLOCKWISE)
                .on_hover_text("Reset View")
                .clicked()
            {
                self.viewport.reset();
            }

            ui.separator();

            if ui
                .button(ph::GEAR)
                .on_hover_text("View Settings")
                .clicked()
            {
                self.show_settings = !self.show_settings;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.fetcher.is_loading() {
                    ui.spinner();
                    ui.label("Loading team…");
                } else if let Some(model) = &self.model {
                    ui.label(format!(
                        "{} of {} members visible",
                        self.layout.nodes.len(),
                        model.node_count()
                    ));
                }
            });
        });
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let before = self.settings.clone();
        let mut open = self.show_settings;
        egui::Window::new("View Settings")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                egui::Grid::new("view_settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Card width");
                        ui.add(egui::Slider::new(
                            &mut self.settings.card_width,
                            120.0..=320.0,
                        ));
                        ui.end_row();
                        ui.label("Card height");
                        ui.add(egui::Slider::new(
                            &mut self.settings.card_height,
                            48.0..=140.0,
                        ));
                        ui.end_row();
                        ui.label("Horizontal gap");
                        ui.add(egui::Slider::new(&mut self.settings.gap_x, 20.0..=160.0));
                        ui.end_row();
                        ui.label("Vertical gap");
                        ui.add(egui::Slider::new(&mut self.settings.gap_y, 40.0..=240.0));
                        ui.end_row();
                        ui.label("Open depth");
                        ui.add(egui::Slider::new(
                            &mut self.settings.initial_depth_open,
                            0..=8,
                        ));
                        ui.end_row();
                        ui.label("Theme");
                        ui.horizontal(|ui| {
                            ui.selectable_value(&mut self.settings.theme, ThemeMode::Latte, "Latte");
                            ui.selectable_value(&mut self.settings.theme, ThemeMode::Mocha, "Mocha");
                        });
                        ui.end_row();
                    });
            });
        self.show_settings = open;

        if self.settings.layout_config() != before.layout_config() {
            self.layouter = TreeLayouter::new(self.settings.layout_config());
            self.layout_dirty = true;
        }
        if self.settings.initial_depth_open != before.initial_depth_open
            && let Some(model) = &self.model
        {
            self.collapsed = CollapseSet::seed(model, self.settings.initial_depth_open);
            self.layout_dirty = true;
        }
    }
}

impl eframe::App for TeamTreeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_theme != Some(self.settings.theme) {
            theme::apply(ctx, self.settings.theme);
            self.applied_theme = Some(self.settings.theme);
        }

        self.poll_fetcher();
        if self.fetcher.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::SidePanel::right("detail_panel")
            .default_width(260.0)
            .show(ctx, |ui| {
                self.detail_panel.ui(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let Some(model) = &self.model else {
                    theme::empty_state(
                        ui,
                        ph::TREE_STRUCTURE,
                        "No referral data to display",
                        "Open a team JSON export to view the downline tree",
                    );
                    return;
                };

                if self.layout_dirty {
                    self.layout = self.layouter.layout(model, &self.collapsed);
                    self.layout_dirty = false;
                }

                let rect = ui.available_rect_before_wrap();
                if self.pending_fit {
                    self.viewport
                        .fit(self.layout.bounds, rect.width(), rect.height());
                    self.pending_fit = false;
                }
                let interaction = self.canvas.show(
                    ui,
                    rect,
                    model,
                    &self.layout,
                    &self.collapsed,
                    &self.layouter.config,
                    &mut self.viewport,
                    &mut self.tooltip,
                );
                self.tooltip.ui(ctx, rect.min);

                if let Some(id) = interaction.toggled {
                    self.collapsed.toggle(model, &id);
                    self.layout_dirty = true;
                }
                if let Some(id) = interaction.clicked
                    && let Some(node) = model.get_by_id(&id)
                {
                    self.detail_panel.select(node.id.clone(), node.member.clone());
                }
            });

        self.settings_window(ctx);
        self.toasts.show(ctx);
    }
}
