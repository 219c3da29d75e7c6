pub mod detail_panel;
pub mod fetcher;
pub mod tooltip;
pub mod tree_canvas;
