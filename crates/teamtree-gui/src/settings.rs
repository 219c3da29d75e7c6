use serde::{Deserialize, Serialize};
use teamtree_layout::LayoutConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    Latte,
    Mocha,
}

/// View configuration for the tree canvas.
///
/// Card size and gaps feed straight into the layouter; `initial_depth_open`
/// controls how deep the tree starts expanded when a new dataset arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeViewSettings {
    pub card_width: f32,
    pub card_height: f32,
    pub gap_x: f32,
    pub gap_y: f32,
    pub initial_depth_open: usize,
    pub theme: ThemeMode,
}

impl Default for TreeViewSettings {
    fn default() -> Self {
        let layout = LayoutConfig::default();
        Self {
            card_width: layout.card_width,
            card_height: layout.card_height,
            gap_x: layout.gap_x,
            gap_y: layout.gap_y,
            initial_depth_open: 2,
            theme: ThemeMode::Latte,
        }
    }
}

impl TreeViewSettings {
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            card_width: self.card_width,
            card_height: self.card_height,
            gap_x: self.gap_x,
            gap_y: self.gap_y,
            ..LayoutConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_config_tracks_settings() {
        let settings = TreeViewSettings {
            card_width: 160.0,
            gap_y: 90.0,
            ..Default::default()
        };
        let config = settings.layout_config();
        assert_eq!(config.card_width, 160.0);
        assert_eq!(config.gap_y, 90.0);
        assert_eq!(config.padding, LayoutConfig::default().padding);
    }
}
