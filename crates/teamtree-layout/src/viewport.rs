use crate::layout::{Bounds, Point};
use serde::{Deserialize, Serialize};

/// Pan/zoom affine transform for the tree canvas.
///
/// Pure math only: device adapters (wheel, drag, buttons) live in the
/// GUI and translate raw events into `pan_by` / `zoom_at` intents.
/// Ephemeral view state, never persisted, and deliberately independent
/// of data identity: a re-fetch keeps the user's viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub translate: Point,
    pub scale: f32,
}

impl Viewport {
    /// Strictly positive lower bound; scale 0 would make the inverse
    /// transform degenerate.
    pub const MIN_SCALE: f32 = 0.4;
    pub const MAX_SCALE: f32 = 2.5;
    pub const ZOOM_STEP: f32 = 1.2;

    const DEFAULT_TRANSLATE: Point = Point { x: 0.0, y: 40.0 };

    pub fn new() -> Self {
        Self {
            translate: Self::DEFAULT_TRANSLATE,
            scale: 1.0,
        }
    }

    /// Cursor-anchored zoom: after scaling, the layout point under
    /// `cursor` stays under `cursor`.
    pub fn zoom_at(&mut self, cursor: Point, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let old_scale = self.scale;
        let new_scale = (old_scale * factor).clamp(Self::MIN_SCALE, Self::MAX_SCALE);
        let ratio = new_scale / old_scale;
        self.translate = Point::new(
            cursor.x - (cursor.x - self.translate.x) * ratio,
            cursor.y - (cursor.y - self.translate.y) * ratio,
        );
        self.scale = new_scale;
    }

    /// Unclamped translation; the canvas is logically unbounded.
    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        self.translate.x += dx;
        self.translate.y += dy;
    }

    /// Fixed-step zoom from the toolbar buttons, not cursor anchored.
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * Self::ZOOM_STEP).clamp(Self::MIN_SCALE, Self::MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / Self::ZOOM_STEP).clamp(Self::MIN_SCALE, Self::MAX_SCALE);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Scale and center the layout bounds inside a view of the given
    /// size. The fitted scale is still clamped, so a huge tree fits as
    /// far as `MIN_SCALE` allows.
    pub fn fit(&mut self, bounds: Bounds, view_width: f32, view_height: f32) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return;
        }
        if view_width <= 0.0 || view_height <= 0.0 {
            return;
        }
        let scale = (view_width / bounds.width())
            .min(view_height / bounds.height())
            .clamp(Self::MIN_SCALE, Self::MAX_SCALE);
        let center = bounds.center();
        self.scale = scale;
        self.translate = Point::new(
            view_width / 2.0 - center.x * scale,
            view_height / 2.0 - center.y * scale,
        );
    }

    pub fn to_screen(&self, layout: Point) -> Point {
        Point::new(
            layout.x * self.scale + self.translate.x,
            layout.y * self.scale + self.translate.y,
        )
    }

    pub fn to_layout(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.translate.x) / self.scale,
            (screen.y - self.translate.y) / self.scale,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// Mouse-wheel adapter rule: exponential in the scroll delta so equal
/// wheel steps compound into equal zoom ratios.
pub fn wheel_zoom_factor(delta_y: f32) -> f32 {
    (-delta_y * 0.001).exp()
}
