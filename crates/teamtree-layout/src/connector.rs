use crate::layout::Point;

/// Cubic Bézier connecting a parent card to a child card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub from: Point,
    pub c1: Point,
    pub c2: Point,
    pub to: Point,
}

/// Smooth elbow between a parent's bottom-center and a child's
/// top-center.
///
/// Both control points sit on the horizontal midpoint, held at the
/// parent's and child's vertical coordinates, so the curve leaves the
/// parent straight down and enters the child straight down regardless
/// of horizontal offset. With zero offset the curve degenerates to a
/// vertical line.
pub fn elbow(from: Point, to: Point) -> Connector {
    let mid_x = (from.x + to.x) / 2.0;
    Connector {
        from,
        c1: Point::new(mid_x, from.y),
        c2: Point::new(mid_x, to.y),
        to,
    }
}

impl Connector {
    /// Evaluate the curve at `t` in [0, 1]. Only used by tests and
    /// non-Bézier-native renderers; the GUI hands the control points to
    /// the painter directly.
    pub fn eval(&self, t: f32) -> Point {
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        Point::new(
            b0 * self.from.x + b1 * self.c1.x + b2 * self.c2.x + b3 * self.to.x,
            b0 * self.from.y + b1 * self.c1.y + b2 * self.c2.y + b3 * self.to.y,
        )
    }
}
