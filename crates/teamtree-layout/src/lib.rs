pub mod collapse;
pub mod connector;
pub mod layout;
pub mod model;
pub mod viewport;

pub use collapse::CollapseSet;
pub use connector::{Connector, elbow};
pub use layout::{Bounds, LayoutConfig, Link, Point, PositionedNode, TreeLayout, TreeLayouter};
pub use model::{NodeIndex, TreeModel, TreeNode};
pub use viewport::{Viewport, wheel_zoom_factor};
