//! Shape registry
//!
//! Drawing metadata for the four node kinds, consumed by renderers and by the
//! store when spawning nodes. Data only; nothing here draws.

use super::node::{NodeKind, Rect};

/// Horizontal gap between an entity and a newly spawned attribute
pub const ATTRIBUTE_GAP: f64 = 40.0;

/// Outline used to draw a node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outline {
    /// Rectangle; doubled border for weak entities
    Rectangle,
    /// Diamond
    Diamond,
    /// Ellipse
    Ellipse,
    /// Triangle
    Triangle,
}

/// Static drawing metadata for a node kind
#[derive(Debug, Clone, Copy)]
pub struct ShapeSpec {
    /// Outline shape
    pub outline: Outline,
    /// Default width
    pub width: f64,
    /// Default height
    pub height: f64,
    /// Default spawn position (attributes spawn relative to their owner
    /// instead, see [`ATTRIBUTE_GAP`])
    pub spawn_x: f64,
    /// Default spawn y
    pub spawn_y: f64,
    /// Default display label for a freshly created node
    pub label: &'static str,
}

impl ShapeSpec {
    /// Bounding box for a node spawned at the default position
    #[must_use]
    pub const fn spawn_rect(&self) -> Rect {
        Rect::new(self.spawn_x, self.spawn_y, self.width, self.height)
    }
}

const ENTITY_SHAPE: ShapeSpec = ShapeSpec {
    outline: Outline::Rectangle,
    width: 100.0,
    height: 50.0,
    spawn_x: 60.0,
    spawn_y: 60.0,
    label: "Entity",
};

const RELATIONSHIP_SHAPE: ShapeSpec = ShapeSpec {
    outline: Outline::Diamond,
    width: 60.0,
    height: 60.0,
    spawn_x: 250.0,
    spawn_y: 100.0,
    label: "R",
};

const ATTRIBUTE_SHAPE: ShapeSpec = ShapeSpec {
    outline: Outline::Ellipse,
    width: 40.0,
    height: 40.0,
    spawn_x: 0.0,
    spawn_y: 0.0,
    label: "attr",
};

const INHERITANCE_SHAPE: ShapeSpec = ShapeSpec {
    outline: Outline::Triangle,
    width: 60.0,
    height: 50.0,
    spawn_x: 300.0,
    spawn_y: 200.0,
    label: "is-a",
};

/// Get the shape metadata for a node kind
#[must_use]
pub const fn shape_for(kind: NodeKind) -> &'static ShapeSpec {
    match kind {
        NodeKind::Entity => &ENTITY_SHAPE,
        NodeKind::Relationship => &RELATIONSHIP_SHAPE,
        NodeKind::Attribute => &ATTRIBUTE_SHAPE,
        NodeKind::Inheritance => &INHERITANCE_SHAPE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_a_shape() {
        assert_eq!(shape_for(NodeKind::Entity).outline, Outline::Rectangle);
        assert_eq!(shape_for(NodeKind::Relationship).outline, Outline::Diamond);
        assert_eq!(shape_for(NodeKind::Attribute).outline, Outline::Ellipse);
        assert_eq!(shape_for(NodeKind::Inheritance).outline, Outline::Triangle);
    }

    #[test]
    fn test_spawn_rect_uses_defaults() {
        let rect = shape_for(NodeKind::Entity).spawn_rect();
        assert!((rect.x - 60.0).abs() < f64::EPSILON);
        assert!((rect.width - 100.0).abs() < f64::EPSILON);
    }
}
