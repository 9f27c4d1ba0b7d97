//! Surface data model: positions, sizes, bounds, tool modes, and layers.
//!
//! All coordinates are surface-local logical units (CSS pixels). Device
//! pixel scaling happens exclusively inside the render crate.

use crate::color::Color;
use crate::id::LayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in surface-local logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Translate client (viewport) coordinates into surface-local ones by
    /// subtracting the surface's bounding-rect origin.
    pub fn from_client(client_x: f32, client_y: f32, origin: Position) -> Self {
        Self::new(client_x - origin.x, client_y - origin.y)
    }

    pub fn offset_from(&self, other: Position) -> Position {
        Position::new(self.x - other.x, self.y - other.y)
    }
}

/// A width/height pair in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// An axis-aligned rectangle in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin_size(origin: Position, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Edge-inclusive containment test.
    pub fn contains(&self, p: Position) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn to_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            self.x as f64,
            self.y as f64,
            (self.x + self.width) as f64,
            (self.y + self.height) as f64,
        )
    }

    pub fn from_rect(rect: kurbo::Rect) -> Self {
        Self::new(
            rect.x0 as f32,
            rect.y0 as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }
}

// ─── Tool mode ───────────────────────────────────────────────────────────

/// Mutually exclusive interpretation of pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Freehand ink strokes.
    Draw,
    /// Reposition the placed image.
    #[default]
    Move,
}

impl ToolMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolMode::Draw => "draw",
            ToolMode::Move => "move",
        }
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draw" => Ok(ToolMode::Draw),
            "move" => Ok(ToolMode::Move),
            other => Err(format!("unknown tool mode: {other:?}")),
        }
    }
}

// ─── Brush ───────────────────────────────────────────────────────────────

/// Active stroke style for draw mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    pub color: Color,
    /// Line width in logical pixels.
    pub size: f32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 6.0,
        }
    }
}

// ─── Layers ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Image,
    Drawing,
}

/// Descriptive layer metadata. Holds no pixels; toggling `visible` only
/// changes how the surface is composited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    #[serde(rename = "type")]
    pub kind: LayerKind,
}

impl Layer {
    pub fn new(id: LayerId, name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bounds_contains_is_edge_inclusive() {
        let b = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert!(b.contains(Position::new(10.0, 20.0)));
        assert!(b.contains(Position::new(110.0, 70.0)));
        assert!(b.contains(Position::new(60.0, 45.0)));
        assert!(!b.contains(Position::new(9.9, 45.0)));
        assert!(!b.contains(Position::new(60.0, 70.1)));
    }

    #[test]
    fn client_position_subtracts_origin() {
        let p = Position::from_client(130.0, 95.0, Position::new(100.0, 80.0));
        assert_eq!(p, Position::new(30.0, 15.0));
    }

    #[test]
    fn kurbo_rect_roundtrip() {
        let b = Bounds::new(5.0, 6.0, 7.0, 8.0);
        assert_eq!(Bounds::from_rect(b.to_rect()), b);
        assert_eq!(b.center(), Position::new(8.5, 10.0));
    }

    #[test]
    fn tool_mode_names() {
        assert_eq!("draw".parse::<ToolMode>(), Ok(ToolMode::Draw));
        assert_eq!("move".parse::<ToolMode>(), Ok(ToolMode::Move));
        assert!("erase".parse::<ToolMode>().is_err());
        assert_eq!(ToolMode::default(), ToolMode::Move);
    }

    #[test]
    fn layer_serializes_with_type_key() {
        let layer = Layer::new(LayerId::drawing(), "Drawing", LayerKind::Drawing);
        let json = serde_json::to_string(&layer).unwrap();
        assert_eq!(
            json,
            r#"{"id":"drawing-layer","name":"Drawing","visible":true,"type":"drawing"}"#
        );
    }
}
