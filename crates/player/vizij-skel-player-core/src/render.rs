//! Render hand-off: the renderer contract, colors and debug overlay toggles.

use serde::{Deserialize, Serialize};

use crate::error::PlayerError;
use crate::runtime::Skeleton;
use crate::viewport::Rect;

/// Opaque handle to a scene node owned by the renderer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Straight-alpha RGBA color, channels in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    /// Outline of the padded viewport when viewport debug rendering is on.
    pub const VIEWPORT_DEBUG: Color = Color::rgba(0.0, 1.0, 0.0, 1.0);
    /// Outline of the unpadded viewport.
    pub const VIEWPORT_DEBUG_INNER: Color = Color::rgba(1.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, PlayerError> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(PlayerError::invalid_config(format!(
                "color '{hex}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |i: usize| -> Result<f32, PlayerError> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| PlayerError::invalid_config(format!("color '{hex}' is not hex")))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// One independently toggled debug drawable exposed by the renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLayer {
    Bones,
    Regions,
    Meshes,
    Bounds,
    Clipping,
    Paths,
    Points,
}

impl DebugLayer {
    pub const ALL: [DebugLayer; 7] = [
        Self::Bones,
        Self::Regions,
        Self::Meshes,
        Self::Bounds,
        Self::Clipping,
        Self::Paths,
        Self::Points,
    ];

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bones => "bones",
            Self::Regions => "regions",
            Self::Meshes => "meshes",
            Self::Bounds => "bounds",
            Self::Clipping => "clipping",
            Self::Paths => "paths",
            Self::Points => "points",
        }
    }
}

/// Debug overlay toggles, all off by default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugLayers {
    pub bones: bool,
    pub regions: bool,
    pub meshes: bool,
    pub bounds: bool,
    pub clipping: bool,
    pub paths: bool,
    pub points: bool,
}

impl DebugLayers {
    pub fn is_enabled(&self, layer: DebugLayer) -> bool {
        *self.slot(layer)
    }

    pub fn set(&mut self, layer: DebugLayer, enabled: bool) {
        *self.slot_mut(layer) = enabled;
    }

    fn slot(&self, layer: DebugLayer) -> &bool {
        match layer {
            DebugLayer::Bones => &self.bones,
            DebugLayer::Regions => &self.regions,
            DebugLayer::Meshes => &self.meshes,
            DebugLayer::Bounds => &self.bounds,
            DebugLayer::Clipping => &self.clipping,
            DebugLayer::Paths => &self.paths,
            DebugLayer::Points => &self.points,
        }
    }

    fn slot_mut(&mut self, layer: DebugLayer) -> &mut bool {
        match layer {
            DebugLayer::Bones => &mut self.bones,
            DebugLayer::Regions => &mut self.regions,
            DebugLayer::Meshes => &mut self.meshes,
            DebugLayer::Bounds => &mut self.bounds,
            DebugLayer::Clipping => &mut self.clipping,
            DebugLayer::Paths => &mut self.paths,
            DebugLayer::Points => &mut self.points,
        }
    }
}

/// Scene-graph renderer that draws skeletons of type `S`.
///
/// Node positions and scales are in canvas pixels with y pointing down. Skeleton
/// content is y-up, so the renderer draws a skeleton node with its y axis flipped.
pub trait RenderEngine<S: Skeleton> {
    fn create_scene(&mut self);
    fn create_skeleton_node(&mut self) -> NodeId;
    fn add_to_scene(&mut self, node: NodeId);
    fn set_node_scale(&mut self, node: NodeId, scale: f32);
    fn set_node_position(&mut self, node: NodeId, x: f32, y: f32);
    fn set_background_color(&mut self, color: Color);
    fn set_debug_layer(&mut self, node: NodeId, layer: DebugLayer, enabled: bool);
    /// Outline a skeleton-space rectangle on top of the node.
    fn draw_debug_rect(&mut self, node: NodeId, rect: Rect, color: Color);
    /// Draw the skeleton's current world pose into the node.
    fn draw(&mut self, node: NodeId, skeleton: &S);
}
