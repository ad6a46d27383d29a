#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Presentation contracts for Cube Defence adapters.
//!
//! The simulation never talks to a renderer directly. Adapters implement
//! [`Visuals`] and let a [`VisualBridge`] translate world events and snapshots
//! into visual lifecycles, while [`Hud`] keeps the on-screen panels in step
//! with the level.

mod bridge;
mod ui;

use std::collections::BTreeMap;

use cube_defence_core::{EntityKind, Pose};

pub use bridge::VisualBridge;
pub use ui::{format_play_time, Hud, HudAction, Panel, PanelError, PanelKind, Panels};

/// RGBA color used to tint visuals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Tint of tiles invaders walk on.
pub const PATH_TILE_COLOR: Color = Color::from_rgb_u8(150, 110, 70);
/// Tint of tiles that accept defenders.
pub const GROUND_TILE_COLOR: Color = Color::from_rgb_u8(70, 140, 60);

/// Opaque handle to a visual owned by a [`Visuals`] implementation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(u64);

impl VisualHandle {
    /// Wraps an implementation-defined identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the implementation-defined identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Model and scale a visual is instantiated from.
#[derive(Clone, Debug, PartialEq)]
pub struct Prototype {
    /// Name of the model asset.
    pub model: String,
    /// Uniform scale applied to the model.
    pub scale: f32,
}

impl Prototype {
    /// Creates a new prototype.
    #[must_use]
    pub fn new(model: impl Into<String>, scale: f32) -> Self {
        Self {
            model: model.into(),
            scale,
        }
    }
}

/// Prototype lookup keyed by entity kind.
#[derive(Clone, Debug, PartialEq)]
pub struct PrototypeTable {
    prototypes: BTreeMap<EntityKind, Prototype>,
}

impl Default for PrototypeTable {
    fn default() -> Self {
        let prototypes = [
            EntityKind::Tile,
            EntityKind::Invader,
            EntityKind::Defender,
            EntityKind::Projectile,
        ]
        .into_iter()
        .map(|kind| (kind, stock_prototype(kind)))
        .collect();
        Self { prototypes }
    }
}

impl PrototypeTable {
    /// Replaces the prototype used for `kind`.
    #[must_use]
    pub fn with(mut self, kind: EntityKind, prototype: Prototype) -> Self {
        let _ = self.prototypes.insert(kind, prototype);
        self
    }

    /// Prototype registered for `kind`.
    #[must_use]
    pub fn get(&self, kind: EntityKind) -> Prototype {
        self.prototypes
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| stock_prototype(kind))
    }
}

fn stock_prototype(kind: EntityKind) -> Prototype {
    match kind {
        EntityKind::Tile => Prototype::new("tile", 1.0),
        EntityKind::Invader => Prototype::new("gnome", 0.25),
        EntityKind::Defender => Prototype::new("tower", 1.0),
        EntityKind::Projectile => Prototype::new("projectile", 0.1),
    }
}

/// Scene service that owns the visual representation of entities.
pub trait Visuals {
    /// Instantiates a named visual from `prototype`.
    fn spawn_visual(&mut self, prototype: &Prototype, name: &str) -> VisualHandle;

    /// Removes a visual previously returned by [`Visuals::spawn_visual`].
    fn destroy_visual(&mut self, handle: VisualHandle);

    /// Moves and orients a visual.
    fn set_pose(&mut self, handle: VisualHandle, pose: Pose);

    /// Tints a visual.
    fn set_tint(&mut self, handle: VisualHandle, color: Color);
}
