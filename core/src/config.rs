//! Gameplay defaults and per-entity overrides.

use serde::{Deserialize, Serialize};

/// Fully resolved gameplay attributes of an invader.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvaderAttributes {
    /// Distance traveled along the path per second, in tiles.
    pub speed_tiles_per_second: f32,
    /// Health the invader spawns with.
    pub health: f32,
    /// Damage carried by each projectile the invader fires.
    pub damage_per_hit: f32,
    /// Maximum attack rate.
    pub attacks_per_second: f32,
    /// Attack reach measured in tile diagonals.
    pub attack_range_tiles: f32,
    /// Coins deposited into the store when the invader dies.
    pub coins: u32,
}

impl Default for InvaderAttributes {
    fn default() -> Self {
        Self {
            speed_tiles_per_second: 1.0,
            health: 100.0,
            damage_per_hit: 20.0,
            attacks_per_second: 1.0,
            attack_range_tiles: 1.0,
            coins: 100,
        }
    }
}

impl InvaderAttributes {
    /// Applies the provided overrides on top of these attributes.
    #[must_use]
    pub fn with_options(self, options: &InvaderOptions) -> Self {
        Self {
            speed_tiles_per_second: options
                .speed_tiles_per_second
                .unwrap_or(self.speed_tiles_per_second),
            health: options.health.unwrap_or(self.health),
            damage_per_hit: options.damage_per_hit.unwrap_or(self.damage_per_hit),
            attacks_per_second: options.attacks_per_second.unwrap_or(self.attacks_per_second),
            attack_range_tiles: options.attack_range_tiles.unwrap_or(self.attack_range_tiles),
            coins: options.coins.unwrap_or(self.coins),
        }
    }
}

/// Optional per-invader overrides; unset fields fall back to the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvaderOptions {
    /// Overrides [`InvaderAttributes::speed_tiles_per_second`].
    pub speed_tiles_per_second: Option<f32>,
    /// Overrides [`InvaderAttributes::health`].
    pub health: Option<f32>,
    /// Overrides [`InvaderAttributes::damage_per_hit`].
    pub damage_per_hit: Option<f32>,
    /// Overrides [`InvaderAttributes::attacks_per_second`].
    pub attacks_per_second: Option<f32>,
    /// Overrides [`InvaderAttributes::attack_range_tiles`].
    pub attack_range_tiles: Option<f32>,
    /// Overrides [`InvaderAttributes::coins`].
    pub coins: Option<u32>,
}

/// Fully resolved gameplay attributes of a defender.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenderAttributes {
    /// Health the defender is placed with.
    pub health: f32,
    /// Damage carried by each projectile the defender fires.
    pub damage_per_hit: f32,
    /// Maximum attack rate.
    pub attacks_per_second: f32,
    /// Attack reach measured in tile diagonals.
    pub attack_range_tiles: f32,
}

impl Default for DefenderAttributes {
    fn default() -> Self {
        Self {
            health: 100.0,
            damage_per_hit: 50.0,
            attacks_per_second: 1.0,
            attack_range_tiles: 2.0,
        }
    }
}

impl DefenderAttributes {
    /// Applies the provided overrides on top of these attributes.
    #[must_use]
    pub fn with_options(self, options: &DefenderOptions) -> Self {
        Self {
            health: options.health.unwrap_or(self.health),
            damage_per_hit: options.damage_per_hit.unwrap_or(self.damage_per_hit),
            attacks_per_second: options.attacks_per_second.unwrap_or(self.attacks_per_second),
            attack_range_tiles: options.attack_range_tiles.unwrap_or(self.attack_range_tiles),
        }
    }
}

/// Optional per-defender overrides; unset fields fall back to the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenderOptions {
    /// Overrides [`DefenderAttributes::health`].
    pub health: Option<f32>,
    /// Overrides [`DefenderAttributes::damage_per_hit`].
    pub damage_per_hit: Option<f32>,
    /// Overrides [`DefenderAttributes::attacks_per_second`].
    pub attacks_per_second: Option<f32>,
    /// Overrides [`DefenderAttributes::attack_range_tiles`].
    pub attack_range_tiles: Option<f32>,
}

/// Named numeric defaults consumed when a level is built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Coin balance the store opens with.
    pub starting_coins: u32,
    /// Price of a single defender.
    pub defender_cost: u32,
    /// Projectile travel speed in world units per second.
    pub projectile_speed: f32,
    /// Squared distance below which a projectile counts as arrived.
    pub projectile_arrival_epsilon: f32,
    /// Attributes applied to invaders unless overridden.
    pub invader: InvaderAttributes,
    /// Attributes applied to defenders unless overridden.
    pub defender: DefenderAttributes,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            starting_coins: 200,
            defender_cost: 200,
            projectile_speed: 5.0,
            projectile_arrival_epsilon: 0.01,
            invader: InvaderAttributes::default(),
            defender: DefenderAttributes::default(),
        }
    }
}
