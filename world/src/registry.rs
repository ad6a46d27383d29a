//! Ownership of every live invader, defender and projectile.

use std::{collections::BTreeMap, time::Duration};

use cube_defence_core::{
    Combatant, DefenderAttributes, DefenderId, EntityRef, InvaderAttributes, InvaderId,
    InvaderKind, Pose, ProjectileId, TileAddress,
};
use glam::Vec3;

/// Destruction and pause flags shared by every dynamic entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Lifecycle {
    pub(crate) marked: bool,
    pub(crate) paused: bool,
}

impl Lifecycle {
    pub(crate) const fn new(paused: bool) -> Self {
        Self {
            marked: false,
            paused,
        }
    }

    /// Marks the entity, returning `true` only on the first call.
    pub(crate) fn mark(&mut self) -> bool {
        if self.marked {
            return false;
        }
        self.marked = true;
        true
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Invader {
    pub(crate) name: String,
    pub(crate) kind: InvaderKind,
    pub(crate) path: String,
    pub(crate) attributes: InvaderAttributes,
    pub(crate) health: f32,
    pub(crate) distance_along_path: f32,
    pub(crate) pose: Pose,
    pub(crate) last_attack: Option<Duration>,
    pub(crate) lifecycle: Lifecycle,
}

#[derive(Clone, Debug)]
pub(crate) struct Defender {
    pub(crate) tile: TileAddress,
    pub(crate) attributes: DefenderAttributes,
    pub(crate) health: f32,
    pub(crate) pose: Pose,
    pub(crate) last_attack: Option<Duration>,
    pub(crate) lifecycle: Lifecycle,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Projectile {
    pub(crate) target: Combatant,
    pub(crate) position: Vec3,
    pub(crate) damage: f32,
    pub(crate) speed: f32,
    pub(crate) lifecycle: Lifecycle,
}

/// Entity removed during a sweep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Removed {
    pub(crate) entity: EntityRef,
    /// Tile released by a removed defender.
    pub(crate) vacated: Option<TileAddress>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct EntityRegistry {
    pub(crate) invaders: BTreeMap<InvaderId, Invader>,
    pub(crate) defenders: BTreeMap<DefenderId, Defender>,
    pub(crate) projectiles: BTreeMap<ProjectileId, Projectile>,
    next_invader: u32,
    next_defender: u32,
    next_projectile: u32,
}

impl EntityRegistry {
    pub(crate) fn insert_invader(&mut self, invader: Invader) -> InvaderId {
        let id = InvaderId::new(self.next_invader);
        self.next_invader = self.next_invader.wrapping_add(1);
        let _ = self.invaders.insert(id, invader);
        id
    }

    pub(crate) fn insert_defender(&mut self, defender: Defender) -> DefenderId {
        let id = DefenderId::new(self.next_defender);
        self.next_defender = self.next_defender.wrapping_add(1);
        let _ = self.defenders.insert(id, defender);
        id
    }

    pub(crate) fn insert_projectile(&mut self, projectile: Projectile) -> ProjectileId {
        let id = ProjectileId::new(self.next_projectile);
        self.next_projectile = self.next_projectile.wrapping_add(1);
        let _ = self.projectiles.insert(id, projectile);
        id
    }

    pub(crate) fn position_of(&self, combatant: Combatant) -> Option<Vec3> {
        match combatant {
            Combatant::Invader(id) => self.invaders.get(&id).map(|invader| invader.pose.position),
            Combatant::Defender(id) => self
                .defenders
                .get(&id)
                .map(|defender| defender.pose.position),
        }
    }

    pub(crate) fn closest_invader(
        &self,
        point: Vec3,
        max_range: Option<f32>,
    ) -> Option<InvaderId> {
        closest(
            point,
            max_range,
            self.invaders
                .iter()
                .map(|(id, invader)| (*id, invader.pose.position)),
        )
    }

    pub(crate) fn closest_defender(
        &self,
        point: Vec3,
        max_range: Option<f32>,
    ) -> Option<DefenderId> {
        closest(
            point,
            max_range,
            self.defenders
                .iter()
                .map(|(id, defender)| (*id, defender.pose.position)),
        )
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        for invader in self.invaders.values_mut() {
            invader.lifecycle.paused = paused;
        }
        for defender in self.defenders.values_mut() {
            defender.lifecycle.paused = paused;
        }
        for projectile in self.projectiles.values_mut() {
            projectile.lifecycle.paused = paused;
        }
    }

    /// Removes every marked entity: projectiles, then invaders, then defenders.
    pub(crate) fn sweep(&mut self) -> Vec<Removed> {
        let mut removed = Vec::new();

        let marked: Vec<ProjectileId> = marked_keys(&self.projectiles, |p| p.lifecycle);
        for id in marked {
            if self.projectiles.remove(&id).is_some() {
                removed.push(Removed {
                    entity: EntityRef::Projectile(id),
                    vacated: None,
                });
            }
        }

        let marked: Vec<InvaderId> = marked_keys(&self.invaders, |i| i.lifecycle);
        for id in marked {
            if self.invaders.remove(&id).is_some() {
                removed.push(Removed {
                    entity: EntityRef::Invader(id),
                    vacated: None,
                });
            }
        }

        let marked: Vec<DefenderId> = marked_keys(&self.defenders, |d| d.lifecycle);
        for id in marked {
            if let Some(defender) = self.defenders.remove(&id) {
                removed.push(Removed {
                    entity: EntityRef::Defender(id),
                    vacated: Some(defender.tile),
                });
            }
        }

        removed
    }
}

fn marked_keys<K: Copy + Ord, V>(
    entries: &BTreeMap<K, V>,
    lifecycle: impl Fn(&V) -> Lifecycle,
) -> Vec<K> {
    entries
        .iter()
        .filter(|(_, value)| lifecycle(value).marked)
        .map(|(key, _)| *key)
        .collect()
}

/// Nearest candidate to `point`, optionally limited to `max_range`.
///
/// Both comparisons are strict, so a candidate exactly at the range limit is
/// excluded and the first of several equidistant candidates wins.
pub(crate) fn closest<K>(
    point: Vec3,
    max_range: Option<f32>,
    candidates: impl Iterator<Item = (K, Vec3)>,
) -> Option<K> {
    let limit = max_range.map_or(f32::INFINITY, |range| range * range);
    let mut best: Option<(K, f32)> = None;
    for (key, position) in candidates {
        let distance = point.distance_squared(position);
        if distance >= limit {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((key, distance)),
        }
    }
    best.map(|(key, _)| key)
}
