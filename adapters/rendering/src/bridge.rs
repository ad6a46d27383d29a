use std::collections::BTreeMap;

use cube_defence_core::{EntityKind, EntityRef, Event, Pose, TileAddress};
use cube_defence_world::{query, Cube, World};
use glam::Quat;
use log::debug;

use crate::{PrototypeTable, VisualHandle, Visuals, GROUND_TILE_COLOR, PATH_TILE_COLOR};

/// Keeps scene visuals in step with the entities of a world.
///
/// Each entity gets exactly one visual: spawn events for an entity that
/// already has one and destroy events for an entity without one are ignored.
#[derive(Clone, Debug, Default)]
pub struct VisualBridge {
    prototypes: PrototypeTable,
    tiles: BTreeMap<TileAddress, VisualHandle>,
    entities: BTreeMap<EntityRef, VisualHandle>,
}

impl VisualBridge {
    /// Creates a bridge that instantiates visuals from `prototypes`.
    #[must_use]
    pub fn new(prototypes: PrototypeTable) -> Self {
        Self {
            prototypes,
            tiles: BTreeMap::new(),
            entities: BTreeMap::new(),
        }
    }

    /// Spawns one tinted visual per tile of the cube.
    pub fn build_cube<V: Visuals>(&mut self, cube: &Cube, visuals: &mut V) {
        let prototype = self.prototypes.get(EntityKind::Tile);
        for tile in cube.tiles() {
            let address = tile.address();
            if self.tiles.contains_key(&address) {
                continue;
            }
            let name = format!("{}-{}-{}", address.face(), address.row(), address.column());
            let handle = visuals.spawn_visual(&prototype, &name);
            visuals.set_pose(handle, Pose::standing_on(tile.centroid(), tile.normal()));
            let tint = if tile.is_part_of_path() {
                PATH_TILE_COLOR
            } else {
                GROUND_TILE_COLOR
            };
            visuals.set_tint(handle, tint);
            let _ = self.tiles.insert(address, handle);
        }
        debug!("built {} tile visuals", self.tiles.len());
    }

    /// Spawns and destroys entity visuals announced by `events`.
    pub fn handle<V: Visuals>(&mut self, events: &[Event], visuals: &mut V) {
        for event in events {
            match event {
                Event::InvaderSpawned { invader, name, .. } => {
                    self.spawn(EntityRef::Invader(*invader), name, visuals);
                }
                Event::DefenderPlaced { defender, name, .. } => {
                    self.spawn(EntityRef::Defender(*defender), name, visuals);
                }
                Event::ProjectileFired { projectile, .. } => {
                    let name = format!("projectile-{}", projectile.get());
                    self.spawn(EntityRef::Projectile(*projectile), &name, visuals);
                }
                Event::EntityDestroyed { entity } => {
                    if let Some(handle) = self.entities.remove(entity) {
                        visuals.destroy_visual(handle);
                    }
                }
                _ => {}
            }
        }
    }

    fn spawn<V: Visuals>(&mut self, entity: EntityRef, name: &str, visuals: &mut V) {
        if self.entities.contains_key(&entity) {
            debug!("visual for {name} already exists");
            return;
        }
        let prototype = self.prototypes.get(entity.kind());
        let handle = visuals.spawn_visual(&prototype, name);
        let _ = self.entities.insert(entity, handle);
    }

    /// Copies current entity poses from the world onto their visuals.
    pub fn sync<V: Visuals>(&self, world: &World, visuals: &mut V) {
        for invader in query::invader_view(world).iter() {
            if let Some(handle) = self.entities.get(&EntityRef::Invader(invader.id)) {
                visuals.set_pose(*handle, invader.pose);
            }
        }
        for defender in query::defender_view(world).iter() {
            if let Some(handle) = self.entities.get(&EntityRef::Defender(defender.id)) {
                visuals.set_pose(*handle, defender.pose);
            }
        }
        for projectile in query::projectile_view(world).iter() {
            if let Some(handle) = self.entities.get(&EntityRef::Projectile(projectile.id)) {
                visuals.set_pose(*handle, Pose::new(projectile.position, Quat::IDENTITY));
            }
        }
    }

    /// Visual currently bound to `entity`.
    #[must_use]
    pub fn visual_of(&self, entity: EntityRef) -> Option<VisualHandle> {
        self.entities.get(&entity).copied()
    }

    /// Number of live entity visuals, tiles excluded.
    #[must_use]
    pub fn entity_visuals(&self) -> usize {
        self.entities.len()
    }

    /// Number of tile visuals.
    #[must_use]
    pub fn tile_visuals(&self) -> usize {
        self.tiles.len()
    }
}
