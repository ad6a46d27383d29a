#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Cube Defence.

mod cube;
mod path;
mod registry;
mod store;

use std::{
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

use cube_defence_core::{
    AddressNotFound, Combatant, Command, CubeDimensions, Defaults, DefenderId, DefenderOptions,
    EntityRef, Event, InvaderId, InvaderKind, InvaderOptions, LevelSpec, PlacementError,
    ProjectileId, TileAddress,
};
use log::{debug, info, warn};
use thiserror::Error;

pub use cube::{Cube, FaceFrame, Tile};
pub use path::{Path, PathTable};
pub use store::Store;

use registry::{Defender, EntityRegistry, Invader, Lifecycle, Projectile};

/// Reasons a world cannot be built from a level description.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WorldError {
    /// A path names a tile outside the cube.
    #[error("path `{name}` is invalid: {source}")]
    Address {
        /// Name of the offending path.
        name: String,
        /// Lookup failure for the offending tile.
        source: AddressNotFound,
    },
    /// A path declares no tiles.
    #[error("path `{name}` contains no tiles")]
    EmptyPath {
        /// Name of the offending path.
        name: String,
    },
}

/// Represents the authoritative Cube Defence world state.
#[derive(Debug)]
pub struct World {
    cube: Cube,
    paths: PathTable,
    store: Store,
    entities: EntityRegistry,
    defaults: Defaults,
    clock: Duration,
    paused: bool,
}

impl World {
    /// Builds a world on a cube of the provided size with the declared paths.
    ///
    /// Every path tile is flagged so that defenders cannot be placed on it.
    pub fn new(
        dimensions: CubeDimensions,
        paths: &BTreeMap<String, Vec<TileAddress>>,
        defaults: Defaults,
    ) -> Result<Self, WorldError> {
        let path_tiles: BTreeSet<TileAddress> = paths.values().flatten().copied().collect();
        let cube = Cube::new(dimensions, &path_tiles);
        let paths = PathTable::new(paths, &cube)?;
        info!(
            "built {} cube with {} tiles and {} paths",
            dimensions,
            cube.tiles().count(),
            paths.iter().count()
        );

        Ok(Self {
            cube,
            paths,
            store: Store::new(defaults.starting_coins),
            entities: EntityRegistry::default(),
            defaults,
            clock: Duration::ZERO,
            paused: false,
        })
    }

    /// Builds a world from the cube and paths of a level description.
    pub fn from_spec(spec: &LevelSpec, defaults: Defaults) -> Result<Self, WorldError> {
        Self::new(spec.cube, &spec.paths, defaults)
    }

    fn spawn_invader(
        &mut self,
        name: String,
        kind: InvaderKind,
        path_name: String,
        options: &InvaderOptions,
        out_events: &mut Vec<Event>,
    ) {
        let Some(path) = self.paths.get(&path_name) else {
            warn!("invader {name} names unknown path `{path_name}`");
            out_events.push(Event::InvaderSpawnRejected {
                name,
                path: path_name,
            });
            return;
        };
        let pose = match path.pose_at(&self.cube, 0.0) {
            Ok(pose) => pose,
            Err(error) => {
                warn!("invader {name} cannot stand on path `{path_name}`: {error}");
                out_events.push(Event::InvaderSpawnRejected {
                    name,
                    path: path_name,
                });
                return;
            }
        };

        let attributes = self.defaults.invader.with_options(options);
        let invader = self.entities.insert_invader(Invader {
            name: name.clone(),
            kind,
            path: path_name,
            attributes,
            health: attributes.health,
            distance_along_path: 0.0,
            pose,
            last_attack: None,
            lifecycle: Lifecycle::new(self.paused),
        });
        debug!("spawned invader {name} as {invader:?}");
        out_events.push(Event::InvaderSpawned {
            invader,
            name,
            kind,
        });
        self.check_invader_death(invader, out_events);
    }

    fn validate_placement(&self, tile: TileAddress) -> Result<(), PlacementError> {
        let resolved = self.cube.tile(tile)?;
        if resolved.is_part_of_path() {
            return Err(PlacementError::OnPath(tile));
        }
        if let Some(defender) = resolved.occupant() {
            return Err(PlacementError::Occupied { tile, defender });
        }
        Ok(())
    }

    fn place_defender(
        &mut self,
        tile: TileAddress,
        options: &DefenderOptions,
        out_events: &mut Vec<Event>,
    ) {
        let pose = match self.cube.tile(tile) {
            Ok(resolved) => resolved.standing_pose(),
            Err(error) => {
                out_events.push(Event::DefenderPlacementRejected {
                    tile,
                    reason: error.into(),
                });
                return;
            }
        };
        let attributes = self.defaults.defender.with_options(options);
        let defender = self.entities.insert_defender(Defender {
            tile,
            attributes,
            health: attributes.health,
            pose,
            last_attack: None,
            lifecycle: Lifecycle::new(self.paused),
        });
        if let Ok(resolved) = self.cube.tile_mut(tile) {
            resolved.set_occupant(Some(defender));
        }
        let name = format!("D-{}-{}-{}", tile.face(), tile.row(), tile.column());
        info!("placed defender {name} on {tile}");
        out_events.push(Event::DefenderPlaced {
            defender,
            name,
            tile,
        });
        self.check_defender_death(defender, out_events);
    }

    fn fire_projectile(
        &mut self,
        attacker: Combatant,
        target: Combatant,
        out_events: &mut Vec<Event>,
    ) {
        if self.entities.position_of(target).is_none() {
            debug!("{attacker:?} fired at missing target {target:?}");
            return;
        }
        let now = self.clock;
        let launch = match attacker {
            Combatant::Invader(id) => self.entities.invaders.get_mut(&id).map(|invader| {
                invader.last_attack = Some(now);
                (invader.pose.position, invader.attributes.damage_per_hit)
            }),
            Combatant::Defender(id) => self.entities.defenders.get_mut(&id).map(|defender| {
                defender.last_attack = Some(now);
                (defender.pose.position, defender.attributes.damage_per_hit)
            }),
        };
        let Some((position, damage)) = launch else {
            debug!("missing attacker {attacker:?} cannot fire");
            return;
        };

        let projectile = self.entities.insert_projectile(Projectile {
            target,
            position,
            damage,
            speed: self.defaults.projectile_speed,
            lifecycle: Lifecycle::new(self.paused),
        });
        out_events.push(Event::ProjectileFired {
            projectile,
            attacker,
            target,
        });
    }

    fn land_projectile(&mut self, projectile: ProjectileId, out_events: &mut Vec<Event>) {
        let Some(entry) = self.entities.projectiles.get_mut(&projectile) else {
            return;
        };
        if !entry.lifecycle.mark() {
            return;
        }
        let (target, damage) = (entry.target, entry.damage);
        out_events.push(Event::EntityMarked {
            entity: EntityRef::Projectile(projectile),
        });

        match target {
            Combatant::Invader(id) => {
                let Some(invader) = self.entities.invaders.get_mut(&id) else {
                    return;
                };
                invader.health -= damage;
                out_events.push(Event::AttackLanded {
                    projectile,
                    target,
                    damage,
                    remaining_health: invader.health,
                });
                self.check_invader_death(id, out_events);
            }
            Combatant::Defender(id) => {
                let Some(defender) = self.entities.defenders.get_mut(&id) else {
                    return;
                };
                defender.health -= damage;
                out_events.push(Event::AttackLanded {
                    projectile,
                    target,
                    damage,
                    remaining_health: defender.health,
                });
                self.check_defender_death(id, out_events);
            }
        }
    }

    /// Marks a dead invader once and pays its reward into the store.
    fn check_invader_death(&mut self, id: InvaderId, out_events: &mut Vec<Event>) {
        let Some(invader) = self.entities.invaders.get_mut(&id) else {
            return;
        };
        if invader.health > 0.0 || !invader.lifecycle.mark() {
            return;
        }
        info!("invader {} died", invader.name);
        let coins = invader.attributes.coins;
        out_events.push(Event::EntityMarked {
            entity: EntityRef::Invader(id),
        });
        let balance = self.store.deposit(coins);
        out_events.push(Event::CoinsDeposited {
            amount: coins,
            balance,
        });
    }

    fn check_defender_death(&mut self, id: DefenderId, out_events: &mut Vec<Event>) {
        let Some(defender) = self.entities.defenders.get_mut(&id) else {
            return;
        };
        if defender.health > 0.0 || !defender.lifecycle.mark() {
            return;
        }
        info!("defender on {} destroyed", defender.tile);
        out_events.push(Event::EntityMarked {
            entity: EntityRef::Defender(id),
        });
    }

    fn sweep(&mut self, out_events: &mut Vec<Event>) {
        for removed in self.entities.sweep() {
            if let Some(tile) = removed.vacated {
                if let Ok(resolved) = self.cube.tile_mut(tile) {
                    resolved.set_occupant(None);
                }
            }
            out_events.push(Event::EntityDestroyed {
                entity: removed.entity,
            });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::SetPaused { paused } => {
            world.paused = paused;
            world.entities.set_paused(paused);
            out_events.push(Event::PauseChanged { paused });
        }
        Command::SpawnInvader {
            name,
            kind,
            path,
            options,
        } => world.spawn_invader(name, kind, path, &options, out_events),
        Command::PlaceDefender { tile, options } => match world.validate_placement(tile) {
            Ok(()) => world.place_defender(tile, &options, out_events),
            Err(reason) => {
                warn!("defender placement on {tile} rejected: {reason}");
                out_events.push(Event::DefenderPlacementRejected { tile, reason });
            }
        },
        Command::PurchaseDefender { tile } => {
            if let Err(reason) = world.validate_placement(tile) {
                warn!("defender purchase on {tile} rejected: {reason}");
                out_events.push(Event::DefenderPlacementRejected { tile, reason });
                return;
            }
            let cost = world.defaults.defender_cost;
            match world.store.purchase(cost) {
                Ok(balance) => {
                    out_events.push(Event::CoinsSpent {
                        amount: cost,
                        balance,
                    });
                    world.place_defender(tile, &DefenderOptions::default(), out_events);
                }
                Err(reason) => {
                    warn!("defender purchase on {tile} refused: {reason}");
                    out_events.push(Event::PurchaseRejected { tile, reason });
                }
            }
        }
        Command::MoveInvader {
            invader,
            distance_along_path,
            pose,
        } => {
            if let Some(entry) = world.entities.invaders.get_mut(&invader) {
                entry.distance_along_path = distance_along_path;
                entry.pose = pose;
            }
        }
        Command::FireProjectile { attacker, target } => {
            world.fire_projectile(attacker, target, out_events);
        }
        Command::MoveProjectile {
            projectile,
            position,
        } => {
            if let Some(entry) = world.entities.projectiles.get_mut(&projectile) {
                entry.position = position;
            }
        }
        Command::LandProjectile { projectile } => world.land_projectile(projectile, out_events),
        Command::CancelProjectile { projectile } => {
            if let Some(entry) = world.entities.projectiles.get_mut(&projectile) {
                if entry.lifecycle.mark() {
                    out_events.push(Event::EntityMarked {
                        entity: EntityRef::Projectile(projectile),
                    });
                }
            }
        }
        Command::Sweep => world.sweep(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use cube_defence_core::{
        Combatant, DefenderId, DefenderSnapshot, DefenderView, Defaults, InvaderId,
        InvaderSnapshot, InvaderView, ProjectileSnapshot, ProjectileView,
    };
    use glam::Vec3;

    use super::{Cube, Path, PathTable, World};

    /// Provides read-only access to the cube and its tiles.
    #[must_use]
    pub fn cube(world: &World) -> &Cube {
        &world.cube
    }

    /// Provides read-only access to every declared path.
    #[must_use]
    pub fn paths(world: &World) -> &PathTable {
        &world.paths
    }

    /// Looks up a declared path by name.
    #[must_use]
    pub fn path<'a>(world: &'a World, name: &str) -> Option<&'a Path> {
        world.paths.get(name)
    }

    /// Numeric defaults the world was configured with.
    #[must_use]
    pub fn defaults(world: &World) -> &Defaults {
        &world.defaults
    }

    /// Current store balance.
    #[must_use]
    pub fn coin_balance(world: &World) -> u32 {
        world.store.balance()
    }

    /// Total simulated time accumulated through ticks.
    #[must_use]
    pub fn now(world: &World) -> Duration {
        world.clock
    }

    /// Reports whether the world is paused.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }

    /// Captures a read-only view of every live invader.
    #[must_use]
    pub fn invader_view(world: &World) -> InvaderView {
        InvaderView::from_snapshots(
            world
                .entities
                .invaders
                .iter()
                .map(|(id, invader)| InvaderSnapshot {
                    id: *id,
                    kind: invader.kind,
                    path: invader.path.clone(),
                    distance_along_path: invader.distance_along_path,
                    pose: invader.pose,
                    health: invader.health,
                    attributes: invader.attributes,
                    last_attack: invader.last_attack,
                    marked_for_destruction: invader.lifecycle.marked,
                    paused: invader.lifecycle.paused,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every live defender.
    #[must_use]
    pub fn defender_view(world: &World) -> DefenderView {
        DefenderView::from_snapshots(
            world
                .entities
                .defenders
                .iter()
                .map(|(id, defender)| DefenderSnapshot {
                    id: *id,
                    tile: defender.tile,
                    pose: defender.pose,
                    health: defender.health,
                    attributes: defender.attributes,
                    last_attack: defender.last_attack,
                    marked_for_destruction: defender.lifecycle.marked,
                    paused: defender.lifecycle.paused,
                })
                .collect(),
        )
    }

    /// Captures a read-only view of every projectile in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .entities
                .projectiles
                .iter()
                .map(|(id, projectile)| ProjectileSnapshot {
                    id: *id,
                    target: projectile.target,
                    position: projectile.position,
                    damage: projectile.damage,
                    speed: projectile.speed,
                    marked_for_destruction: projectile.lifecycle.marked,
                    paused: projectile.lifecycle.paused,
                })
                .collect(),
        )
    }

    /// Current world position of a combatant, if it is still registered.
    #[must_use]
    pub fn combatant_position(world: &World, combatant: Combatant) -> Option<Vec3> {
        world.entities.position_of(combatant)
    }

    /// Invader nearest to `point`, strictly closer than `max_range` when given.
    ///
    /// Ties resolve to the lowest identifier. Invaders already marked for
    /// destruction remain candidates until they are swept.
    #[must_use]
    pub fn closest_invader(
        world: &World,
        point: Vec3,
        max_range: Option<f32>,
    ) -> Option<InvaderId> {
        world.entities.closest_invader(point, max_range)
    }

    /// Defender nearest to `point`, strictly closer than `max_range` when given.
    #[must_use]
    pub fn closest_defender(
        world: &World,
        point: Vec3,
        max_range: Option<f32>,
    ) -> Option<DefenderId> {
        world.entities.closest_defender(point, max_range)
    }
}
