#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cube Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the per-frame systems. Systems and adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! describing what actually happened. Systems read immutable snapshots such as
//! [`InvaderView`] and respond exclusively with new command batches.

mod config;
mod error;
mod spec;

use std::{fmt, time::Duration};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

pub use config::{
    DefenderAttributes, DefenderOptions, Defaults, InvaderAttributes, InvaderOptions,
};
pub use error::{AddressNotFound, InsufficientFunds, PathNotFound, PlacementError};
pub use spec::{LevelSpec, SubWaveInvaderSpec, SubWaveSpec, WaveSpec};

/// Width of a single tile mesh in world units.
pub const TILE_WIDTH: f32 = 2.0;
/// Thickness of a single tile mesh in world units.
pub const TILE_DEPTH: f32 = 0.2;
/// Spacing left between neighbouring tiles.
pub const TILE_GAP: f32 = 0.05;
/// Distance between the centers of two neighbouring tiles along a row.
pub const CELL_WIDTH: f32 = TILE_WIDTH + TILE_GAP;
/// Distance between the centers of two neighbouring tiles along a column.
pub const CELL_HEIGHT: f32 = TILE_WIDTH + TILE_GAP;
/// Half of [`CELL_WIDTH`].
pub const HALF_CELL_WIDTH: f32 = 0.5 * CELL_WIDTH;
/// Half of [`CELL_HEIGHT`].
pub const HALF_CELL_HEIGHT: f32 = 0.5 * CELL_HEIGHT;

/// World-space length of a cell diagonal.
///
/// Attack ranges are configured in tiles and converted to world distances by
/// multiplying with this length.
#[must_use]
pub fn tile_diagonal_length() -> f32 {
    (CELL_WIDTH * CELL_WIDTH + CELL_HEIGHT * CELL_HEIGHT).sqrt()
}

/// One of the six planar grids forming the cube surface.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Face {
    /// Face pointing toward negative Z.
    Front,
    /// Face pointing toward positive Z.
    Back,
    /// Face pointing toward negative X.
    Left,
    /// Face pointing toward positive X.
    Right,
    /// Face pointing toward positive Y.
    Top,
    /// Face pointing toward negative Y.
    Bottom,
}

impl Face {
    /// Every face in construction order.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    /// Upper-case name used in tile and visual identifiers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Front => "FRONT",
            Self::Back => "BACK",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Top => "TOP",
            Self::Bottom => "BOTTOM",
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Local edge of a tile, expressed in the owning face's grid.
///
/// `Up` points toward decreasing rows and `Right` toward increasing columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Edge toward the previous row.
    Up,
    /// Edge toward the next row.
    Down,
    /// Edge toward the previous column.
    Left,
    /// Edge toward the next column.
    Right,
}

impl Direction {
    /// All four local edge directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Location of a single tile expressed as face, row and column.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TileAddress {
    face: Face,
    row: u32,
    column: u32,
}

impl TileAddress {
    /// Creates a new tile address.
    #[must_use]
    pub const fn new(face: Face, row: u32, column: u32) -> Self {
        Self { face, row, column }
    }

    /// Face that owns the tile.
    #[must_use]
    pub const fn face(&self) -> Face {
        self.face
    }

    /// Zero-based row index within the face grid.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index within the face grid.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for TileAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.face, self.row, self.column)
    }
}

/// Size of the cube measured in tiles.
///
/// FRONT and BACK faces span `rows x columns`, LEFT and RIGHT span
/// `rows x depth`, TOP and BOTTOM span `depth x columns`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeDimensions {
    rows: u32,
    columns: u32,
    depth: u32,
}

impl CubeDimensions {
    /// Creates a new set of cube dimensions.
    #[must_use]
    pub const fn new(rows: u32, columns: u32, depth: u32) -> Self {
        Self {
            rows,
            columns,
            depth,
        }
    }

    /// Number of tile rows on the FRONT face.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns on the FRONT face.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows on the TOP face.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Grid size of the provided face as `(rows, columns)`.
    #[must_use]
    pub const fn face_size(&self, face: Face) -> (u32, u32) {
        match face {
            Face::Front | Face::Back => (self.rows, self.columns),
            Face::Left | Face::Right => (self.rows, self.depth),
            Face::Top | Face::Bottom => (self.depth, self.columns),
        }
    }

    /// Reports whether the address lies inside the face grid it names.
    #[must_use]
    pub const fn contains(&self, address: TileAddress) -> bool {
        let (rows, columns) = self.face_size(address.face());
        address.row() < rows && address.column() < columns
    }
}

impl fmt::Display for CubeDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.rows, self.columns, self.depth)
    }
}

/// Unique identifier assigned to an invader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvaderId(u32);

impl InvaderId {
    /// Creates a new invader identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Kinds of entity that own a visual representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Static cube tile.
    Tile,
    /// Path-walking attacker.
    Invader,
    /// Tile-mounted tower.
    Defender,
    /// Homing shot.
    Projectile,
}

/// Types of invader that waves may spawn.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum InvaderKind {
    /// Basic walking gnome.
    #[default]
    #[serde(alias = "invader")]
    Gnome,
}

impl InvaderKind {
    /// Lower-case label used when naming spawned invaders.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gnome => "gnome",
        }
    }
}

/// Anything a projectile can damage.
///
/// Both invaders and defenders expose a position and accept attacks, so a
/// projectile stores its target as this tag and resolves it every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Combatant {
    /// An invader walking a path.
    Invader(InvaderId),
    /// A defender mounted on a tile.
    Defender(DefenderId),
}

/// Reference to any live entity owned by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRef {
    /// Invader entity.
    Invader(InvaderId),
    /// Defender entity.
    Defender(DefenderId),
    /// Projectile entity.
    Projectile(ProjectileId),
}

impl EntityRef {
    /// Kind of visual associated with the entity.
    #[must_use]
    pub const fn kind(self) -> EntityKind {
        match self {
            Self::Invader(_) => EntityKind::Invader,
            Self::Defender(_) => EntityKind::Defender,
            Self::Projectile(_) => EntityKind::Projectile,
        }
    }
}

impl From<Combatant> for EntityRef {
    fn from(combatant: Combatant) -> Self {
        match combatant {
            Combatant::Invader(id) => Self::Invader(id),
            Combatant::Defender(id) => Self::Defender(id),
        }
    }
}

/// World-space position and orientation of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Position in world units.
    pub position: Vec3,
    /// Rotation applied to the entity's canonical up-facing model.
    pub orientation: Quat,
}

impl Pose {
    /// Creates a new pose.
    #[must_use]
    pub const fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Pose standing on a surface with the provided outward normal.
    ///
    /// Models are authored with their up axis along positive Y, so the
    /// orientation is the shortest arc rotating Y onto `normal`.
    #[must_use]
    pub fn standing_on(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::from_rotation_arc(Vec3::Y, normal),
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Pauses or resumes every entity owned by the world.
    SetPaused {
        /// Whether entities should skip their updates.
        paused: bool,
    },
    /// Requests that an invader be spawned at the start of a named path.
    SpawnInvader {
        /// Name assigned to the invader and its visual.
        name: String,
        /// Type of invader to spawn.
        kind: InvaderKind,
        /// Name of the path the invader walks.
        path: String,
        /// Per-invader overrides applied on top of the configured defaults.
        options: InvaderOptions,
    },
    /// Places a defender on a tile without charging the store.
    PlaceDefender {
        /// Tile the defender occupies.
        tile: TileAddress,
        /// Per-defender overrides applied on top of the configured defaults.
        options: DefenderOptions,
    },
    /// Buys a defender for the configured cost and places it on a tile.
    PurchaseDefender {
        /// Tile the defender should occupy.
        tile: TileAddress,
    },
    /// Records an invader's new progress along its path.
    MoveInvader {
        /// Identifier of the invader that moved.
        invader: InvaderId,
        /// Continuous distance traveled along the path, in tiles.
        distance_along_path: f32,
        /// Pose derived from the new distance.
        pose: Pose,
    },
    /// Fires a projectile from an attacker toward a target and restarts the
    /// attacker's cooldown.
    FireProjectile {
        /// Entity performing the attack.
        attacker: Combatant,
        /// Entity the projectile homes in on.
        target: Combatant,
    },
    /// Moves a projectile to a new position.
    MoveProjectile {
        /// Identifier of the projectile that moved.
        projectile: ProjectileId,
        /// New projectile position in world units.
        position: Vec3,
    },
    /// Resolves a projectile that reached its target.
    LandProjectile {
        /// Identifier of the projectile that arrived.
        projectile: ProjectileId,
    },
    /// Retires a projectile whose target no longer exists.
    CancelProjectile {
        /// Identifier of the projectile to retire.
        projectile: ProjectileId,
    },
    /// Removes every entity marked for destruction.
    Sweep,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that entities were paused or resumed.
    PauseChanged {
        /// Whether entities are now paused.
        paused: bool,
    },
    /// Confirms that an invader entered the world.
    InvaderSpawned {
        /// Identifier assigned to the invader.
        invader: InvaderId,
        /// Name provided in the spawn request.
        name: String,
        /// Type of the spawned invader.
        kind: InvaderKind,
    },
    /// Reports that an invader spawn request named an unknown path.
    InvaderSpawnRejected {
        /// Name provided in the spawn request.
        name: String,
        /// Path that could not be found.
        path: String,
    },
    /// Confirms that a defender was placed on a tile.
    DefenderPlaced {
        /// Identifier assigned to the defender.
        defender: DefenderId,
        /// Name assigned to the defender and its visual.
        name: String,
        /// Tile the defender occupies.
        tile: TileAddress,
    },
    /// Reports that a defender could not be placed.
    DefenderPlacementRejected {
        /// Tile named in the request.
        tile: TileAddress,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a purchase was refused by the store.
    PurchaseRejected {
        /// Tile named in the request.
        tile: TileAddress,
        /// Balance shortfall details.
        reason: InsufficientFunds,
    },
    /// Confirms that coins were withdrawn from the store.
    CoinsSpent {
        /// Amount withdrawn.
        amount: u32,
        /// Balance after the withdrawal.
        balance: u32,
    },
    /// Confirms that coins were deposited into the store.
    CoinsDeposited {
        /// Amount deposited.
        amount: u32,
        /// Balance after the deposit.
        balance: u32,
    },
    /// Confirms that a projectile was launched.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Entity that performed the attack.
        attacker: Combatant,
        /// Entity the projectile homes in on.
        target: Combatant,
    },
    /// Reports that a projectile delivered its damage.
    AttackLanded {
        /// Projectile that delivered the hit.
        projectile: ProjectileId,
        /// Entity that received the damage.
        target: Combatant,
        /// Damage applied.
        damage: f32,
        /// Health left on the target after the hit.
        remaining_health: f32,
    },
    /// Reports that an entity was marked for destruction.
    EntityMarked {
        /// Entity that will be removed by the next sweep.
        entity: EntityRef,
    },
    /// Confirms that an entity was removed from the world.
    EntityDestroyed {
        /// Entity that was removed.
        entity: EntityRef,
    },
}

/// Total simulated time announced by `TimeAdvanced` events in a batch.
///
/// Returns `None` when the batch did not advance time, which systems treat as
/// a frame with nothing to do.
#[must_use]
pub fn elapsed_time(events: &[Event]) -> Option<Duration> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::TimeAdvanced { dt } => Some(*dt),
            _ => None,
        })
        .reduce(|total, dt| total.saturating_add(dt))
}

/// Immutable representation of a single invader used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct InvaderSnapshot {
    /// Unique identifier assigned to the invader.
    pub id: InvaderId,
    /// Type of the invader.
    pub kind: InvaderKind,
    /// Name of the path the invader walks.
    pub path: String,
    /// Continuous distance traveled along the path, in tiles.
    pub distance_along_path: f32,
    /// Current world pose.
    pub pose: Pose,
    /// Remaining health.
    pub health: f32,
    /// Resolved gameplay attributes.
    pub attributes: InvaderAttributes,
    /// Simulation time of the last fired attack, if any.
    pub last_attack: Option<Duration>,
    /// Indicates whether the invader awaits removal.
    pub marked_for_destruction: bool,
    /// Indicates whether the invader skips its updates.
    pub paused: bool,
}

/// Read-only snapshot describing all invaders within the world.
#[derive(Clone, Debug, Default)]
pub struct InvaderView {
    snapshots: Vec<InvaderSnapshot>,
}

impl InvaderView {
    /// Creates a new invader view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<InvaderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured invader snapshots in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &InvaderSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a specific invader.
    #[must_use]
    pub fn get(&self, id: InvaderId) -> Option<&InvaderSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<InvaderSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single defender used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Unique identifier assigned to the defender.
    pub id: DefenderId,
    /// Tile the defender occupies.
    pub tile: TileAddress,
    /// Current world pose.
    pub pose: Pose,
    /// Remaining health.
    pub health: f32,
    /// Resolved gameplay attributes.
    pub attributes: DefenderAttributes,
    /// Simulation time of the last fired attack, if any.
    pub last_attack: Option<Duration>,
    /// Indicates whether the defender awaits removal.
    pub marked_for_destruction: bool,
    /// Indicates whether the defender skips its updates.
    pub paused: bool,
}

/// Read-only snapshot describing all defenders within the world.
#[derive(Clone, Debug, Default)]
pub struct DefenderView {
    snapshots: Vec<DefenderSnapshot>,
}

impl DefenderView {
    /// Creates a new defender view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<DefenderSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured defender snapshots in placement order.
    pub fn iter(&self) -> impl Iterator<Item = &DefenderSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<DefenderSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Entity the projectile homes in on.
    pub target: Combatant,
    /// Current position in world units.
    pub position: Vec3,
    /// Damage applied on arrival.
    pub damage: f32,
    /// Travel speed in world units per second.
    pub speed: f32,
    /// Indicates whether the projectile awaits removal.
    pub marked_for_destruction: bool,
    /// Indicates whether the projectile skips its updates.
    pub paused: bool,
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in launch order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_sizes_follow_cube_layout() {
        let dimensions = CubeDimensions::new(3, 4, 5);
        assert_eq!(dimensions.face_size(Face::Front), (3, 4));
        assert_eq!(dimensions.face_size(Face::Back), (3, 4));
        assert_eq!(dimensions.face_size(Face::Left), (3, 5));
        assert_eq!(dimensions.face_size(Face::Right), (3, 5));
        assert_eq!(dimensions.face_size(Face::Top), (5, 4));
        assert_eq!(dimensions.face_size(Face::Bottom), (5, 4));
    }

    #[test]
    fn contains_checks_the_named_face() {
        let dimensions = CubeDimensions::new(3, 4, 5);
        assert!(dimensions.contains(TileAddress::new(Face::Top, 4, 3)));
        assert!(!dimensions.contains(TileAddress::new(Face::Front, 4, 3)));
        assert!(!dimensions.contains(TileAddress::new(Face::Left, 0, 5)));
    }

    #[test]
    fn tile_diagonal_matches_cell_size() {
        let expected = (2.0_f32 * 2.05 * 2.05).sqrt();
        assert!((tile_diagonal_length() - expected).abs() < 1e-6);
    }

    #[test]
    fn standing_pose_rotates_up_onto_normal() {
        let pose = Pose::standing_on(Vec3::ZERO, Vec3::NEG_Z);
        let up = pose.orientation * Vec3::Y;
        assert!(up.abs_diff_eq(Vec3::NEG_Z, 1e-5));

        let upside_down = Pose::standing_on(Vec3::ZERO, Vec3::NEG_Y);
        let up = upside_down.orientation * Vec3::Y;
        assert!(up.abs_diff_eq(Vec3::NEG_Y, 1e-5));
    }

    #[test]
    fn elapsed_time_sums_only_time_events() {
        assert_eq!(elapsed_time(&[]), None);
        assert_eq!(
            elapsed_time(&[Event::PauseChanged { paused: false }]),
            None
        );
        let events = [
            Event::TimeAdvanced {
                dt: Duration::from_millis(10),
            },
            Event::PauseChanged { paused: false },
            Event::TimeAdvanced {
                dt: Duration::from_millis(5),
            },
        ];
        assert_eq!(elapsed_time(&events), Some(Duration::from_millis(15)));
    }

    #[test]
    fn combatants_convert_into_entity_refs() {
        let entity = EntityRef::from(Combatant::Defender(DefenderId::new(3)));
        assert_eq!(entity, EntityRef::Defender(DefenderId::new(3)));
        assert_eq!(entity.kind(), EntityKind::Defender);
    }

    #[test]
    fn invader_view_looks_up_by_identifier() {
        let snapshot = |id: u32| InvaderSnapshot {
            id: InvaderId::new(id),
            kind: InvaderKind::Gnome,
            path: "A".to_owned(),
            distance_along_path: 0.0,
            pose: Pose::new(Vec3::ZERO, Quat::IDENTITY),
            health: 100.0,
            attributes: InvaderAttributes::default(),
            last_attack: None,
            marked_for_destruction: false,
            paused: false,
        };
        let view = InvaderView::from_snapshots(vec![snapshot(7), snapshot(2), snapshot(4)]);

        let order: Vec<u32> = view.iter().map(|snapshot| snapshot.id.get()).collect();
        assert_eq!(order, vec![2, 4, 7]);
        assert!(view.get(InvaderId::new(4)).is_some());
        assert!(view.get(InvaderId::new(5)).is_none());
    }
}
