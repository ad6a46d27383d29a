//! Cube topology: per-face frames, tiles and address resolution.

use std::{
    collections::BTreeSet,
    f32::consts::{FRAC_PI_2, PI},
};

use cube_defence_core::{
    AddressNotFound, CubeDimensions, DefenderId, Direction, Face, Pose, TileAddress, CELL_HEIGHT,
    CELL_WIDTH, HALF_CELL_HEIGHT, HALF_CELL_WIDTH, TILE_DEPTH,
};
use glam::{Quat, Vec3};

/// Describes how one face's 2-D grid embeds into the cube surface.
///
/// Grid-local X grows with the column index and grid-local Y shrinks with the
/// row index. The rotation carries those local axes onto the face, after which
/// the grid is pushed outward along the normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceFrame {
    face: Face,
    normal: Vec3,
    rotation: Quat,
}

impl FaceFrame {
    /// Frame of the provided face.
    #[must_use]
    pub fn of(face: Face) -> Self {
        let (normal, rotation) = match face {
            Face::Front => (Vec3::NEG_Z, Quat::IDENTITY),
            Face::Back => (Vec3::Z, Quat::from_rotation_y(PI)),
            Face::Left => (Vec3::NEG_X, Quat::from_rotation_y(FRAC_PI_2)),
            Face::Right => (Vec3::X, Quat::from_rotation_y(-FRAC_PI_2)),
            Face::Top => (Vec3::Y, Quat::from_rotation_x(FRAC_PI_2)),
            Face::Bottom => (Vec3::NEG_Y, Quat::from_rotation_x(-FRAC_PI_2)),
        };
        Self {
            face,
            normal,
            rotation,
        }
    }

    /// Face described by the frame.
    #[must_use]
    pub const fn face(&self) -> Face {
        self.face
    }

    /// Outward unit normal of the face.
    #[must_use]
    pub const fn normal(&self) -> Vec3 {
        self.normal
    }

    /// World direction of increasing column index.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// World direction of decreasing row index.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Center of the tile mesh at the provided grid coordinates.
    #[must_use]
    pub fn centroid(&self, dimensions: CubeDimensions, row: u32, column: u32) -> Vec3 {
        let (rows, columns) = dimensions.face_size(self.face);
        let local = Vec3::new(
            (column as f32 + 0.5 - columns as f32 / 2.0) * CELL_WIDTH,
            (rows as f32 / 2.0 - row as f32 - 0.5) * CELL_HEIGHT,
            0.0,
        );
        self.rotation * local + self.normal * (self.half_extent(dimensions) + TILE_DEPTH)
    }

    /// Offset from a surface center to the middle of the named edge.
    #[must_use]
    pub fn edge_offset(&self, direction: Direction) -> Vec3 {
        match direction {
            Direction::Up => self.up() * HALF_CELL_HEIGHT,
            Direction::Down => -self.up() * HALF_CELL_HEIGHT,
            Direction::Left => -self.right() * HALF_CELL_WIDTH,
            Direction::Right => self.right() * HALF_CELL_WIDTH,
        }
    }

    /// Edge facing the provided world-space displacement.
    ///
    /// The dominant in-plane component decides; ties resolve vertically.
    #[must_use]
    pub fn edge_toward(&self, displacement: Vec3) -> Direction {
        let horizontal = displacement.dot(self.right());
        let vertical = displacement.dot(self.up());
        if horizontal.abs() > vertical.abs() {
            if horizontal < 0.0 {
                Direction::Left
            } else {
                Direction::Right
            }
        } else if vertical < 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    fn half_extent(&self, dimensions: CubeDimensions) -> f32 {
        match self.face {
            Face::Front | Face::Back => dimensions.depth() as f32 * HALF_CELL_WIDTH,
            Face::Left | Face::Right => dimensions.columns() as f32 * HALF_CELL_WIDTH,
            Face::Top | Face::Bottom => dimensions.rows() as f32 * HALF_CELL_HEIGHT,
        }
    }
}

/// A single placeable cell on the cube surface.
#[derive(Clone, Debug)]
pub struct Tile {
    address: TileAddress,
    frame: FaceFrame,
    centroid: Vec3,
    surface_center: Vec3,
    edge_centers: [Vec3; 4],
    on_path: bool,
    occupant: Option<DefenderId>,
}

impl Tile {
    fn new(dimensions: CubeDimensions, address: TileAddress, on_path: bool) -> Self {
        let frame = FaceFrame::of(address.face());
        let centroid = frame.centroid(dimensions, address.row(), address.column());
        let surface_center = centroid + frame.normal() * TILE_DEPTH;
        let edge_centers =
            Direction::ALL.map(|direction| surface_center + frame.edge_offset(direction));
        Self {
            address,
            frame,
            centroid,
            surface_center,
            edge_centers,
            on_path,
            occupant: None,
        }
    }

    /// Address identifying the tile.
    #[must_use]
    pub const fn address(&self) -> TileAddress {
        self.address
    }

    /// Center of the tile mesh.
    #[must_use]
    pub const fn centroid(&self) -> Vec3 {
        self.centroid
    }

    /// Center of the walkable top surface.
    #[must_use]
    pub const fn surface_center(&self) -> Vec3 {
        self.surface_center
    }

    /// Outward unit normal of the owning face.
    #[must_use]
    pub const fn normal(&self) -> Vec3 {
        self.frame.normal()
    }

    /// Middle of the named edge on the walkable surface.
    #[must_use]
    pub fn edge_center(&self, direction: Direction) -> Vec3 {
        self.edge_centers[edge_slot(direction)]
    }

    /// Edge of this tile that faces `other`.
    #[must_use]
    pub fn coincident_edge(&self, other: &Tile) -> Direction {
        self.frame
            .edge_toward(other.surface_center - self.surface_center)
    }

    /// Middle of the edge of this tile that faces `other`.
    #[must_use]
    pub fn coincident_edge_center(&self, other: &Tile) -> Vec3 {
        self.edge_center(self.coincident_edge(other))
    }

    /// Reports whether any path runs across the tile.
    #[must_use]
    pub const fn is_part_of_path(&self) -> bool {
        self.on_path
    }

    /// Defender mounted on the tile, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<DefenderId> {
        self.occupant
    }

    /// Pose of something standing on the middle of the tile.
    #[must_use]
    pub fn standing_pose(&self) -> Pose {
        Pose::standing_on(self.surface_center, self.normal())
    }

    pub(crate) fn set_occupant(&mut self, occupant: Option<DefenderId>) {
        self.occupant = occupant;
    }
}

fn edge_slot(direction: Direction) -> usize {
    match direction {
        Direction::Up => 0,
        Direction::Down => 1,
        Direction::Left => 2,
        Direction::Right => 3,
    }
}

fn face_slot(face: Face) -> usize {
    match face {
        Face::Front => 0,
        Face::Back => 1,
        Face::Left => 2,
        Face::Right => 3,
        Face::Top => 4,
        Face::Bottom => 5,
    }
}

/// Complete mapping from tile address to tile for all six faces.
#[derive(Clone, Debug)]
pub struct Cube {
    dimensions: CubeDimensions,
    faces: [Vec<Tile>; 6],
}

impl Cube {
    /// Builds every tile of every face, flagging the provided path tiles.
    ///
    /// Path addresses outside the cube are ignored here; the world rejects
    /// them before construction.
    #[must_use]
    pub fn new(dimensions: CubeDimensions, path_tiles: &BTreeSet<TileAddress>) -> Self {
        let faces = Face::ALL.map(|face| {
            let (rows, columns) = dimensions.face_size(face);
            let mut tiles = Vec::with_capacity(row_major_index(rows, 0, columns));
            for row in 0..rows {
                for column in 0..columns {
                    let address = TileAddress::new(face, row, column);
                    tiles.push(Tile::new(
                        dimensions,
                        address,
                        path_tiles.contains(&address),
                    ));
                }
            }
            tiles
        });
        Self { dimensions, faces }
    }

    /// Size of the cube measured in tiles.
    #[must_use]
    pub const fn dimensions(&self) -> CubeDimensions {
        self.dimensions
    }

    /// Resolves an address to its tile.
    pub fn tile(&self, address: TileAddress) -> Result<&Tile, AddressNotFound> {
        let index = self.index(address)?;
        Ok(&self.faces[face_slot(address.face())][index])
    }

    pub(crate) fn tile_mut(&mut self, address: TileAddress) -> Result<&mut Tile, AddressNotFound> {
        let index = self.index(address)?;
        Ok(&mut self.faces[face_slot(address.face())][index])
    }

    /// Iterator over every tile, face by face in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.faces.iter().flatten()
    }

    fn index(&self, address: TileAddress) -> Result<usize, AddressNotFound> {
        if !self.dimensions.contains(address) {
            return Err(AddressNotFound::Cube {
                dimensions: self.dimensions,
                address,
            });
        }
        let (_, columns) = self.dimensions.face_size(address.face());
        Ok(row_major_index(address.row(), address.column(), columns))
    }
}

fn row_major_index(row: u32, column: u32, columns: u32) -> usize {
    row as usize * columns as usize + column as usize
}
