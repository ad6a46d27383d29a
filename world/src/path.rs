//! Named cyclic tile sequences walked by invaders.

use std::collections::BTreeMap;

use cube_defence_core::{AddressNotFound, Pose, TileAddress};

use crate::{cube::Cube, WorldError};

/// Ordered, cyclic sequence of tiles resolved against a single cube.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    name: String,
    addresses: Vec<TileAddress>,
}

impl Path {
    /// Resolves every address against the cube.
    pub(crate) fn new(
        name: &str,
        addresses: &[TileAddress],
        cube: &Cube,
    ) -> Result<Self, WorldError> {
        if addresses.is_empty() {
            return Err(WorldError::EmptyPath {
                name: name.to_owned(),
            });
        }
        for address in addresses {
            let _ = cube.tile(*address).map_err(|source| WorldError::Address {
                name: name.to_owned(),
                source,
            })?;
        }
        Ok(Self {
            name: name.to_owned(),
            addresses: addresses.to_vec(),
        })
    }

    /// Name the path was declared under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of tiles in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Paths always hold at least one tile.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Tile addresses in walking order.
    #[must_use]
    pub fn addresses(&self) -> &[TileAddress] {
        &self.addresses
    }

    /// Address at `index`.
    pub fn get(&self, index: usize) -> Result<TileAddress, AddressNotFound> {
        self.addresses
            .get(index)
            .copied()
            .ok_or(AddressNotFound::Path {
                length: self.len(),
                index,
            })
    }

    /// Address preceding `index`, wrapping from the first tile to the last.
    pub fn previous(&self, index: usize) -> Result<TileAddress, AddressNotFound> {
        if index == 0 {
            self.get(self.len() - 1)
        } else {
            self.get(index - 1)
        }
    }

    /// Address following `index`, wrapping from the last tile to the first.
    pub fn next(&self, index: usize) -> Result<TileAddress, AddressNotFound> {
        if index + 1 == self.len() {
            self.get(0)
        } else {
            self.get(index + 1)
        }
    }

    /// Distance reached after walking `tiles` further from `distance`.
    ///
    /// The result always lies in `[0, len)`.
    #[must_use]
    pub fn advance(&self, distance: f32, tiles: f32) -> f32 {
        let length = self.len() as f32;
        let wrapped = (distance + tiles).rem_euclid(length);
        if wrapped >= length {
            0.0
        } else {
            wrapped
        }
    }

    /// Pose of a walker `distance` tiles along the path.
    ///
    /// The walker crosses the current tile in a straight line from the edge
    /// shared with the previous tile to the edge shared with the next one.
    pub fn pose_at(&self, cube: &Cube, distance: f32) -> Result<Pose, AddressNotFound> {
        let index = distance.max(0.0).floor() as usize;
        let current = cube.tile(self.get(index)?)?;
        let previous = cube.tile(self.previous(index)?)?;
        let next = cube.tile(self.next(index)?)?;

        let entry = current.coincident_edge_center(previous);
        let exit = current.coincident_edge_center(next);
        let position = entry.lerp(exit, distance.fract());
        Ok(Pose::standing_on(position, current.normal()))
    }
}

/// Every path declared by a level, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct PathTable {
    paths: BTreeMap<String, Path>,
}

impl PathTable {
    pub(crate) fn new(
        declared: &BTreeMap<String, Vec<TileAddress>>,
        cube: &Cube,
    ) -> Result<Self, WorldError> {
        let mut paths = BTreeMap::new();
        for (name, addresses) in declared {
            let _ = paths.insert(name.clone(), Path::new(name, addresses, cube)?);
        }
        Ok(Self { paths })
    }

    /// Path declared under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Path> {
        self.paths.get(name)
    }

    /// Reports whether a path named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.paths.contains_key(name)
    }

    /// Iterator over every path in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.values()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use cube_defence_core::{CubeDimensions, Face};
    use glam::Vec3;

    use super::*;

    fn setup() -> (Cube, Path) {
        let addresses: Vec<TileAddress> = (0..5)
            .map(|column| TileAddress::new(Face::Front, 2, column))
            .collect();
        let tiles: BTreeSet<TileAddress> = addresses.iter().copied().collect();
        let cube = Cube::new(CubeDimensions::new(5, 5, 5), &tiles);
        let path = Path::new("row", &addresses, &cube).expect("valid path");
        (cube, path)
    }

    #[test]
    fn neighbours_wrap_around_the_ends() {
        let (_, path) = setup();
        assert_eq!(path.previous(0), path.get(4));
        assert_eq!(path.next(4), path.get(0));
        assert_eq!(path.next(1), path.get(2));
        assert_eq!(
            path.get(5),
            Err(AddressNotFound::Path {
                length: 5,
                index: 5
            })
        );
    }

    #[test]
    fn advancing_wraps_into_range() {
        let (_, path) = setup();
        assert!((path.advance(4.5, 1.0) - 0.5).abs() < 1e-5);
        assert!((path.advance(1.0, 2.25) - 3.25).abs() < 1e-5);
        assert!(path.advance(0.0, 5.0).abs() < 1e-5);
    }

    #[test]
    fn pose_interpolates_between_shared_edges() {
        let (cube, path) = setup();
        let tile = cube.tile(path.get(2).expect("index")).expect("tile");

        let at_entry = path.pose_at(&cube, 2.0).expect("pose");
        let midway = path.pose_at(&cube, 2.5).expect("pose");

        assert!(at_entry
            .position
            .abs_diff_eq(tile.surface_center() - Vec3::X * 1.025, 1e-4));
        assert!(midway.position.abs_diff_eq(tile.surface_center(), 1e-4));
        assert!((midway.orientation * Vec3::Y).abs_diff_eq(Vec3::NEG_Z, 1e-4));
    }

    #[test]
    fn empty_and_out_of_bounds_paths_are_rejected() {
        let cube = Cube::new(CubeDimensions::new(2, 2, 2), &BTreeSet::new());
        assert_eq!(
            Path::new("empty", &[], &cube),
            Err(WorldError::EmptyPath {
                name: "empty".to_owned()
            })
        );

        let outside = TileAddress::new(Face::Back, 0, 2);
        assert_eq!(
            Path::new("outside", &[outside], &cube),
            Err(WorldError::Address {
                name: "outside".to_owned(),
                source: AddressNotFound::Cube {
                    dimensions: CubeDimensions::new(2, 2, 2),
                    address: outside,
                },
            })
        );
    }
}
