//! Error conditions raised by cube, path, wave and store operations.

use thiserror::Error;

use crate::{CubeDimensions, DefenderId, TileAddress};

/// Raised when a tile lookup falls outside the valid bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum AddressNotFound {
    /// The address lies outside the grid of the face it names.
    #[error("cube of size {dimensions} doesn't contain a tile at {address}")]
    Cube {
        /// Dimensions of the cube that was queried.
        dimensions: CubeDimensions,
        /// Offending address.
        address: TileAddress,
    },
    /// The index lies outside `[0, length)`.
    #[error("path of length {length} doesn't contain a tile at {index}")]
    Path {
        /// Number of tiles in the path.
        length: usize,
        /// Offending index.
        index: usize,
    },
}

/// Raised when a wave names a path the level does not declare.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Error)]
#[error("no path `{path}` exists for wave {wave}, subwave {sub_wave}")]
pub struct PathNotFound {
    /// Identifier of the offending wave.
    pub wave: String,
    /// Zero-based index of the offending subwave.
    pub sub_wave: usize,
    /// Path name that could not be resolved.
    pub path: String,
}

/// Raised when a purchase costs more than the store holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("insufficient funds: balance {balance} is below cost {cost}")]
pub struct InsufficientFunds {
    /// Balance at the time of the purchase.
    pub balance: u32,
    /// Price that was requested.
    pub cost: u32,
}

/// Reasons a defender placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum PlacementError {
    /// The requested tile does not exist.
    #[error(transparent)]
    OutOfBounds(#[from] AddressNotFound),
    /// The requested tile belongs to an invader path.
    #[error("tile {0} is part of a path")]
    OnPath(TileAddress),
    /// The requested tile already hosts a defender.
    #[error("tile {tile} is already occupied by {defender:?}")]
    Occupied {
        /// Requested tile.
        tile: TileAddress,
        /// Defender currently on the tile.
        defender: DefenderId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Face;

    #[test]
    fn cube_error_names_dimensions_and_address() {
        let error = AddressNotFound::Cube {
            dimensions: CubeDimensions::new(10, 10, 10),
            address: TileAddress::new(Face::Left, 3, 12),
        };
        assert_eq!(
            error.to_string(),
            "cube of size 10x10x10 doesn't contain a tile at (LEFT, 3, 12)"
        );
    }

    #[test]
    fn path_not_found_names_wave_and_subwave() {
        let error = PathNotFound {
            wave: "2".to_owned(),
            sub_wave: 1,
            path: "Z".to_owned(),
        };
        assert_eq!(error.to_string(), "no path `Z` exists for wave 2, subwave 1");
    }
}
