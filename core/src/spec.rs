//! Declarative level configuration consumed at level construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CubeDimensions, InvaderKind, InvaderOptions, TileAddress};

/// Complete description of a playable level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Size of the cube the level is played on.
    pub cube: CubeDimensions,
    /// Named, cyclic tile sequences invaders walk.
    #[serde(default)]
    pub paths: BTreeMap<String, Vec<TileAddress>>,
    /// Waves released one at a time by the player.
    #[serde(default)]
    pub waves: Vec<WaveSpec>,
}

/// Ordered sequence of subwave stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WaveSpec {
    /// Identifier used in invader names and error messages.
    pub id: String,
    /// Stages released in order once the wave starts.
    #[serde(default)]
    pub sub_waves: Vec<SubWaveSpec>,
}

/// Timed batch-spawn stage within a wave.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubWaveSpec {
    /// Seconds that must pass before the stage is released.
    ///
    /// Measured from the moment the wave started, not from the release of the
    /// previous stage.
    #[serde(default)]
    pub seconds_delay: f32,
    /// Invader batches spawned when the stage is released.
    #[serde(default)]
    pub invaders: Vec<SubWaveInvaderSpec>,
}

/// Batch of identical invaders spawned onto one path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubWaveInvaderSpec {
    /// Type of invader to spawn.
    #[serde(default)]
    pub kind: InvaderKind,
    /// Name of the path the batch walks.
    pub path: String,
    /// Number of invaders in the batch.
    pub count: u32,
    /// Overrides applied to every invader of the batch.
    #[serde(default)]
    pub options: InvaderOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Face;

    #[test]
    fn level_spec_parses_from_toml() {
        let spec: LevelSpec = toml::from_str(
            r#"
            cube = { rows = 10, columns = 10, depth = 10 }

            [paths]
            A = [
                { face = "FRONT", row = 0, column = 0 },
                { face = "TOP", row = 9, column = 0 },
                { face = "LEFT", row = 0, column = 9 },
            ]

            [[waves]]
            id = "1"

            [[waves.sub_waves]]
            seconds_delay = 0.0
            invaders = [{ kind = "invader", path = "A", count = 2 }]

            [[waves.sub_waves]]
            seconds_delay = 10.0
            invaders = [{ path = "A", count = 1, options = { health = 250.0 } }]
            "#,
        )
        .expect("parse level");

        assert_eq!(spec.cube, CubeDimensions::new(10, 10, 10));
        assert_eq!(spec.paths["A"][1], TileAddress::new(Face::Top, 9, 0));
        assert_eq!(spec.waves.len(), 1);

        let sub_waves = &spec.waves[0].sub_waves;
        assert_eq!(sub_waves.len(), 2);
        assert_eq!(sub_waves[0].invaders[0].kind, InvaderKind::Gnome);
        assert_eq!(sub_waves[0].invaders[0].count, 2);
        assert_eq!(sub_waves[1].invaders[0].options.health, Some(250.0));
    }
}
