#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks invaders along their paths.

use cube_defence_core::{elapsed_time, Command, Event, InvaderView};
use cube_defence_world::{Cube, PathTable};
use log::warn;

/// Pure system that reacts to world events and emits movement commands.
#[derive(Debug, Default)]
pub struct Movement {
    scratch: Vec<Command>,
}

impl Movement {
    /// Creates a new movement system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every active invader by `speed * dt` tiles.
    ///
    /// Distances wrap around the path length, so invaders loop forever until
    /// they are destroyed. Paused and marked invaders stay where they are.
    pub fn handle(
        &mut self,
        events: &[Event],
        invaders: &InvaderView,
        paths: &PathTable,
        cube: &Cube,
        out: &mut Vec<Command>,
    ) {
        let Some(dt) = elapsed_time(events) else {
            return;
        };
        let dt = dt.as_secs_f32();

        self.scratch.clear();
        for invader in invaders.iter() {
            if invader.paused || invader.marked_for_destruction {
                continue;
            }
            let Some(path) = paths.get(&invader.path) else {
                warn!("invader {:?} walks unknown path `{}`", invader.id, invader.path);
                continue;
            };

            let distance = path.advance(
                invader.distance_along_path,
                invader.attributes.speed_tiles_per_second * dt,
            );
            match path.pose_at(cube, distance) {
                Ok(pose) => self.scratch.push(Command::MoveInvader {
                    invader: invader.id,
                    distance_along_path: distance,
                    pose,
                }),
                Err(error) => warn!("invader {:?} left its path: {error}", invader.id),
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, time::Duration};

    use cube_defence_core::{
        CubeDimensions, Defaults, Face, InvaderAttributes, InvaderId, InvaderKind,
        InvaderSnapshot, Pose, TileAddress,
    };
    use cube_defence_world::{query, World};
    use glam::{Quat, Vec3};

    use super::*;

    fn world() -> World {
        let mut paths = BTreeMap::new();
        let _ = paths.insert(
            "A".to_owned(),
            (0..3)
                .map(|column| TileAddress::new(Face::Front, 0, column))
                .collect::<Vec<_>>(),
        );
        World::new(CubeDimensions::new(3, 3, 3), &paths, Defaults::default()).expect("world")
    }

    fn snapshot(id: u32, distance: f32, paused: bool) -> InvaderSnapshot {
        InvaderSnapshot {
            id: InvaderId::new(id),
            kind: InvaderKind::Gnome,
            path: "A".to_owned(),
            distance_along_path: distance,
            pose: Pose::new(Vec3::ZERO, Quat::IDENTITY),
            health: 100.0,
            attributes: InvaderAttributes::default(),
            last_attack: None,
            marked_for_destruction: false,
            paused,
        }
    }

    #[test]
    fn frames_without_time_are_ignored() {
        let world = world();
        let view = InvaderView::from_snapshots(vec![snapshot(0, 0.0, false)]);
        let mut out = Vec::new();

        Movement::new().handle(
            &[Event::PauseChanged { paused: false }],
            &view,
            query::paths(&world),
            query::cube(&world),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn paused_invaders_do_not_move() {
        let world = world();
        let view = InvaderView::from_snapshots(vec![
            snapshot(0, 0.5, true),
            snapshot(1, 2.75, false),
        ]);
        let mut out = Vec::new();

        Movement::new().handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(500),
            }],
            &view,
            query::paths(&world),
            query::cube(&world),
            &mut out,
        );

        assert_eq!(out.len(), 1);
        let Command::MoveInvader {
            invader,
            distance_along_path,
            ..
        } = &out[0]
        else {
            panic!("expected a move command, got {:?}", out[0]);
        };
        assert_eq!(*invader, InvaderId::new(1));
        assert!((distance_along_path - 0.25).abs() < 1e-5);
    }

    #[test]
    fn unknown_paths_are_skipped() {
        let world = world();
        let mut lost = snapshot(0, 0.0, false);
        lost.path = "Z".to_owned();
        let view = InvaderView::from_snapshots(vec![lost]);
        let mut out = Vec::new();

        Movement::new().handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(10),
            }],
            &view,
            query::paths(&world),
            query::cube(&world),
            &mut out,
        );

        assert!(out.is_empty());
    }
}
