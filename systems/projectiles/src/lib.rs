#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that steers homing projectiles toward their targets.

use cube_defence_core::{elapsed_time, Combatant, Command, Event, ProjectileView};
use glam::Vec3;

/// Projectile system that emits move, land and cancel commands.
#[derive(Debug, Default)]
pub struct Projectiles {
    scratch: Vec<Command>,
}

impl Projectiles {
    /// Creates a new projectile system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps every active projectile.
    ///
    /// A projectile whose squared distance to its target is below
    /// `arrival_epsilon` lands. Otherwise it moves `speed * dt` toward the
    /// target's current position, never past it. Projectiles whose target is
    /// gone are cancelled without dealing damage.
    pub fn handle<F>(
        &mut self,
        events: &[Event],
        projectiles: &ProjectileView,
        arrival_epsilon: f32,
        target_position: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(Combatant) -> Option<Vec3>,
    {
        let Some(dt) = elapsed_time(events) else {
            return;
        };
        let dt = dt.as_secs_f32();

        self.scratch.clear();
        for projectile in projectiles.iter() {
            if projectile.paused || projectile.marked_for_destruction {
                continue;
            }
            let Some(target) = target_position(projectile.target) else {
                self.scratch.push(Command::CancelProjectile {
                    projectile: projectile.id,
                });
                continue;
            };

            let heading = target - projectile.position;
            if heading.length_squared() < arrival_epsilon {
                self.scratch.push(Command::LandProjectile {
                    projectile: projectile.id,
                });
                continue;
            }

            let step = projectile.speed * dt;
            let position = if step >= heading.length() {
                target
            } else {
                projectile.position + heading.normalize() * step
            };
            self.scratch.push(Command::MoveProjectile {
                projectile: projectile.id,
                position,
            });
        }

        if self.scratch.is_empty() {
            return;
        }
        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
