#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands for ready attackers.
//!
//! Invaders shoot at the nearest defender and defenders shoot at the nearest
//! invader. Each attacker fires at most once per cooldown window and only
//! when a target is strictly inside its range.

use std::time::Duration;

use cube_defence_core::{
    elapsed_time, tile_diagonal_length, Combatant, Command, DefenderId, DefenderView, Event,
    InvaderId, InvaderView,
};
use glam::Vec3;
use log::debug;

/// Reports whether an attacker may fire again.
///
/// An attacker that never fired is ready immediately. Otherwise strictly more
/// than `1 / attacks_per_second` seconds must have passed since the last
/// attack. Non-positive rates never fire.
#[must_use]
pub fn attack_ready(
    last_attack: Option<Duration>,
    now: Duration,
    attacks_per_second: f32,
) -> bool {
    if attacks_per_second <= 0.0 {
        return false;
    }
    match last_attack {
        None => true,
        Some(fired_at) => now.saturating_sub(fired_at).as_secs_f32() > 1.0 / attacks_per_second,
    }
}

/// Converts an attack range measured in tiles into world units.
#[must_use]
pub fn attack_range(range_tiles: f32) -> f32 {
    range_tiles * tile_diagonal_length()
}

/// Combat system that queues firing commands for both sides.
#[derive(Debug, Default)]
pub struct Combat {
    scratch: Vec<Command>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` for every ready invader with a
    /// defender in range.
    pub fn handle_invaders<F>(
        &mut self,
        events: &[Event],
        now: Duration,
        invaders: &InvaderView,
        closest_defender: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(Vec3, f32) -> Option<DefenderId>,
    {
        if elapsed_time(events).is_none() {
            return;
        }

        self.scratch.clear();
        for invader in invaders.iter() {
            if invader.paused || invader.marked_for_destruction {
                continue;
            }
            let attributes = &invader.attributes;
            if !attack_ready(invader.last_attack, now, attributes.attacks_per_second) {
                continue;
            }
            let range = attack_range(attributes.attack_range_tiles);
            if let Some(defender) = closest_defender(invader.pose.position, range) {
                debug!("invader {:?} fires at defender {:?}", invader.id, defender);
                self.scratch.push(Command::FireProjectile {
                    attacker: Combatant::Invader(invader.id),
                    target: Combatant::Defender(defender),
                });
            }
        }
        self.flush(out);
    }

    /// Emits `Command::FireProjectile` for every ready defender with an
    /// invader in range.
    pub fn handle_defenders<F>(
        &mut self,
        events: &[Event],
        now: Duration,
        defenders: &DefenderView,
        closest_invader: F,
        out: &mut Vec<Command>,
    ) where
        F: Fn(Vec3, f32) -> Option<InvaderId>,
    {
        if elapsed_time(events).is_none() {
            return;
        }

        self.scratch.clear();
        for defender in defenders.iter() {
            if defender.paused || defender.marked_for_destruction {
                continue;
            }
            let attributes = &defender.attributes;
            if !attack_ready(defender.last_attack, now, attributes.attacks_per_second) {
                continue;
            }
            let range = attack_range(attributes.attack_range_tiles);
            if let Some(invader) = closest_invader(defender.pose.position, range) {
                debug!("defender {:?} fires at invader {:?}", defender.id, invader);
                self.scratch.push(Command::FireProjectile {
                    attacker: Combatant::Defender(defender.id),
                    target: Combatant::Invader(invader),
                });
            }
        }
        self.flush(out);
    }

    fn flush(&mut self, out: &mut Vec<Command>) {
        if self.scratch.is_empty() {
            return;
        }
        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
