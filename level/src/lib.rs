#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Level orchestration: owns the world, its waves and systems, and drives
//! them through one frame per [`Level::tick`].
//!
//! Each frame runs its passes in a fixed order: the clock advances, released
//! waves spawn due invaders, projectiles home in and land, invaders attack and
//! walk, defenders attack, the win condition is checked, and finally every
//! entity marked for destruction is swept. An entity that dies during a frame
//! stays queryable until that final sweep.

use std::time::Duration;

use cube_defence_core::{
    Command, Defaults, Event, InsufficientFunds, LevelSpec, PathNotFound, PlacementError,
    TileAddress,
};
use cube_defence_system_combat::Combat;
use cube_defence_system_movement::Movement;
use cube_defence_system_projectiles::Projectiles;
use cube_defence_system_waves::Wave;
use cube_defence_world::{self as world, query, World, WorldError};
use log::info;
use thiserror::Error;

/// Reasons a level cannot be loaded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LevelError {
    /// The cube or its paths are malformed.
    #[error(transparent)]
    World(#[from] WorldError),
    /// A wave references a path the level does not declare.
    #[error(transparent)]
    PathNotFound(#[from] PathNotFound),
}

/// Reasons a defender purchase was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The tile cannot host a defender.
    #[error(transparent)]
    Placement(#[from] PlacementError),
    /// The store cannot cover the defender cost.
    #[error(transparent)]
    Funds(#[from] InsufficientFunds),
}

/// A playable level.
#[derive(Debug)]
pub struct Level {
    world: World,
    waves: Vec<Wave>,
    released_waves: usize,
    started: bool,
    paused: bool,
    won: bool,
    play_time: Duration,
    movement: Movement,
    combat: Combat,
    projectiles: Projectiles,
    journal: Vec<Event>,
}

impl Level {
    /// Builds the world and every wave of the level.
    ///
    /// Loading aborts on the first malformed path or unknown path reference.
    pub fn new(spec: &LevelSpec, defaults: Defaults) -> Result<Self, LevelError> {
        let world = World::from_spec(spec, defaults)?;
        let waves = spec
            .waves
            .iter()
            .map(|wave| Wave::new(wave, query::paths(&world)))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            "loaded level on a {} cube with {} waves",
            spec.cube,
            waves.len()
        );

        Ok(Self {
            world,
            waves,
            released_waves: 0,
            started: false,
            paused: false,
            won: false,
            play_time: Duration::ZERO,
            movement: Movement::new(),
            combat: Combat::new(),
            projectiles: Projectiles::new(),
            journal: Vec::new(),
        })
    }

    /// Starts the level and releases its first wave.
    ///
    /// Starting an already started level has no effect.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        info!("level started");
        self.started = true;
        self.set_paused(false);
        let _ = self.release_next_wave();
    }

    /// Releases the next wave, returning whether one was left to release.
    ///
    /// Does nothing before the level has started.
    pub fn start_next_wave(&mut self) -> bool {
        if !self.started {
            return false;
        }
        self.release_next_wave()
    }

    fn release_next_wave(&mut self) -> bool {
        let Some(wave) = self.waves.get_mut(self.released_waves) else {
            return false;
        };
        wave.start();
        wave.set_paused(self.paused);
        self.released_waves += 1;
        true
    }

    /// Pauses or resumes the waves and every entity of the world.
    pub fn set_paused(&mut self, paused: bool) {
        let mut events = Vec::new();
        self.pause_all(paused, &mut events);
        self.journal.append(&mut events);
    }

    fn pause_all(&mut self, paused: bool, events: &mut Vec<Event>) {
        self.paused = paused;
        for wave in &mut self.waves {
            wave.set_paused(paused);
        }
        world::apply(&mut self.world, Command::SetPaused { paused }, events);
    }

    /// Buys a defender and places it on `tile`.
    ///
    /// Placement is validated before the store is charged, so a refused
    /// purchase never costs coins.
    pub fn purchase_defender(&mut self, tile: TileAddress) -> Result<(), PurchaseError> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::PurchaseDefender { tile }, &mut events);
        let outcome = events
            .iter()
            .find_map(|event| match event {
                Event::DefenderPlacementRejected { reason, .. } => {
                    Some(PurchaseError::Placement(*reason))
                }
                Event::PurchaseRejected { reason, .. } => Some(PurchaseError::Funds(*reason)),
                _ => None,
            })
            .map_or(Ok(()), Err);
        self.journal.append(&mut events);
        if outcome.is_ok() {
            info!(
                "bought a defender on {tile}; {} coins left",
                query::coin_balance(&self.world)
            );
        }
        outcome
    }

    /// Runs one frame of `dt` simulated time.
    ///
    /// Returns every event produced since the previous call, including those
    /// caused by player actions between frames.
    pub fn tick(&mut self, dt: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        let frame = events.clone();

        if !self.paused {
            if self.started {
                self.run_waves(&frame, &mut events);
            }
            self.run_entities(&frame, &mut events);
            if self.started {
                self.check_for_win(&mut events);
                self.play_time = self.play_time.saturating_add(dt);
            }
        }

        world::apply(&mut self.world, Command::Sweep, &mut events);
        self.journal.append(&mut events);
        std::mem::take(&mut self.journal)
    }

    fn run_waves(&mut self, frame: &[Event], events: &mut Vec<Event>) {
        let mut commands = Vec::new();
        for wave in &mut self.waves[..self.released_waves] {
            wave.handle(frame, &mut commands);
        }
        if commands.is_empty() {
            return;
        }

        let mut spawned = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut spawned);
        }
        for wave in &mut self.waves[..self.released_waves] {
            wave.handle(&spawned, &mut Vec::new());
        }
        events.append(&mut spawned);
    }

    fn run_entities(&mut self, frame: &[Event], events: &mut Vec<Event>) {
        let mut commands = Vec::new();
        self.projectiles.handle(
            frame,
            &query::projectile_view(&self.world),
            query::defaults(&self.world).projectile_arrival_epsilon,
            |target| query::combatant_position(&self.world, target),
            &mut commands,
        );
        self.apply_all(commands, events);

        let now = query::now(&self.world);
        let mut commands = Vec::new();
        self.combat.handle_invaders(
            frame,
            now,
            &query::invader_view(&self.world),
            |point, range| query::closest_defender(&self.world, point, Some(range)),
            &mut commands,
        );
        self.movement.handle(
            frame,
            &query::invader_view(&self.world),
            query::paths(&self.world),
            query::cube(&self.world),
            &mut commands,
        );
        self.apply_all(commands, events);

        let mut commands = Vec::new();
        self.combat.handle_defenders(
            frame,
            now,
            &query::defender_view(&self.world),
            |point, range| query::closest_invader(&self.world, point, Some(range)),
            &mut commands,
        );
        self.apply_all(commands, events);
    }

    fn apply_all(&mut self, commands: Vec<Command>, events: &mut Vec<Event>) {
        for command in commands {
            world::apply(&mut self.world, command, events);
        }
    }

    fn check_for_win(&mut self, events: &mut Vec<Event>) {
        if self.won || self.released_waves < self.waves.len() {
            return;
        }
        let invaders = query::invader_view(&self.world);
        if !self.waves.iter().all(|wave| wave.is_complete(&invaders)) {
            return;
        }
        self.won = true;
        info!("level won after {:.1}s", self.play_time.as_secs_f32());
        self.pause_all(true, events);
    }

    /// Authoritative world state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Waves of the level in release order.
    #[must_use]
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    /// Number of waves released so far.
    #[must_use]
    pub const fn released_waves(&self) -> usize {
        self.released_waves
    }

    /// Reports whether the level has started.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Reports whether the level is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Reports whether every wave was released and cleared.
    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.won
    }

    /// Unpaused time elapsed since the level started.
    #[must_use]
    pub const fn play_time(&self) -> Duration {
        self.play_time
    }

    /// Current store balance.
    #[must_use]
    pub fn coin_balance(&self) -> u32 {
        query::coin_balance(&self.world)
    }
}
