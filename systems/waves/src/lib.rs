#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Timed release of invader batches and wave completion tracking.

use std::collections::BTreeMap;

use cube_defence_core::{
    elapsed_time, Command, Event, InvaderId, InvaderKind, InvaderOptions, InvaderView,
    PathNotFound, WaveSpec,
};
use cube_defence_world::PathTable;
use log::{debug, info};

/// Lifecycle of a wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveState {
    /// Built but not yet started.
    Idle,
    /// Started; subwaves are still pending.
    Running,
    /// Every subwave has been released.
    Released,
}

#[derive(Clone, Debug)]
struct PendingSpawn {
    name: String,
    kind: InvaderKind,
    path: String,
    options: InvaderOptions,
}

#[derive(Clone, Debug)]
struct SubWave {
    seconds_delay: f32,
    spawns: Vec<PendingSpawn>,
}

/// Ordered sequence of timed subwaves.
///
/// Delays are measured from the moment the wave started. At most one subwave
/// is released per frame, and only once strictly more time than its delay has
/// elapsed.
#[derive(Clone, Debug)]
pub struct Wave {
    id: String,
    sub_waves: Vec<SubWave>,
    state: WaveState,
    paused: bool,
    elapsed_seconds: f32,
    next_sub_wave: usize,
    invaders: BTreeMap<String, Option<InvaderId>>,
}

impl Wave {
    /// Builds a wave, checking that every referenced path exists.
    ///
    /// Invader names take the form `{wave}-{kind}-{index}` where the index
    /// runs across the whole wave, so names never repeat within it.
    pub fn new(spec: &WaveSpec, paths: &PathTable) -> Result<Self, PathNotFound> {
        let mut index = 0_u32;
        let mut sub_waves = Vec::with_capacity(spec.sub_waves.len());
        for (sub_wave, sub_spec) in spec.sub_waves.iter().enumerate() {
            let mut spawns = Vec::new();
            for batch in &sub_spec.invaders {
                if !paths.contains(&batch.path) {
                    return Err(PathNotFound {
                        wave: spec.id.clone(),
                        sub_wave,
                        path: batch.path.clone(),
                    });
                }
                for _ in 0..batch.count {
                    spawns.push(PendingSpawn {
                        name: format!("{}-{}-{}", spec.id, batch.kind.label(), index),
                        kind: batch.kind,
                        path: batch.path.clone(),
                        options: batch.options,
                    });
                    index += 1;
                }
            }
            sub_waves.push(SubWave {
                seconds_delay: sub_spec.seconds_delay,
                spawns,
            });
        }

        Ok(Self {
            id: spec.id.clone(),
            sub_waves,
            state: WaveState::Idle,
            paused: false,
            elapsed_seconds: 0.0,
            next_sub_wave: 0,
            invaders: BTreeMap::new(),
        })
    }

    /// Identifier of the wave.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> WaveState {
        self.state
    }

    /// Number of subwaves released so far.
    #[must_use]
    pub const fn released_sub_waves(&self) -> usize {
        self.next_sub_wave
    }

    /// Starts the wave clock and unpauses the wave.
    ///
    /// Starting a wave that already started has no effect.
    pub fn start(&mut self) {
        if self.state != WaveState::Idle {
            return;
        }
        info!("wave {} started", self.id);
        self.elapsed_seconds = 0.0;
        self.paused = false;
        self.state = if self.sub_waves.is_empty() {
            WaveState::Released
        } else {
            WaveState::Running
        };
    }

    /// Freezes or resumes the wave clock.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Reports whether the wave clock is frozen.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Records spawned invaders and releases the next due subwave.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::InvaderSpawned { invader, name, .. } => {
                    if let Some(slot) = self.invaders.get_mut(name) {
                        *slot = Some(*invader);
                    }
                }
                Event::InvaderSpawnRejected { name, .. } => {
                    let _ = self.invaders.remove(name);
                }
                _ => {}
            }
        }

        if self.state != WaveState::Running || self.paused {
            return;
        }
        let Some(dt) = elapsed_time(events) else {
            return;
        };
        self.elapsed_seconds += dt.as_secs_f32();

        let Some(sub_wave) = self.sub_waves.get(self.next_sub_wave) else {
            self.state = WaveState::Released;
            return;
        };
        if self.elapsed_seconds <= sub_wave.seconds_delay {
            return;
        }

        debug!(
            "wave {} releases subwave {} with {} invaders",
            self.id,
            self.next_sub_wave,
            sub_wave.spawns.len()
        );
        for spawn in &sub_wave.spawns {
            let _ = self.invaders.insert(spawn.name.clone(), None);
            out.push(Command::SpawnInvader {
                name: spawn.name.clone(),
                kind: spawn.kind,
                path: spawn.path.clone(),
                options: spawn.options,
            });
        }
        self.next_sub_wave += 1;
        if self.next_sub_wave == self.sub_waves.len() {
            self.state = WaveState::Released;
        }
    }

    /// Reports whether every subwave was released and all of its invaders
    /// are gone or marked for destruction.
    #[must_use]
    pub fn is_complete(&self, invaders: &InvaderView) -> bool {
        self.state == WaveState::Released
            && self.invaders.values().all(|slot| match slot {
                Some(id) => invaders
                    .get(*id)
                    .map_or(true, |snapshot| snapshot.marked_for_destruction),
                None => false,
            })
    }
}
