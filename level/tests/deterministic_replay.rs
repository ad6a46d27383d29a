use std::time::Duration;

use cube_defence_core::{Defaults, Event, Face, LevelSpec, TileAddress};
use cube_defence_level::Level;
use cube_defence_world::query;

const LEVEL: &str = r#"
cube = { rows = 6, columns = 6, depth = 6 }

[paths]
A = [
    { face = "FRONT", row = 0, column = 0 },
    { face = "FRONT", row = 0, column = 1 },
    { face = "FRONT", row = 0, column = 2 },
    { face = "FRONT", row = 0, column = 3 },
    { face = "FRONT", row = 0, column = 4 },
    { face = "FRONT", row = 0, column = 5 },
    { face = "TOP", row = 5, column = 5 },
    { face = "TOP", row = 4, column = 5 },
]

[[waves]]
id = "1"

[[waves.sub_waves]]
seconds_delay = 0.0
invaders = [{ path = "A", count = 2 }]

[[waves.sub_waves]]
seconds_delay = 1.5
invaders = [{ path = "A", count = 1, options = { health = 150.0 } }]
"#;

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<Event>,
    coins: u32,
    invaders: usize,
    play_time: Duration,
}

fn replay() -> ReplayOutcome {
    let spec: LevelSpec = toml::from_str(LEVEL).expect("parse level");
    let mut level = Level::new(&spec, Defaults::default()).expect("level");
    level
        .purchase_defender(TileAddress::new(Face::Front, 1, 2))
        .expect("affordable");
    level.start();

    let mut events = Vec::new();
    for frame in 0..600 {
        if frame == 250 {
            level.set_paused(true);
        }
        if frame == 300 {
            level.set_paused(false);
        }
        events.extend(level.tick(Duration::from_millis(16)));
    }

    ReplayOutcome {
        events,
        coins: level.coin_balance(),
        invaders: query::invader_view(level.world()).iter().count(),
        play_time: level.play_time(),
    }
}

#[test]
fn replay_is_deterministic() {
    let first = replay();
    let second = replay();

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::ProjectileFired { .. })));
    assert!(first.play_time > Duration::ZERO);
    assert!(first.play_time <= Duration::from_millis(16 * 550));
}
