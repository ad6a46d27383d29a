use std::{collections::BTreeMap, time::Duration};

use cube_defence_core::{
    CubeDimensions, Defaults, Event, Face, InsufficientFunds, InvaderKind, InvaderOptions,
    LevelSpec, PathNotFound, PlacementError, SubWaveInvaderSpec, SubWaveSpec, TileAddress,
    WaveSpec,
};
use cube_defence_level::{Level, LevelError, PurchaseError};
use cube_defence_world::query;

const TICK: Duration = Duration::from_millis(10);

fn batch(path: &str, count: u32) -> SubWaveInvaderSpec {
    SubWaveInvaderSpec {
        kind: InvaderKind::Gnome,
        path: path.to_owned(),
        count,
        options: InvaderOptions::default(),
    }
}

fn sub_wave(seconds_delay: f32, invaders: Vec<SubWaveInvaderSpec>) -> SubWaveSpec {
    SubWaveSpec {
        seconds_delay,
        invaders,
    }
}

fn row_path(row: u32) -> Vec<TileAddress> {
    (0..5)
        .map(|column| TileAddress::new(Face::Front, row, column))
        .collect()
}

fn spec(waves: Vec<WaveSpec>) -> LevelSpec {
    let mut paths = BTreeMap::new();
    let _ = paths.insert("A".to_owned(), row_path(0));
    let _ = paths.insert("B".to_owned(), row_path(4));
    LevelSpec {
        cube: CubeDimensions::new(5, 5, 5),
        paths,
        waves,
    }
}

fn two_wave_spec() -> LevelSpec {
    spec(vec![
        WaveSpec {
            id: "1".to_owned(),
            sub_waves: vec![
                sub_wave(0.0, vec![batch("A", 2), batch("B", 1)]),
                sub_wave(10.0, vec![batch("B", 1)]),
            ],
        },
        WaveSpec {
            id: "2".to_owned(),
            sub_waves: vec![sub_wave(0.0, vec![batch("A", 3), batch("B", 2)])],
        },
    ])
}

fn run(level: &mut Level, ticks: usize) -> Vec<Event> {
    let mut log = Vec::new();
    for _ in 0..ticks {
        log.extend(level.tick(TICK));
    }
    log
}

fn spawned_names(log: &[Event]) -> Vec<String> {
    log.iter()
        .filter_map(|event| match event {
            Event::InvaderSpawned { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn unknown_path_aborts_the_load() {
    let spec = spec(vec![WaveSpec {
        id: "1".to_owned(),
        sub_waves: vec![sub_wave(0.0, vec![batch("A", 1), batch("Z", 1)])],
    }]);

    let error = Level::new(&spec, Defaults::default()).expect_err("path Z is undeclared");

    assert_eq!(
        error,
        LevelError::PathNotFound(PathNotFound {
            wave: "1".to_owned(),
            sub_wave: 0,
            path: "Z".to_owned(),
        })
    );
}

#[test]
fn nothing_spawns_before_the_level_starts() {
    let mut level = Level::new(&two_wave_spec(), Defaults::default()).expect("level");

    let log = run(&mut level, 100);

    assert!(spawned_names(&log).is_empty());
    assert_eq!(level.play_time(), Duration::ZERO);
    assert!(!level.is_started());
}

#[test]
fn starting_releases_the_first_wave() {
    let mut level = Level::new(&two_wave_spec(), Defaults::default()).expect("level");
    level.start();

    let log = run(&mut level, 1);

    assert_eq!(
        spawned_names(&log),
        vec!["1-gnome-0", "1-gnome-1", "1-gnome-2"]
    );
    assert_eq!(level.released_waves(), 1);
    assert_eq!(query::invader_view(level.world()).iter().count(), 3);
}

#[test]
fn next_wave_past_the_last_does_nothing() {
    let mut level = Level::new(&two_wave_spec(), Defaults::default()).expect("level");
    assert!(!level.start_next_wave(), "level has not started yet");

    level.start();
    assert!(level.start_next_wave());
    assert!(!level.start_next_wave());
    assert_eq!(level.released_waves(), 2);

    let log = run(&mut level, 1);
    assert_eq!(spawned_names(&log).len(), 8);
}

#[test]
fn pausing_freezes_play_time_and_invaders() {
    let mut level = Level::new(&two_wave_spec(), Defaults::default()).expect("level");
    level.start();
    let _ = run(&mut level, 50);

    level.set_paused(true);
    let played = level.play_time();
    let before = query::invader_view(level.world()).into_vec();
    let log = run(&mut level, 50);

    assert!(log.contains(&Event::PauseChanged { paused: true }));
    assert_eq!(level.play_time(), played);
    assert_eq!(query::invader_view(level.world()).into_vec(), before);

    level.set_paused(false);
    let _ = run(&mut level, 10);
    assert!(level.play_time() > played);
}

#[test]
fn purchases_validate_placement_then_funds() {
    let mut level = Level::new(&two_wave_spec(), Defaults::default()).expect("level");
    let on_path = TileAddress::new(Face::Front, 0, 2);
    let outside = TileAddress::new(Face::Top, 7, 0);

    assert_eq!(
        level.purchase_defender(on_path),
        Err(PurchaseError::Placement(PlacementError::OnPath(on_path)))
    );
    assert!(matches!(
        level.purchase_defender(outside),
        Err(PurchaseError::Placement(PlacementError::OutOfBounds(_)))
    ));
    assert_eq!(level.coin_balance(), 200);

    assert_eq!(
        level.purchase_defender(TileAddress::new(Face::Front, 2, 2)),
        Ok(())
    );
    assert_eq!(level.coin_balance(), 0);
    assert_eq!(
        level.purchase_defender(TileAddress::new(Face::Front, 3, 2)),
        Err(PurchaseError::Funds(InsufficientFunds {
            balance: 0,
            cost: 200
        }))
    );

    let log = level.tick(TICK);
    assert_eq!(
        log.iter()
            .filter(|event| matches!(event, Event::DefenderPlaced { .. }))
            .count(),
        1
    );
}

#[test]
fn level_is_won_once_every_wave_is_cleared() {
    let spec = spec(vec![WaveSpec {
        id: "1".to_owned(),
        sub_waves: vec![sub_wave(0.0, vec![batch("A", 1)])],
    }]);
    let mut level = Level::new(&spec, Defaults::default()).expect("level");
    level
        .purchase_defender(TileAddress::new(Face::Front, 1, 1))
        .expect("affordable");
    level.start();

    let mut frames = 0;
    while !level.is_won() && frames < 500 {
        let _ = level.tick(TICK);
        frames += 1;
    }

    assert!(level.is_won(), "invader survived {frames} frames");
    assert!(level.is_paused());
    assert_eq!(level.coin_balance(), 100);
    assert!(query::invader_view(level.world()).iter().next().is_none());

    let played = level.play_time();
    let _ = run(&mut level, 10);
    assert_eq!(level.play_time(), played);
}

#[test]
fn level_with_pending_waves_is_not_won() {
    let mut level = Level::new(&two_wave_spec(), Defaults::default()).expect("level");
    level.start();
    let _ = run(&mut level, 10);
    assert!(!level.is_won());
}

#[test]
fn invaders_spawned_without_health_still_let_the_level_be_won() {
    let spec = spec(vec![WaveSpec {
        id: "1".to_owned(),
        sub_waves: vec![sub_wave(
            0.0,
            vec![SubWaveInvaderSpec {
                options: InvaderOptions {
                    health: Some(-5.0),
                    ..InvaderOptions::default()
                },
                ..batch("A", 1)
            }],
        )],
    }]);
    let mut level = Level::new(&spec, Defaults::default()).expect("level");
    level.start();

    let log = run(&mut level, 1);

    assert_eq!(spawned_names(&log), vec!["1-gnome-0"]);
    assert!(level.is_won());
    assert_eq!(level.coin_balance(), 300);
    assert!(query::invader_view(level.world()).iter().next().is_none());
}
