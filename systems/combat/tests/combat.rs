use std::{collections::BTreeMap, time::Duration};

use cube_defence_core::{
    Combatant, Command, CubeDimensions, Defaults, DefenderOptions, EntityRef, Event, Face,
    InvaderId, InvaderKind, InvaderOptions, TileAddress,
};
use cube_defence_system_combat::Combat;
use cube_defence_system_projectiles::Projectiles;
use cube_defence_world::{self as world, query, World};

const TICK: Duration = Duration::from_millis(10);

#[derive(Default)]
struct Systems {
    combat: Combat,
    projectiles: Projectiles,
}

fn world_with_stationary_invader(health: f32) -> World {
    let mut paths = BTreeMap::new();
    let _ = paths.insert(
        "A".to_owned(),
        (0..5)
            .map(|column| TileAddress::new(Face::Front, 0, column))
            .collect::<Vec<_>>(),
    );
    let mut world = World::new(CubeDimensions::new(5, 5, 5), &paths, Defaults::default())
        .expect("world");

    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnInvader {
            name: "1-gnome-0".to_owned(),
            kind: InvaderKind::Gnome,
            path: "A".to_owned(),
            options: InvaderOptions {
                speed_tiles_per_second: Some(0.0),
                health: Some(health),
                ..InvaderOptions::default()
            },
        },
        &mut events,
    );
    world
}

fn place_defender(world: &mut World, row: u32, column: u32) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PlaceDefender {
            tile: TileAddress::new(Face::Front, row, column),
            options: DefenderOptions::default(),
        },
        &mut events,
    );
    assert!(matches!(events.as_slice(), [Event::DefenderPlaced { .. }]));
}

fn apply_all(world: &mut World, commands: Vec<Command>, log: &mut Vec<Event>) {
    for command in commands {
        world::apply(world, command, log);
    }
}

fn frame(world: &mut World, systems: &mut Systems, log: &mut Vec<Event>) {
    let mut tick_events = Vec::new();
    world::apply(world, Command::Tick { dt: TICK }, &mut tick_events);

    let mut commands = Vec::new();
    systems.projectiles.handle(
        &tick_events,
        &query::projectile_view(world),
        query::defaults(world).projectile_arrival_epsilon,
        |target| query::combatant_position(world, target),
        &mut commands,
    );
    apply_all(world, commands, log);

    let now = query::now(world);
    let mut commands = Vec::new();
    systems.combat.handle_invaders(
        &tick_events,
        now,
        &query::invader_view(world),
        |point, range| query::closest_defender(world, point, Some(range)),
        &mut commands,
    );
    apply_all(world, commands, log);

    let mut commands = Vec::new();
    systems.combat.handle_defenders(
        &tick_events,
        now,
        &query::defender_view(world),
        |point, range| query::closest_invader(world, point, Some(range)),
        &mut commands,
    );
    apply_all(world, commands, log);

    world::apply(world, Command::Sweep, log);
}

fn run(world: &mut World, systems: &mut Systems, ticks: usize) -> Vec<Event> {
    let mut log = Vec::new();
    for _ in 0..ticks {
        frame(world, systems, &mut log);
    }
    log
}

fn count(log: &[Event], predicate: impl Fn(&Event) -> bool) -> usize {
    log.iter().filter(|event| predicate(event)).count()
}

#[test]
fn defender_kills_invader_within_two_seconds() {
    let mut world = world_with_stationary_invader(100.0);
    place_defender(&mut world, 1, 1);
    let mut systems = Systems::default();

    let log = run(&mut world, &mut systems, 200);

    assert!(query::invader_view(&world).iter().next().is_none());
    assert_eq!(query::coin_balance(&world), 300);
    assert_eq!(
        count(&log, |event| matches!(event, Event::CoinsDeposited { .. })),
        1
    );
    assert_eq!(
        count(&log, |event| *event
            == Event::EntityDestroyed {
                entity: EntityRef::Invader(InvaderId::new(0))
            }),
        1
    );
}

#[test]
fn defender_respects_its_cooldown() {
    let mut world = world_with_stationary_invader(10_000.0);
    place_defender(&mut world, 1, 1);
    let mut systems = Systems::default();

    let log = run(&mut world, &mut systems, 250);

    let shots = count(&log, |event| {
        matches!(
            event,
            Event::ProjectileFired {
                attacker: Combatant::Defender(_),
                ..
            }
        )
    });
    assert_eq!(shots, 3, "fires at ~0.01s, ~1.02s and ~2.03s");
}

#[test]
fn invader_shoots_back_at_defender_in_range() {
    let mut world = world_with_stationary_invader(10_000.0);
    place_defender(&mut world, 1, 1);
    let mut systems = Systems::default();

    let _ = run(&mut world, &mut systems, 100);

    let defenders = query::defender_view(&world);
    let defender = defenders.iter().next().expect("defender survives");
    assert!(defender.health < 100.0);
    assert!(defender.health > 0.0);
}

#[test]
fn overkill_deposits_coins_once() {
    let mut world = world_with_stationary_invader(50.0);
    place_defender(&mut world, 1, 0);
    place_defender(&mut world, 1, 1);
    let mut systems = Systems::default();

    let log = run(&mut world, &mut systems, 150);

    assert!(query::invader_view(&world).iter().next().is_none());
    assert_eq!(query::coin_balance(&world), 300);
    assert_eq!(
        count(&log, |event| matches!(event, Event::CoinsDeposited { .. })),
        1
    );
    assert!(query::projectile_view(&world)
        .iter()
        .all(|projectile| projectile.target != Combatant::Invader(InvaderId::new(0))));
}

#[test]
fn defenders_out_of_range_hold_fire() {
    let mut world = world_with_stationary_invader(100.0);
    place_defender(&mut world, 4, 4);
    let mut systems = Systems::default();

    let log = run(&mut world, &mut systems, 50);

    assert_eq!(
        count(&log, |event| matches!(event, Event::ProjectileFired { .. })),
        0
    );
}
