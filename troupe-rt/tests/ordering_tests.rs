//! Ordering and mutual-exclusion guarantees.
//!
//! One actor processes its messages strictly in send order and never runs
//! two handlers at once, regardless of how many workers the pool has.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use std::time::Duration;

use troupe_rt::prelude::*;

fn logging_role(log: Arc<Mutex<Vec<u8>>>) -> Arc<Role> {
    Arc::new(
        Role::builder()
            .prompt(move |_ctx, payload| {
                log.lock().unwrap().push(payload[0]);
            })
            .build(),
    )
}

fn assert_fan_out_order(pool_size: usize) {
    let log = Arc::new(Mutex::new(Vec::new()));
    let role = logging_role(Arc::clone(&log));

    let config = SystemConfig::builder()
        .with_pool_size(pool_size)
        .build()
        .unwrap();
    let (system, first) = ActorSystem::create(config, role).unwrap();

    for value in 0..50u8 {
        system.send(first, Message::user(0, vec![value])).unwrap();
    }
    system.send(first, Message::godie()).unwrap();
    system.join(first);

    let log = log.lock().unwrap();
    assert_eq!(*log, (0..50).collect::<Vec<u8>>());
}

#[test]
fn fan_out_order_with_default_pool() {
    assert_fan_out_order(SystemConfig::default().pool_size);
}

#[test]
fn fan_out_order_with_wide_pool() {
    assert_fan_out_order(8);
}

#[test]
fn fan_out_order_with_single_worker() {
    assert_fan_out_order(1);
}

#[test]
fn handlers_of_one_actor_never_interleave() {
    let in_flight = Arc::new(AtomicUsize::new(0));
    let overlaps = Arc::new(AtomicUsize::new(0));
    let processed = Arc::new(AtomicUsize::new(0));

    let in_flight_h = Arc::clone(&in_flight);
    let overlaps_h = Arc::clone(&overlaps);
    let processed_h = Arc::clone(&processed);

    let role = Arc::new(
        Role::builder()
            .prompt(move |_ctx, _| {
                if in_flight_h.fetch_add(1, Ordering::SeqCst) != 0 {
                    overlaps_h.fetch_add(1, Ordering::SeqCst);
                }
                thread::sleep(Duration::from_micros(200));
                in_flight_h.fetch_sub(1, Ordering::SeqCst);
                processed_h.fetch_add(1, Ordering::SeqCst);
            })
            .build(),
    );

    let config = SystemConfig::builder().with_pool_size(4).build().unwrap();
    let (system, first) = ActorSystem::create(config, role).unwrap();

    for _ in 0..32 {
        system.send(first, Message::user_empty(0)).unwrap();
    }
    system.send(first, Message::godie()).unwrap();
    system.join(first);

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(processed.load(Ordering::SeqCst), 32);
}

#[test]
fn every_created_actor_is_greeted_exactly_once() {
    // A chain of five actors, each spawning the next from its greeting.
    let hellos = Arc::new(AtomicUsize::new(0));
    let hellos_h = Arc::clone(&hellos);

    let role_cell: Arc<OnceLock<Arc<Role>>> = Arc::new(OnceLock::new());
    let role_cell_h = Arc::clone(&role_cell);

    let role = Arc::new(
        Role::builder()
            .on_hello(move |ctx, _creator| {
                let greeted = hellos_h.fetch_add(1, Ordering::SeqCst) + 1;
                if greeted < 5 {
                    let next = Arc::clone(role_cell_h.get().unwrap());
                    ctx.send(ctx.id(), Message::spawn(next)).unwrap();
                }
                ctx.send(ctx.id(), Message::godie()).unwrap();
            })
            .build(),
    );
    role_cell.set(Arc::clone(&role)).unwrap();

    let (system, first) = ActorSystem::create(SystemConfig::default(), role).unwrap();
    system.join(first);

    assert_eq!(system.total_spawned(), 5);
    assert_eq!(hellos.load(Ordering::SeqCst), 5);
}

#[test]
fn two_actors_rally_to_completion() {
    // A bounded ping-pong rally between two actors; clean termination
    // proves cross-actor sends from handlers make progress.
    const ANNOUNCE: usize = 0;
    const BOUNCE: usize = 1;
    const ROUNDS: u8 = 6;

    let rallies = Arc::new(AtomicUsize::new(0));
    let rallies_h = Arc::clone(&rallies);

    let pong_role = Arc::new(
        Role::builder()
            .on_hello(|ctx, creator| {
                let ping = creator.unwrap();
                ctx.set_state(ping);
                ctx.send(ping, Message::user(ANNOUNCE, ctx.id().to_le_bytes().to_vec()))
                    .unwrap();
            })
            .prompt(move |ctx, payload| {
                rallies_h.fetch_add(1, Ordering::SeqCst);
                let ping = *ctx.state::<ActorId>().unwrap();
                ctx.send(ping, Message::user(BOUNCE, vec![payload[0]]))
                    .unwrap();
            })
            .build(),
    );

    let ping_role = Arc::new(
        Role::builder()
            .on_hello(move |ctx, _| {
                ctx.send(ctx.id(), Message::spawn(Arc::clone(&pong_role)))
                    .unwrap();
            })
            .prompt(|ctx, payload| {
                let pong = ActorId::from_payload(&payload).unwrap();
                ctx.set_state(pong);
                ctx.send(pong, Message::user(0, vec![ROUNDS])).unwrap();
            })
            .prompt(|ctx, payload| {
                let pong = *ctx.state::<ActorId>().unwrap();
                let round = payload[0];
                if round == 0 {
                    ctx.send(pong, Message::godie()).unwrap();
                    ctx.send(ctx.id(), Message::godie()).unwrap();
                } else {
                    ctx.send(pong, Message::user(0, vec![round - 1])).unwrap();
                }
            })
            .build(),
    );

    let (system, first) = ActorSystem::create(SystemConfig::default(), ping_role).unwrap();
    system.join(first);

    assert_eq!(system.total_spawned(), 2);
    assert_eq!(rallies.load(Ordering::SeqCst), usize::from(ROUNDS) + 1);
    assert_eq!(system.active_count(), 0);
}
