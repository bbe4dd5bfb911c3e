//! Recursive Factorial - A Chain of Spawned Actors
//!
//! This example computes `n!` by giving every multiplication step its own
//! actor. The first actor seeds the accumulator and spawns the first link;
//! each link reports in to its parent, receives the running product,
//! multiplies, and extends the chain until the bound is reached, at which
//! point the result is printed and a retirement cascade unwinds the chain.
//!
//! # What You'll Learn
//!
//! - Building roles with `Role::builder()` (hello handler + prompt table)
//! - Spawning actors from handlers with `Message::Spawn`
//! - Carrying ids and numbers inside message payloads
//! - Clean system termination with `GoDie` and `join`
//!
//! # Run This Example
//!
//! ```bash
//! echo 5 | cargo run --example factorial
//! cargo run --example factorial -- 12
//! ```
//!
//! # Expected Output
//!
//! ```text
//! 120
//! ```

use std::io::BufRead;
use std::sync::{Arc, OnceLock};

use troupe_rt::prelude::*;

// =============================================================================
// Chain Protocol
// =============================================================================

// Message kinds of the chain protocol.
const ANSWER: usize = 0;
const FACTORIAL: usize = 1;
const UNWIND: usize = 2;

/// Per-actor state: position in the chain plus the running product.
struct Link {
    parent: Option<ActorId>,
    k: u64,
    acc: u64,
    n: u64,
}

fn encode_product(k: u64, acc: u64, n: u64) -> Vec<u8> {
    let mut payload = Vec::with_capacity(24);
    payload.extend_from_slice(&k.to_le_bytes());
    payload.extend_from_slice(&acc.to_le_bytes());
    payload.extend_from_slice(&n.to_le_bytes());
    payload
}

fn decode_product(payload: &[u8]) -> Option<(u64, u64, u64)> {
    let k = u64::from_le_bytes(payload.get(0..8)?.try_into().ok()?);
    let acc = u64::from_le_bytes(payload.get(8..16)?.try_into().ok()?);
    let n = u64::from_le_bytes(payload.get(16..24)?.try_into().ok()?);
    Some((k, acc, n))
}

// =============================================================================
// Role Definition
// =============================================================================

/// Build one role of the chain; `seed_n` is set only for the first actor.
fn chain_role(next: Arc<OnceLock<Arc<Role>>>, seed_n: Option<u64>) -> Role {
    let spawn_next = move |ctx: &mut ActorContext<'_>| {
        let Some(role) = next.get() else {
            eprintln!("chain role used before wiring");
            return;
        };
        if let Err(err) = ctx.send(ctx.id(), Message::spawn(Arc::clone(role))) {
            eprintln!("failed to extend the chain: {err}");
        }
    };
    let spawn_next_from_hello = spawn_next.clone();
    let spawn_next_from_factorial = spawn_next;

    Role::builder()
        .on_hello(move |ctx, creator| match (seed_n, creator) {
            // The first actor seeds the accumulator and starts the chain.
            (Some(n), _) => {
                ctx.set_state(Link {
                    parent: None,
                    k: 0,
                    acc: 1,
                    n,
                });
                spawn_next_from_hello(ctx);
            }
            // Every later link reports in to whoever spawned it.
            (None, Some(parent)) => {
                ctx.set_state(Link {
                    parent: Some(parent),
                    k: 0,
                    acc: 1,
                    n: 0,
                });
                let payload = ctx.id().to_le_bytes().to_vec();
                if let Err(err) = ctx.send(parent, Message::user(ANSWER, payload)) {
                    eprintln!("failed to report to parent: {err}");
                }
            }
            (None, None) => eprintln!("link greeted without a creator"),
        })
        .prompt(|ctx, payload| {
            // ANSWER: hand the fresh child the running product.
            let Some(child) = ActorId::from_payload(&payload) else {
                eprintln!("malformed answer payload");
                return;
            };
            let Some((k, acc, n)) = ctx.state::<Link>().map(|link| (link.k, link.acc, link.n))
            else {
                eprintln!("answered before being greeted");
                return;
            };
            let message = Message::user(FACTORIAL, encode_product(k, acc, n));
            if let Err(err) = ctx.send(child, message) {
                eprintln!("failed to pass the product along: {err}");
            }
        })
        .prompt(move |ctx, payload| {
            // FACTORIAL: multiply one step, then extend the chain or finish.
            let Some((k, acc, n)) = decode_product(&payload) else {
                eprintln!("malformed product payload");
                return;
            };
            if k == n {
                println!("{acc}");
                let _ = ctx.send(ctx.id(), Message::user_empty(UNWIND));
            } else {
                let k = k + 1;
                let acc = acc.saturating_mul(k);
                match ctx.state_mut::<Link>() {
                    Some(link) => {
                        link.k = k;
                        link.acc = acc;
                        link.n = n;
                    }
                    None => {
                        eprintln!("multiplied before being greeted");
                        return;
                    }
                }
                spawn_next_from_factorial(ctx);
            }
        })
        .prompt(|ctx, _payload| {
            // UNWIND: cascade towards the first actor, then retire.
            let parent = ctx.state::<Link>().and_then(|link| link.parent);
            if let Some(parent) = parent {
                let _ = ctx.send(parent, Message::user_empty(UNWIND));
            }
            let _ = ctx.send(ctx.id(), Message::godie());
        })
        .build()
}

// =============================================================================
// Entry Point
// =============================================================================

fn read_n() -> Result<u64, Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        return Ok(arg.trim().parse()?);
    }
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().parse()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let n = read_n()?;

    // Wire the self-extending link role, then the seed role pointing at it.
    let link_cell: Arc<OnceLock<Arc<Role>>> = Arc::new(OnceLock::new());
    let link_role = Arc::new(chain_role(Arc::clone(&link_cell), None));
    if link_cell.set(Arc::clone(&link_role)).is_err() {
        return Err("link role wired twice".into());
    }

    let seed_cell: Arc<OnceLock<Arc<Role>>> = Arc::new(OnceLock::new());
    if seed_cell.set(link_role).is_err() {
        return Err("seed target wired twice".into());
    }
    let seed_role = Arc::new(chain_role(seed_cell, Some(n)));

    let (system, first) = ActorSystem::create(SystemConfig::default(), seed_role)?;
    system.join(first);
    Ok(())
}
