//! Cirkul Runtime
//!
//! Headless demo: dots drifting inside a box, moved by systems every tick.
//! Some dots are periodically killed and respawned so entity ids get
//! recycled.

mod components;

use anyhow::{Context, Result};
use cirkul_core::ecs::{Entity, System, World};
use cirkul_core::EcsConfig;
use components::{Position, Tint, Velocity};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DOTS: usize = 2_000;
const TICKS: u32 = 600;
const DT: f32 = 1.0 / 60.0;
const HALF_EXTENT: Vec2 = Vec2::new(400.0, 300.0);
const MAX_SPEED: f32 = 120.0;
const RESPAWN_EVERY: u32 = 60;
const RESPAWN_COUNT: usize = 50;
const STATS_EVERY: u32 = 120;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Cirkul v{}", cirkul_core::VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => EcsConfig::load(&path).with_context(|| format!("loading config from {path}"))?,
        None => EcsConfig::default(),
    };

    let mut world = World::new(config)?;
    world.create_scene();

    let mut rng = StdRng::seed_from_u64(0x0c1c_u64);
    for _ in 0..DOTS {
        spawn_dot(&mut world, &mut rng)?;
    }

    let moving = world.query()?.with::<Position>()?.with::<Velocity>()?;

    world.register_system(
        System::new("move", moving.clone(), |view| {
            let Some((_, (positions, velocities))) = view.columns_mut::<(Position, Velocity)>()
            else {
                return;
            };
            positions
                .par_iter_mut()
                .zip(velocities.par_iter())
                .for_each(|(p, v)| p.0 += v.0 * DT);
        })
        .with_begin(|| info!("movement online")),
    )?;

    world.register_system(System::new("bounds", moving.clone(), |view| {
        let Some((_, (positions, velocities))) = view.columns_mut::<(Position, Velocity)>() else {
            return;
        };
        for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
            if p.0.x.abs() > HALF_EXTENT.x {
                v.0.x = -v.0.x;
            }
            if p.0.y.abs() > HALF_EXTENT.y {
                v.0.y = -v.0.y;
            }
            p.0 = p.0.clamp(-HALF_EXTENT, HALF_EXTENT);
        }
    }))?;

    let tinted = world.query()?.with::<Tint>()?;
    world.register_system(System::new("fade", tinted, |view| {
        if let Some(tints) = view.column_mut::<Tint>() {
            tints.iter_mut().for_each(|tint| {
                let alpha = (tint.0 & 0xff).saturating_sub(1).max(0x20);
                tint.0 = (tint.0 & !0xff) | alpha;
            });
        }
    }))?;

    for tick in 1..=TICKS {
        world.run_systems()?;

        if tick % RESPAWN_EVERY == 0 {
            respawn(&mut world, &mut rng, &moving)?;
        }
        if tick % STATS_EVERY == 0 {
            log_stats(&world, tick);
        }
    }

    let stats = world.teardown();
    info!(
        used = stats.used,
        capacity = stats.capacity,
        allocations = stats.allocations,
        "shutdown complete"
    );
    Ok(())
}

fn spawn_dot(world: &mut World, rng: &mut StdRng) -> Result<Entity> {
    let entity = world.new_entity()?;
    let position = Vec2::new(
        rng.gen_range(-HALF_EXTENT.x..HALF_EXTENT.x),
        rng.gen_range(-HALF_EXTENT.y..HALF_EXTENT.y),
    );
    let velocity = Vec2::from_angle(rng.gen_range(0.0..std::f32::consts::TAU))
        * rng.gen_range(MAX_SPEED * 0.25..MAX_SPEED);

    world.add_component(entity, Position(position))?;
    world.add_component(entity, Velocity(velocity))?;
    if rng.gen_bool(0.5) {
        world.add_component(entity, Tint(rng.gen::<u32>() | 0xff))?;
    }
    Ok(entity)
}

/// Kill a random batch of dots and spawn the same number of fresh ones.
fn respawn(world: &mut World, rng: &mut StdRng, moving: &cirkul_core::ecs::Query) -> Result<()> {
    let mut alive = world.query_entities(moving)?;
    let count = RESPAWN_COUNT.min(alive.len());

    let mut killed = Vec::with_capacity(count);
    for _ in 0..count {
        let victim = alive.swap_remove(rng.gen_range(0..alive.len()));
        world.kill_entity(victim)?;
        killed.push(victim);
    }

    let mut reused = 0;
    for _ in 0..count {
        if killed.contains(&spawn_dot(world, rng)?) {
            reused += 1;
        }
    }
    info!(killed = count, reused, "respawned dots");
    Ok(())
}

fn log_stats(world: &World, tick: u32) {
    let arena = world.arena_stats();
    let archetypes = world
        .current_scene()
        .and_then(|scene| world.scene(scene))
        .map_or(0, |scene| scene.archetype_count());
    info!(
        tick,
        entities = world.entity_count(),
        archetypes,
        arena_used = arena.used,
        arena_remaining = arena.remaining,
        "stats"
    );
}
